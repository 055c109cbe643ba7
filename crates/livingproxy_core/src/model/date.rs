//! Genealogical dates.
//!
//! # Responsibility
//! - Represent exact, approximate, bounded and ranged dates.
//! - Parse the compact textual forms used by imports and fixtures.
//!
//! # Invariants
//! - `month == 0` / `day == 0` mean "unknown", never "January" / "1st".
//! - A date without `start` carries no year evidence, even if `text` is set.
//! - `stop` is only meaningful for `Range` and `Span` modifiers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static CALENDAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,4})(?:-(\d{1,2})(?:-(\d{1,2}))?)?$").expect("valid calendar regex")
});
static QUALITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(est(?:imated)?|calc(?:ulated)?)\.?\s+(.+)$").expect("valid quality regex")
});
static MODIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(abt|about|circa|bef|before|aft|after)\.?\s+(.+)$")
        .expect("valid modifier regex")
});
static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(?:between|bet)\s+(\S+)\s+and\s+(\S+)$").expect("valid range regex")
});
static SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)from\s+(\S+)\s+to\s+(\S+)$").expect("valid span regex"));

/// Year/month/day triple; zero month or day means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    pub fn year_only(year: i32) -> Self {
        Self::new(year, 0, 0)
    }

    fn parse(value: &str) -> Option<Self> {
        let caps = CALENDAR_RE.captures(value.trim())?;
        let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
        let month = match caps.get(2) {
            Some(m) => m.as_str().parse::<u8>().ok()?,
            None => 0,
        };
        let day = match caps.get(3) {
            Some(d) => d.as_str().parse::<u8>().ok()?,
            None => 0,
        };
        if month > 12 || day > 31 || (month == 0 && day != 0) {
            return None;
        }
        Some(Self::new(year, month, day))
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.month, self.day) {
            (0, _) => write!(f, "{}", self.year),
            (month, 0) => write!(f, "{}-{:02}", self.year, month),
            (month, day) => write!(f, "{}-{:02}-{:02}", self.year, month, day),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateModifier {
    #[default]
    None,
    Before,
    After,
    About,
    Range,
    Span,
    TextOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateQuality {
    #[default]
    Regular,
    Estimated,
    Calculated,
}

/// A possibly-empty, possibly-approximate genealogical date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Date {
    pub modifier: DateModifier,
    pub quality: DateQuality,
    pub start: Option<CalendarDate>,
    pub stop: Option<CalendarDate>,
    /// Original text for text-only dates.
    pub text: String,
}

impl Date {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_year(year: i32) -> Self {
        Self::from_calendar(CalendarDate::year_only(year))
    }

    pub fn from_ymd(year: i32, month: u8, day: u8) -> Self {
        Self::from_calendar(CalendarDate::new(year, month, day))
    }

    fn from_calendar(start: CalendarDate) -> Self {
        Self {
            start: Some(start),
            ..Self::default()
        }
    }

    /// Parses a compact textual date.
    ///
    /// Unrecognized input becomes a text-only date, which carries no year
    /// evidence. Blank input becomes the empty date.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Self::empty();
        }

        let (quality, rest) = match QUALITY_RE.captures(trimmed) {
            Some(caps) => {
                let quality = if caps[1].to_ascii_lowercase().starts_with("est") {
                    DateQuality::Estimated
                } else {
                    DateQuality::Calculated
                };
                (quality, caps.get(2).map_or("", |m| m.as_str()))
            }
            None => (DateQuality::Regular, trimmed),
        };

        let parsed = parse_compound(rest).or_else(|| parse_simple(rest));
        match parsed {
            Some((modifier, start, stop)) => Self {
                modifier,
                quality,
                start: Some(start),
                stop,
                text: String::new(),
            },
            None => Self {
                modifier: DateModifier::TextOnly,
                quality: DateQuality::Regular,
                start: None,
                stop: None,
                text: trimmed.to_string(),
            },
        }
    }

    /// Returns whether the date carries no calendar value at all.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.text.trim().is_empty()
    }

    /// Returns whether the date carries a usable year.
    pub fn has_year(&self) -> bool {
        self.start.is_some()
    }

    pub fn is_compound(&self) -> bool {
        matches!(self.modifier, DateModifier::Range | DateModifier::Span)
    }

    /// Start year, if any.
    pub fn year(&self) -> Option<i32> {
        self.start.map(|value| value.year)
    }

    /// Latest year the date can denote.
    ///
    /// Ranges and spans resolve to their stop year; every other modifier
    /// resolves to its start year.
    pub fn latest_year(&self) -> Option<i32> {
        if self.is_compound() {
            if let Some(stop) = self.stop {
                return Some(stop.year);
            }
        }
        self.year()
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Some(start) = self.start else {
            return f.write_str(&self.text);
        };
        match self.quality {
            DateQuality::Regular => {}
            DateQuality::Estimated => f.write_str("est ")?,
            DateQuality::Calculated => f.write_str("calc ")?,
        }
        match (self.modifier, self.stop) {
            (DateModifier::Range, Some(stop)) => write!(f, "between {start} and {stop}"),
            (DateModifier::Span, Some(stop)) => write!(f, "from {start} to {stop}"),
            (DateModifier::Before, _) => write!(f, "bef {start}"),
            (DateModifier::After, _) => write!(f, "aft {start}"),
            (DateModifier::About, _) => write!(f, "abt {start}"),
            _ => write!(f, "{start}"),
        }
    }
}

fn parse_compound(value: &str) -> Option<(DateModifier, CalendarDate, Option<CalendarDate>)> {
    let (modifier, caps) = if let Some(caps) = RANGE_RE.captures(value) {
        (DateModifier::Range, caps)
    } else if let Some(caps) = SPAN_RE.captures(value) {
        (DateModifier::Span, caps)
    } else {
        return None;
    };
    let start = CalendarDate::parse(caps.get(1)?.as_str())?;
    let stop = CalendarDate::parse(caps.get(2)?.as_str())?;
    if stop < start {
        return None;
    }
    Some((modifier, start, Some(stop)))
}

fn parse_simple(value: &str) -> Option<(DateModifier, CalendarDate, Option<CalendarDate>)> {
    if let Some(caps) = MODIFIER_RE.captures(value) {
        let modifier = match caps[1].to_ascii_lowercase().as_str() {
            "bef" | "before" => DateModifier::Before,
            "aft" | "after" => DateModifier::After,
            _ => DateModifier::About,
        };
        let start = CalendarDate::parse(caps.get(2)?.as_str())?;
        return Some((modifier, start, None));
    }
    CalendarDate::parse(value).map(|start| (DateModifier::None, start, None))
}
