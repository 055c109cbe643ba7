//! Resolved privacy configuration and proxy construction options.
//!
//! # Responsibility
//! - Hold placeholder texts and lifespan bounds as one explicit value.
//! - Parse redaction modes from their stable string names.
//!
//! # Invariants
//! - Placeholder texts are never empty (an empty placeholder would make a
//!   redacted name indistinguishable from a missing one).
//! - Lifespan bounds are strictly positive.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_PRIVATE_GIVEN_TEXT: &str = "[Living]";
pub const DEFAULT_PRIVATE_SURNAME_TEXT: &str = "[Living]";

/// Configuration load/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "failed to parse privacy config: {err}"),
            Self::Invalid(message) => write!(f, "invalid privacy config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Numeric bounds used by the aliveness heuristics.
///
/// The kin bounds are best-effort estimates; they only ever produce a
/// "dead" verdict when the evidence is far outside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifespanConfig {
    /// Oldest age a person is assumed to reach.
    pub max_age_prob_alive: u32,
    /// Largest plausible birth-year gap between siblings.
    pub max_sibling_age_diff: u32,
    /// Youngest plausible parent age at a child's birth.
    pub min_generation_years: u32,
    /// Oldest plausible parent age at a child's birth.
    pub max_generation_years: u32,
    /// Largest plausible birth-year gap between spouses.
    pub max_spouse_age_diff: u32,
}

impl Default for LifespanConfig {
    fn default() -> Self {
        Self {
            max_age_prob_alive: 110,
            max_sibling_age_diff: 20,
            min_generation_years: 13,
            max_generation_years: 60,
            max_spouse_age_diff: 30,
        }
    }
}

impl LifespanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = [
            ("max_age_prob_alive", self.max_age_prob_alive),
            ("max_sibling_age_diff", self.max_sibling_age_diff),
            ("min_generation_years", self.min_generation_years),
            ("max_generation_years", self.max_generation_years),
            ("max_spouse_age_diff", self.max_spouse_age_diff),
        ];
        if let Some((name, _)) = bounds.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("`{name}` must be positive")));
        }
        if self.min_generation_years > self.max_generation_years {
            return Err(ConfigError::Invalid(
                "`min_generation_years` must not exceed `max_generation_years`".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolved privacy settings passed explicitly into the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    /// Replacement for a living person's given name.
    pub private_given_text: String,
    /// Replacement for a living person's patronymic/matronymic surname.
    pub private_surname_text: String,
    pub lifespan: LifespanConfig,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            private_given_text: DEFAULT_PRIVATE_GIVEN_TEXT.to_string(),
            private_surname_text: DEFAULT_PRIVATE_SURNAME_TEXT.to_string(),
            lifespan: LifespanConfig::default(),
        }
    }
}

impl PrivacyConfig {
    /// Parses a JSON document; missing keys fall back to defaults.
    pub fn from_json_str(value: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.private_given_text.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "`private_given_text` must not be empty".to_string(),
            ));
        }
        if self.private_surname_text.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "`private_surname_text` must not be empty".to_string(),
            ));
        }
        self.lifespan.validate()
    }
}

/// How a living person is presented by the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedactionMode {
    /// Living people disappear from every access path.
    ExcludeAll,
    /// Living people appear with a placeholder given name.
    LastNameOnly,
    /// Living people appear with their name but no other details.
    FullNameOnly,
}

impl RedactionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExcludeAll => "exclude",
            Self::LastNameOnly => "last-name-only",
            Self::FullNameOnly => "full-name-only",
        }
    }

    pub fn excludes(self) -> bool {
        matches!(self, Self::ExcludeAll)
    }
}

impl Display for RedactionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RedactionMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exclude" | "exclude-all" => Ok(Self::ExcludeAll),
            "last-name-only" | "last-name" => Ok(Self::LastNameOnly),
            "full-name-only" | "full-name" => Ok(Self::FullNameOnly),
            other => Err(ConfigError::Invalid(format!(
                "unsupported redaction mode `{other}`; expected exclude|last-name-only|full-name-only"
            ))),
        }
    }
}

/// Construction parameters of a living-people proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyOptions {
    pub mode: RedactionMode,
    /// Fixed reference year; `None` means the current year at construction.
    pub reference_year: Option<i32>,
    /// Years after death during which a person is still treated as living.
    pub years_after_death: u32,
}

impl ProxyOptions {
    pub fn new(mode: RedactionMode) -> Self {
        Self {
            mode,
            reference_year: None,
            years_after_death: 0,
        }
    }

    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn with_years_after_death(mut self, years: u32) -> Self {
        self.years_after_death = years;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PrivacyConfig, RedactionMode};

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = PrivacyConfig::from_json_str(
            r#"{"private_given_text": "[Private]", "lifespan": {"max_age_prob_alive": 100}}"#,
        )
        .expect("partial config should parse");
        assert_eq!(config.private_given_text, "[Private]");
        assert_eq!(config.private_surname_text, "[Living]");
        assert_eq!(config.lifespan.max_age_prob_alive, 100);
        assert_eq!(config.lifespan.min_generation_years, 13);
    }

    #[test]
    fn rejects_empty_placeholders_and_zero_bounds() {
        let err = PrivacyConfig::from_json_str(r#"{"private_surname_text": "  "}"#)
            .expect_err("blank placeholder must fail");
        assert!(matches!(err, ConfigError::Invalid(message) if message.contains("surname")));

        let err = PrivacyConfig::from_json_str(r#"{"lifespan": {"max_age_prob_alive": 0}}"#)
            .expect_err("zero lifespan must fail");
        assert!(err.to_string().contains("max_age_prob_alive"));

        assert!(matches!(
            PrivacyConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn parses_redaction_modes() {
        assert_eq!(
            "exclude".parse::<RedactionMode>().unwrap(),
            RedactionMode::ExcludeAll
        );
        assert_eq!(
            " Last-Name-Only ".parse::<RedactionMode>().unwrap(),
            RedactionMode::LastNameOnly
        );
        assert_eq!(
            "full-name".parse::<RedactionMode>().unwrap(),
            RedactionMode::FullNameOnly
        );
        assert!("hide".parse::<RedactionMode>().is_err());
        for mode in [
            RedactionMode::ExcludeAll,
            RedactionMode::LastNameOnly,
            RedactionMode::FullNameOnly,
        ] {
            assert_eq!(mode.as_str().parse::<RedactionMode>().unwrap(), mode);
        }
    }
}
