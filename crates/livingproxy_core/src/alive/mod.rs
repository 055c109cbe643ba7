//! Aliveness classification.
//!
//! # Responsibility
//! - Decide whether a person should be treated as living at a reference year.
//! - Keep each heuristic as a separate rule evaluated in fixed priority order.
//!
//! # Invariants
//! - The first rule returning a decision wins; later rules are not consulted.
//! - `Unknown` is treated as living by every caller.
//! - Evaluation only reads from `store.unfiltered()`, so stacked proxies
//!   classify the same person identically.
//! - Store errors propagate; malformed dates never raise errors.

mod rules;

pub use rules::{
    default_rules, BirthAgeRule, DeathEventRule, DeathWithoutDateRule, KinEvidenceRule,
};

use crate::config::LifespanConfig;
use crate::model::event::{Event, EventType};
use crate::model::handle::Handle;
use crate::model::person::Person;
use crate::store::{GenealogyStore, StoreResult};
use chrono::Datelike;
use log::debug;

/// Classification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aliveness {
    Alive,
    Dead,
    /// No usable evidence, or contradictory evidence.
    Unknown,
}

impl Aliveness {
    /// Privacy policy: only a definite `Dead` releases a record.
    pub fn treats_as_living(self) -> bool {
        !matches!(self, Self::Dead)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alive => "alive",
            Self::Dead => "dead",
            Self::Unknown => "unknown",
        }
    }
}

/// Result of one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Decided(Aliveness),
    Inconclusive,
}

/// Evaluator result with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub aliveness: Aliveness,
    /// `None` when no rule was decisive.
    pub decided_by: Option<&'static str>,
}

impl Verdict {
    pub fn is_living(&self) -> bool {
        self.aliveness.treats_as_living()
    }
}

/// Read-only inputs shared by all rules for one evaluation.
pub struct RuleContext<'a> {
    pub store: &'a dyn GenealogyStore,
    pub reference_year: i32,
    pub years_after_death: u32,
    pub lifespan: &'a LifespanConfig,
}

impl RuleContext<'_> {
    /// Oldest age at which a person is still treated as living.
    pub fn age_limit(&self) -> i64 {
        i64::from(self.lifespan.max_age_prob_alive) + i64::from(self.years_after_death)
    }

    /// Events the person holds in a primary role, in reference order.
    pub fn own_events(&self, person: &Person) -> StoreResult<Vec<Event>> {
        let mut events = Vec::new();
        for event_ref in person
            .event_ref_list
            .iter()
            .filter(|event_ref| event_ref.is_own_event())
        {
            if let Some(event) = self.store.get_event_from_handle(&event_ref.ref_handle)? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Latest plausible birth and death years from the person's own events.
    ///
    /// Birth falls back to baptism/christening, death to burial/cremation.
    pub fn life_years(&self, person: &Person) -> StoreResult<LifeYears> {
        let events = self.own_events(person)?;
        Ok(LifeYears {
            birth: first_year(&events, |kind| *kind == EventType::Birth)
                .or_else(|| first_year(&events, EventType::is_birth_fallback)),
            death: first_year(&events, |kind| *kind == EventType::Death)
                .or_else(|| first_year(&events, EventType::is_death_fallback)),
        })
    }

    pub fn person(&self, handle: &Handle) -> StoreResult<Option<Person>> {
        self.store.get_person_from_handle(handle)
    }
}

/// Birth/death years drawn from a person's own events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifeYears {
    pub birth: Option<i32>,
    pub death: Option<i32>,
}

fn first_year(events: &[Event], matches: impl Fn(&EventType) -> bool) -> Option<i32> {
    events
        .iter()
        .filter(|event| matches(&event.event_type))
        .find_map(|event| event.date.latest_year())
}

/// One heuristic in the classification chain.
pub trait AlivenessRule {
    /// Stable identifier reported in [`Verdict::decided_by`].
    fn name(&self) -> &'static str;

    fn classify(&self, ctx: &RuleContext<'_>, person: &Person) -> StoreResult<RuleOutcome>;
}

/// Ordered chain of aliveness rules bound to a reference year.
pub struct AlivenessEvaluator {
    rules: Vec<Box<dyn AlivenessRule>>,
    lifespan: LifespanConfig,
    reference_year: i32,
}

impl AlivenessEvaluator {
    /// Builds the default rule chain.
    ///
    /// `reference_year = None` pins the current calendar year at construction.
    pub fn new(lifespan: LifespanConfig, reference_year: Option<i32>) -> Self {
        Self::with_rules(lifespan, reference_year, default_rules())
    }

    /// Builds an evaluator over a caller-supplied rule chain.
    pub fn with_rules(
        lifespan: LifespanConfig,
        reference_year: Option<i32>,
        rules: Vec<Box<dyn AlivenessRule>>,
    ) -> Self {
        Self {
            rules,
            lifespan,
            reference_year: reference_year.unwrap_or_else(current_year),
        }
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Classifies `person` at the evaluator's reference year.
    pub fn evaluate(
        &self,
        store: &dyn GenealogyStore,
        person: &Person,
        years_after_death: u32,
    ) -> StoreResult<Verdict> {
        self.evaluate_at(store, person, self.reference_year, years_after_death)
    }

    /// Classifies `person` at an explicit reference year.
    pub fn evaluate_at(
        &self,
        store: &dyn GenealogyStore,
        person: &Person,
        reference_year: i32,
        years_after_death: u32,
    ) -> StoreResult<Verdict> {
        let raw_store = store.unfiltered();
        // Callers may hold a redacted copy; classify the stored original.
        let original = raw_store.get_person_from_handle(&person.handle)?;
        let subject = original.as_ref().unwrap_or(person);

        let ctx = RuleContext {
            store: raw_store,
            reference_year,
            years_after_death,
            lifespan: &self.lifespan,
        };

        let mut verdict = Verdict {
            aliveness: Aliveness::Unknown,
            decided_by: None,
        };
        for rule in &self.rules {
            if let RuleOutcome::Decided(aliveness) = rule.classify(&ctx, subject)? {
                verdict = Verdict {
                    aliveness,
                    decided_by: Some(rule.name()),
                };
                break;
            }
        }

        debug!(
            "event=aliveness module=alive handle={} verdict={} rule={} reference_year={}",
            subject.handle,
            verdict.aliveness.as_str(),
            verdict.decided_by.unwrap_or("none"),
            reference_year
        );
        Ok(verdict)
    }

    /// Returns whether `person` must be treated as living.
    pub fn is_living(
        &self,
        store: &dyn GenealogyStore,
        person: &Person,
        years_after_death: u32,
    ) -> StoreResult<bool> {
        Ok(self.evaluate(store, person, years_after_death)?.is_living())
    }
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}
