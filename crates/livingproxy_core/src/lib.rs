//! Privacy proxy for genealogical stores.
//! Living people are hidden or redacted on every read path of the wrapped store.

pub mod alive;
pub mod audit;
pub mod config;
pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod progress;
pub mod proxy;
pub mod redact;
pub mod store;

pub use alive::{Aliveness, AlivenessEvaluator, AlivenessRule, RuleOutcome, Verdict};
pub use audit::{find_untrimmed_names, NameAudit, NameField, UntrimmedName};
pub use config::{ConfigError, LifespanConfig, PrivacyConfig, ProxyOptions, RedactionMode};
pub use filter::{ChildOfFilterMatch, HasIdOf, HasSurname, MatchesHandles, PersonRule};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::handle::{Handle, ObjectType};
pub use model::record::Record;
pub use progress::{LogProgress, NoProgress, ProgressControl, ProgressReporter, ScanOutcome};
pub use proxy::{LivingProxy, ProxyTable, ReferenceScan};
pub use redact::{FamilyRedactor, NameRedactor, RestrictMode};
pub use store::sqlite_store::SqliteGenealogyStore;
pub use store::{GenealogyStore, StoreError, StoreResult};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
