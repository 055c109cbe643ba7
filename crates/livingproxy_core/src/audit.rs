//! Read-only audit for names with leading or trailing whitespace.
//!
//! # Responsibility
//! - Sweep places and people and report padded name fields.
//!
//! # Invariants
//! - The audit never writes; fixing findings is the caller's business.
//! - A cancelled audit reports no findings.

use crate::model::handle::{Handle, ObjectType};
use crate::progress::{ProgressControl, ProgressReporter, ScanOutcome};
use crate::store::{GenealogyStore, StoreResult};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

static PADDED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s|\s$").expect("valid padding regex"));

const AUDIT_LABEL: &str = "untrimmed_names";

/// Name field that carries padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    PlaceName,
    FirstName,
    Surname,
}

impl NameField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlaceName => "place_name",
            Self::FirstName => "first_name",
            Self::Surname => "surname",
        }
    }
}

/// One record with at least one padded name field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntrimmedName {
    pub kind: ObjectType,
    pub handle: Handle,
    pub gramps_id: String,
    pub fields: Vec<NameField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAudit {
    pub outcome: ScanOutcome,
    pub findings: Vec<UntrimmedName>,
}

fn is_padded(value: &str) -> bool {
    PADDED_RE.is_match(value)
}

/// Lists places and people whose names start or end with whitespace.
///
/// Places are reported before people, each in store order. Only the primary
/// surname of a person is checked.
pub fn find_untrimmed_names(
    store: &dyn GenealogyStore,
    progress: &mut dyn ProgressReporter,
) -> StoreResult<NameAudit> {
    let total = store.get_number_of_records(ObjectType::Place)? + store.get_number_of_people()?;
    progress.begin(AUDIT_LABEL, total);
    let result = sweep(store, progress);
    progress.end();

    let audit = match result? {
        Some(findings) => NameAudit {
            outcome: ScanOutcome::Completed,
            findings,
        },
        None => NameAudit {
            outcome: ScanOutcome::Cancelled,
            findings: Vec::new(),
        },
    };
    info!(
        "event=name_audit module=audit status={} scanned={} findings={}",
        audit.outcome.as_str(),
        total,
        audit.findings.len()
    );
    Ok(audit)
}

fn sweep(
    store: &dyn GenealogyStore,
    progress: &mut dyn ProgressReporter,
) -> StoreResult<Option<Vec<UntrimmedName>>> {
    let mut findings = Vec::new();

    for item in store.iter_places()? {
        if progress.step() == ProgressControl::Cancel {
            return Ok(None);
        }
        let place = item?;
        if is_padded(&place.name) {
            findings.push(UntrimmedName {
                kind: ObjectType::Place,
                handle: place.handle,
                gramps_id: place.gramps_id,
                fields: vec![NameField::PlaceName],
            });
        }
    }

    for item in store.iter_people()? {
        if progress.step() == ProgressControl::Cancel {
            return Ok(None);
        }
        let person = item?;
        let name = &person.primary_name;
        let mut fields = Vec::new();
        if is_padded(&name.first_name) {
            fields.push(NameField::FirstName);
        }
        if name
            .primary_surname()
            .is_some_and(|surname| is_padded(&surname.surname))
        {
            fields.push(NameField::Surname);
        }
        if !fields.is_empty() {
            findings.push(UntrimmedName {
                kind: ObjectType::Person,
                handle: person.handle,
                gramps_id: person.gramps_id,
                fields,
            });
        }
    }

    Ok(Some(findings))
}

#[cfg(test)]
mod tests {
    use super::{find_untrimmed_names, is_padded, NameField};
    use crate::db::open_db_in_memory;
    use crate::model::handle::ObjectType;
    use crate::model::name::Name;
    use crate::model::person::Person;
    use crate::model::secondary::Place;
    use crate::progress::{NoProgress, StepBudget};
    use crate::store::sqlite_store::SqliteGenealogyStore;

    #[test]
    fn padding_detection_ignores_inner_spaces() {
        assert!(is_padded(" Oslo"));
        assert!(is_padded("Oslo\t"));
        assert!(!is_padded("Den Haag"));
        assert!(!is_padded(""));
    }

    #[test]
    fn reports_places_then_people() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteGenealogyStore::try_new(&conn).unwrap();
        store.commit(Place::new("P1", "Bergen")).unwrap();
        store.commit(Place::new("P2", "Tromsø ")).unwrap();
        store
            .commit(Person::new("I1", Name::new("Ola ", " Nordmann")))
            .unwrap();
        store
            .commit(Person::new("I2", Name::new("Kari", "Nordmann")))
            .unwrap();

        let audit = find_untrimmed_names(&store, &mut NoProgress).unwrap();
        assert!(audit.outcome.is_completed());
        assert_eq!(audit.findings.len(), 2);
        assert_eq!(audit.findings[0].kind, ObjectType::Place);
        assert_eq!(audit.findings[0].gramps_id, "P2");
        assert_eq!(audit.findings[1].gramps_id, "I1");
        assert_eq!(
            audit.findings[1].fields,
            vec![NameField::FirstName, NameField::Surname]
        );

        let mut budget = StepBudget::new(1);
        let cancelled = find_untrimmed_names(&store, &mut budget).unwrap();
        assert!(!cancelled.outcome.is_completed());
        assert!(cancelled.findings.is_empty());
        assert_eq!(budget.ended, 1);
    }

    #[test]
    fn cancel_is_observed_before_the_next_row_is_decoded() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteGenealogyStore::try_new(&conn).unwrap();
        conn.execute(
            "INSERT INTO place (handle, gramps_id, body, change) VALUES ('bad', 'P9', '{', 0);",
            [],
        )
        .unwrap();

        let mut budget = StepBudget::new(0);
        let cancelled = find_untrimmed_names(&store, &mut budget).unwrap();
        assert!(!cancelled.outcome.is_completed());
        assert_eq!((budget.stepped, budget.ended), (1, 1));

        assert!(find_untrimmed_names(&store, &mut NoProgress).is_err());
    }
}
