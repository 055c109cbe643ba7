//! Person rules used to select people from a store.
//!
//! # Responsibility
//! - Define the prepare/apply/reset lifecycle shared by person rules.
//! - Provide the simple rules used as inner predicates of aggregating rules.
//!
//! # Invariants
//! - `apply` is only meaningful between a completed `prepare` and `reset`.
//! - `apply` never touches the store.

mod child_of;

pub use child_of::ChildOfFilterMatch;

use crate::model::handle::Handle;
use crate::model::person::Person;
use crate::progress::{ProgressReporter, ScanOutcome};
use crate::store::{GenealogyStore, StoreResult};
use std::collections::HashSet;

/// Predicate over people with an explicit scan lifecycle.
pub trait PersonRule {
    /// Builds whatever state `apply` needs. Simple rules need none.
    fn prepare(
        &mut self,
        _store: &dyn GenealogyStore,
        _progress: &mut dyn ProgressReporter,
    ) -> StoreResult<ScanOutcome> {
        Ok(ScanOutcome::Completed)
    }

    /// Releases state built by `prepare`.
    fn reset(&mut self) {}

    fn apply(&self, person: &Person) -> bool;
}

/// Matches one person by human-assigned ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasIdOf {
    gramps_id: String,
}

impl HasIdOf {
    pub fn new(gramps_id: impl Into<String>) -> Self {
        Self {
            gramps_id: gramps_id.into(),
        }
    }
}

impl PersonRule for HasIdOf {
    fn apply(&self, person: &Person) -> bool {
        person.gramps_id == self.gramps_id
    }
}

/// Matches any surname of the primary name, ignoring case and padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasSurname {
    surname: String,
}

impl HasSurname {
    pub fn new(surname: &str) -> Self {
        Self {
            surname: surname.trim().to_lowercase(),
        }
    }
}

impl PersonRule for HasSurname {
    fn apply(&self, person: &Person) -> bool {
        person
            .primary_name
            .surname_list
            .iter()
            .any(|entry| entry.surname.trim().to_lowercase() == self.surname)
    }
}

/// Matches an explicit handle set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchesHandles {
    handles: HashSet<Handle>,
}

impl MatchesHandles {
    pub fn new(handles: impl IntoIterator<Item = Handle>) -> Self {
        Self {
            handles: handles.into_iter().collect(),
        }
    }
}

impl PersonRule for MatchesHandles {
    fn apply(&self, person: &Person) -> bool {
        self.handles.contains(&person.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::{HasIdOf, HasSurname, MatchesHandles, PersonRule};
    use crate::model::name::{Name, Surname};
    use crate::model::person::Person;

    #[test]
    fn simple_rules_match_expected_people() {
        let mut person = Person::new("I0007", Name::new("Karin", " Lund "));
        person.primary_name.surname_list.push(Surname::new("Ek"));

        assert!(HasIdOf::new("I0007").apply(&person));
        assert!(!HasIdOf::new("I0008").apply(&person));
        assert!(HasSurname::new("lund").apply(&person));
        assert!(HasSurname::new("EK").apply(&person));
        assert!(!HasSurname::new("Berg").apply(&person));
        assert!(MatchesHandles::new([person.handle.clone()]).apply(&person));
        assert!(!MatchesHandles::default().apply(&person));
    }
}
