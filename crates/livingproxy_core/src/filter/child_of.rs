//! "Children of filter match" aggregation.

use super::PersonRule;
use crate::model::handle::Handle;
use crate::model::person::Person;
use crate::progress::{ProgressControl, ProgressReporter, ScanOutcome};
use crate::store::{GenealogyStore, StoreResult};
use log::debug;
use std::collections::HashSet;

const SCAN_LABEL: &str = "children_of_filter_match";

/// Matches every child of a person matched by `inner`.
///
/// `prepare` runs one full people scan, asking `inner` about each person
/// and collecting the children of every family the match is a parent in.
/// `apply` is then a set lookup.
#[derive(Debug)]
pub struct ChildOfFilterMatch<R> {
    inner: R,
    children: HashSet<Handle>,
}

impl<R: PersonRule> ChildOfFilterMatch<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            children: HashSet::new(),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Number of collected child handles.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn scan(
        &mut self,
        store: &dyn GenealogyStore,
        progress: &mut dyn ProgressReporter,
    ) -> StoreResult<ScanOutcome> {
        let total = store.get_number_of_people()?;
        progress.begin(SCAN_LABEL, total);
        let outcome = self.collect_children(store, progress);
        progress.end();
        outcome
    }

    fn collect_children(
        &mut self,
        store: &dyn GenealogyStore,
        progress: &mut dyn ProgressReporter,
    ) -> StoreResult<ScanOutcome> {
        for item in store.iter_people()? {
            if progress.step() == ProgressControl::Cancel {
                return Ok(ScanOutcome::Cancelled);
            }
            let person = item?;
            if !self.inner.apply(&person) {
                continue;
            }
            for family_handle in &person.family_list {
                if let Some(family) = store.get_family_from_handle(family_handle)? {
                    self.children.extend(family.child_handles().cloned());
                }
            }
        }
        Ok(ScanOutcome::Completed)
    }
}

impl<R: PersonRule> PersonRule for ChildOfFilterMatch<R> {
    /// Runs the inner rule's lifecycle around one full scan.
    ///
    /// The inner rule is reset on every exit path. Anything other than a
    /// completed scan leaves the collected set empty.
    fn prepare(
        &mut self,
        store: &dyn GenealogyStore,
        progress: &mut dyn ProgressReporter,
    ) -> StoreResult<ScanOutcome> {
        self.children.clear();
        let outcome = match self.inner.prepare(store, progress) {
            Ok(ScanOutcome::Completed) => self.scan(store, progress),
            other => other,
        };
        self.inner.reset();

        match &outcome {
            Ok(ScanOutcome::Completed) => debug!(
                "event=subfilter_scan module=filter status=completed children={}",
                self.children.len()
            ),
            Ok(ScanOutcome::Cancelled) => {
                self.children.clear();
                debug!("event=subfilter_scan module=filter status=cancelled");
            }
            Err(err) => {
                self.children.clear();
                debug!("event=subfilter_scan module=filter status=error error={err}");
            }
        }
        outcome
    }

    fn reset(&mut self) {
        self.children.clear();
    }

    fn apply(&self, person: &Person) -> bool {
        self.children.contains(&person.handle)
    }
}
