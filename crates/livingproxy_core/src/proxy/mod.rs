//! Living-people privacy proxy over a genealogy store.
//!
//! # Responsibility
//! - Present the full [`GenealogyStore`] read contract with living people
//!   hidden or redacted on every access path.
//! - Rewrite families so the visible graph never points at a hidden person.
//!
//! # Invariants
//! - Under exclusion, a living person is unreachable through handle lookup,
//!   ID lookup, iteration, handle listing, backlink search, the default
//!   person and family membership.
//! - Families are rewritten, never suppressed.
//! - Classification always reads the raw store, so stacked proxies produce
//!   the same output as a single proxy.
//! - The wrapped store is never written to.

mod table;

pub use table::{ProxyTable, TypeEntry};

use crate::alive::AlivenessEvaluator;
use crate::config::{ConfigError, PrivacyConfig, ProxyOptions, RedactionMode};
use crate::model::family::Family;
use crate::model::handle::{Handle, ObjectType};
use crate::model::person::Person;
use crate::model::record::Record;
use crate::progress::{ProgressControl, ProgressReporter, ScanOutcome};
use crate::redact::{FamilyRedactor, NameRedactor, RestrictMode};
use crate::store::{GenealogyStore, RecordCursor, StoreResult};
use log::{debug, info, warn};

/// Result of a full reference sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceScan {
    pub outcome: ScanOutcome,
    /// Referencing records; empty when the sweep was cancelled.
    pub links: Vec<(ObjectType, Handle)>,
}

/// Read-only view of `S` that hides or redacts living people.
pub struct LivingProxy<S> {
    db: S,
    mode: RedactionMode,
    years_after_death: u32,
    evaluator: AlivenessEvaluator,
    names: NameRedactor,
    families: FamilyRedactor,
    table: ProxyTable,
}

impl<S: GenealogyStore> LivingProxy<S> {
    /// Wraps `db` after validating `config`.
    ///
    /// Without a fixed reference year the current year is pinned here, so
    /// one proxy answers consistently for its whole lifetime.
    pub fn try_new(
        db: S,
        options: ProxyOptions,
        config: PrivacyConfig,
    ) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            warn!("event=proxy_init module=proxy status=rejected error={err}");
            return Err(err);
        }
        let evaluator = AlivenessEvaluator::new(config.lifespan.clone(), options.reference_year);
        info!(
            "event=proxy_init module=proxy status=ok mode={} reference_year={} years_after_death={}",
            options.mode,
            evaluator.reference_year(),
            options.years_after_death
        );
        Ok(Self {
            db,
            mode: options.mode,
            years_after_death: options.years_after_death,
            evaluator,
            names: NameRedactor::from_config(&config),
            families: FamilyRedactor::new(options.mode),
            table: ProxyTable::new(),
        })
    }

    pub fn mode(&self) -> RedactionMode {
        self.mode
    }

    pub fn reference_year(&self) -> i32 {
        self.evaluator.reference_year()
    }

    pub fn years_after_death(&self) -> u32 {
        self.years_after_death
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.db
    }

    pub fn table(&self) -> &ProxyTable {
        &self.table
    }

    pub fn into_inner(self) -> S {
        self.db
    }

    /// Whether `person` is treated as living by this proxy.
    pub fn is_living(&self, person: &Person) -> StoreResult<bool> {
        self.evaluator
            .is_living(&self.db, person, self.years_after_death)
    }

    /// `false` only for a living person under exclusion.
    ///
    /// Unknown handles are included; they resolve to nothing anyway.
    pub fn include_person(&self, handle: &Handle) -> StoreResult<bool> {
        if !self.mode.excludes() {
            return Ok(true);
        }
        Ok(!self.is_living_handle(handle)?)
    }

    pub fn has_person_handle(&self, handle: &Handle) -> StoreResult<bool> {
        Ok(self.get_person_from_handle(handle)?.is_some())
    }

    /// Slow-path backlink search sweeping every record type through the
    /// dispatch table, as seen through this proxy.
    ///
    /// Reports one progress step per visited record; a cancel request
    /// discards everything found so far.
    pub fn scan_references(
        &self,
        target: &Handle,
        include: Option<&[ObjectType]>,
        progress: &mut dyn ProgressReporter,
    ) -> StoreResult<ReferenceScan> {
        let entries: Vec<&TypeEntry> = self
            .table
            .entries()
            .filter(|entry| include.map_or(true, |kinds| kinds.contains(&entry.kind)))
            .collect();

        let mut total = 0;
        for entry in &entries {
            total += (entry.handles)(self)?.len();
        }

        progress.begin("scan_references", total);
        let result = self.sweep_references(target, &entries, progress);
        progress.end();

        let scan = match result? {
            Some(links) => ReferenceScan {
                outcome: ScanOutcome::Completed,
                links,
            },
            None => ReferenceScan {
                outcome: ScanOutcome::Cancelled,
                links: Vec::new(),
            },
        };
        debug!(
            "event=reference_scan module=proxy status={} target={} links={}",
            scan.outcome.as_str(),
            target,
            scan.links.len()
        );
        Ok(scan)
    }

    fn sweep_references(
        &self,
        target: &Handle,
        entries: &[&TypeEntry],
        progress: &mut dyn ProgressReporter,
    ) -> StoreResult<Option<Vec<(ObjectType, Handle)>>> {
        let mut links = Vec::new();
        for entry in entries {
            for item in (entry.cursor)(self)? {
                if progress.step() == ProgressControl::Cancel {
                    return Ok(None);
                }
                let record = item?;
                if record
                    .references()
                    .iter()
                    .any(|(_, handle)| handle == target)
                {
                    links.push((entry.kind, record.handle().clone()));
                }
            }
        }
        Ok(Some(links))
    }

    fn raw_person(&self, handle: &Handle) -> StoreResult<Option<Person>> {
        self.db.unfiltered().get_person_from_handle(handle)
    }

    /// Dangling member handles count as not living.
    fn is_living_handle(&self, handle: &Handle) -> StoreResult<bool> {
        match self.raw_person(handle)? {
            Some(person) => self.is_living(&person),
            None => Ok(false),
        }
    }

    fn present_person(&self, person: Person) -> StoreResult<Option<Person>> {
        if !self.is_living(&person)? {
            return Ok(Some(person));
        }
        match RestrictMode::from_mode(self.mode) {
            None => {
                debug!(
                    "event=person_hidden module=proxy status=excluded handle={}",
                    person.handle
                );
                Ok(None)
            }
            Some(restrict) => {
                let name = self.names.redact(&person.primary_name, restrict);
                Ok(Some(person.restricted(name)))
            }
        }
    }

    fn present_family(&self, family: Option<Family>) -> StoreResult<Option<Family>> {
        self.families
            .redact(family.as_ref(), |handle| self.is_living_handle(handle))
    }

    fn present_record(&self, record: Option<Record>) -> StoreResult<Option<Record>> {
        match record {
            Some(Record::Person(person)) => Ok(self.present_person(person)?.map(Record::Person)),
            Some(Record::Family(family)) => {
                Ok(self.present_family(Some(family))?.map(Record::Family))
            }
            other => Ok(other),
        }
    }
}

impl<S: GenealogyStore> GenealogyStore for LivingProxy<S> {
    fn get_record(&self, kind: ObjectType, handle: &Handle) -> StoreResult<Option<Record>> {
        self.present_record(self.db.get_record(kind, handle)?)
    }

    fn get_record_from_gramps_id(
        &self,
        kind: ObjectType,
        gramps_id: &str,
    ) -> StoreResult<Option<Record>> {
        self.present_record(self.db.get_record_from_gramps_id(kind, gramps_id)?)
    }

    fn record_handles(&self, kind: ObjectType) -> StoreResult<Vec<Handle>> {
        let handles = self.db.record_handles(kind)?;
        if kind != ObjectType::Person || !self.mode.excludes() {
            return Ok(handles);
        }
        let mut visible = Vec::with_capacity(handles.len());
        for handle in handles {
            if self.include_person(&handle)? {
                visible.push(handle);
            }
        }
        Ok(visible)
    }

    fn iter_records(&self, kind: ObjectType) -> StoreResult<RecordCursor<'_>> {
        let cursor = self.db.iter_records(kind)?;
        if !matches!(kind, ObjectType::Person | ObjectType::Family) {
            return Ok(cursor);
        }
        // Excluded people are skipped, not replaced by placeholders.
        Ok(Box::new(cursor.filter_map(move |item| match item {
            Ok(record) => self.present_record(Some(record)).transpose(),
            Err(err) => Some(Err(err)),
        })))
    }

    fn find_backlink_handles(
        &self,
        handle: &Handle,
        include: Option<&[ObjectType]>,
    ) -> StoreResult<Vec<(ObjectType, Handle)>> {
        if !self.include_person(handle)? {
            return Ok(Vec::new());
        }
        let mut links = Vec::new();
        for (kind, source) in self.db.find_backlink_handles(handle, include)? {
            // Redaction may drop the link itself, not only the source record.
            let presented = (self.table.entry(kind).by_handle)(self, &source)?;
            let still_links = presented.is_some_and(|record| {
                record
                    .references()
                    .iter()
                    .any(|(_, target)| target == handle)
            });
            if still_links {
                links.push((kind, source));
            }
        }
        Ok(links)
    }

    fn get_default_handle(&self) -> StoreResult<Option<Handle>> {
        match self.db.get_default_handle()? {
            Some(handle) if self.has_person_handle(&handle)? => Ok(Some(handle)),
            _ => Ok(None),
        }
    }

    fn unfiltered(&self) -> &dyn GenealogyStore {
        self.db.unfiltered()
    }
}

#[cfg(test)]
mod tests {
    use super::LivingProxy;
    use crate::config::{PrivacyConfig, ProxyOptions, RedactionMode};
    use crate::db::open_db_in_memory;
    use crate::model::date::Date;
    use crate::model::event::{Event, EventRef, EventType};
    use crate::model::handle::ObjectType;
    use crate::model::name::Name;
    use crate::model::person::Person;
    use crate::progress::{NoProgress, StepBudget};
    use crate::store::sqlite_store::SqliteGenealogyStore;
    use crate::store::GenealogyStore;

    fn born(store: &SqliteGenealogyStore<'_>, id: &str, year: i32) -> Person {
        let birth = Event::new(format!("E{id}"), EventType::Birth, Date::from_year(year));
        let mut person = Person::new(id, Name::new("Given", "Family"));
        person
            .event_ref_list
            .push(EventRef::primary(store.commit(birth).unwrap()));
        store.commit(person.clone()).unwrap();
        person
    }

    #[test]
    fn exclusion_hides_living_person_from_lookups_and_listings() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteGenealogyStore::try_new(&conn).unwrap();
        let old = born(&store, "I1", 1850);
        let young = born(&store, "I2", 1990);
        store.set_default_person(&young.handle).unwrap();

        let proxy = LivingProxy::try_new(
            &store,
            ProxyOptions::new(RedactionMode::ExcludeAll).with_reference_year(2024),
            PrivacyConfig::default(),
        )
        .unwrap();

        assert!(proxy.get_person_from_handle(&old.handle).unwrap().is_some());
        assert!(proxy.get_person_from_handle(&young.handle).unwrap().is_none());
        assert!(proxy.get_person_from_gramps_id("I2").unwrap().is_none());
        assert_eq!(proxy.get_person_handles().unwrap(), vec![old.handle.clone()]);
        assert_eq!(proxy.get_number_of_people().unwrap(), 1);
        assert!(!proxy.include_person(&young.handle).unwrap());
        assert!(proxy.get_default_handle().unwrap().is_none());
        assert!(proxy.get_default_person().unwrap().is_none());
    }

    #[test]
    fn restrict_mode_keeps_person_with_redacted_name() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteGenealogyStore::try_new(&conn).unwrap();
        let young = born(&store, "I1", 1990);

        let proxy = LivingProxy::try_new(
            &store,
            ProxyOptions::new(RedactionMode::LastNameOnly).with_reference_year(2024),
            PrivacyConfig::default(),
        )
        .unwrap();
        let shown = proxy
            .get_person_from_handle(&young.handle)
            .unwrap()
            .expect("restricted person stays visible");
        assert_eq!(shown.primary_name.first_name, "[Living]");
        assert!(shown.event_ref_list.is_empty());
        assert!(proxy.include_person(&young.handle).unwrap());
        assert_eq!(proxy.get_number_of_people().unwrap(), 1);
    }

    #[test]
    fn reference_sweep_matches_index_and_honors_cancel() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteGenealogyStore::try_new(&conn).unwrap();
        let old = born(&store, "I1", 1850);
        let birth = old.event_ref_list[0].ref_handle.clone();

        let proxy = LivingProxy::try_new(
            &store,
            ProxyOptions::new(RedactionMode::ExcludeAll).with_reference_year(2024),
            PrivacyConfig::default(),
        )
        .unwrap();
        let scan = proxy
            .scan_references(&birth, None, &mut NoProgress)
            .unwrap();
        assert!(scan.outcome.is_completed());
        assert_eq!(scan.links, vec![(ObjectType::Person, old.handle.clone())]);
        assert_eq!(
            scan.links,
            proxy.find_backlink_handles(&birth, None).unwrap()
        );

        let mut budget = StepBudget::new(0);
        let cancelled = proxy.scan_references(&birth, None, &mut budget).unwrap();
        assert!(!cancelled.outcome.is_completed());
        assert!(cancelled.links.is_empty());
        assert_eq!((budget.begun, budget.ended), (1, 1));
    }
}
