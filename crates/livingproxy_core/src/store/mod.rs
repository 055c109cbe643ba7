//! Read contract of a genealogy store.
//!
//! # Responsibility
//! - Define the type-generic read operations every store provides.
//! - Derive the per-type convenience API (`get_person_from_handle`,
//!   `iter_families`, ...) from the generic operations, so wrappers that
//!   override the generic paths automatically cover every typed path.
//!
//! # Invariants
//! - Missing records resolve to `Ok(None)`, never to an error.
//! - Structural failures (corrupt rows, broken bodies) are errors and are
//!   propagated unchanged.
//! - `unfiltered()` returns the bottom-most raw store; wrappers delegate.

use crate::db::DbError;
use crate::model::event::Event;
use crate::model::family::Family;
use crate::model::handle::{Handle, ObjectType};
use crate::model::person::Person;
use crate::model::record::Record;
use crate::model::secondary::{Citation, Media, Note, Place, Repository, Source, Tag};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Lazily produced sequence of records of one type.
pub type RecordCursor<'a> = Box<dyn Iterator<Item = StoreResult<Record>> + 'a>;

/// Lazily produced sequence of typed records.
pub type TypedCursor<'a, T> = Box<dyn Iterator<Item = StoreResult<T>> + 'a>;

/// Store-level error for record reads and writes.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Persisted record body could not be encoded or decoded.
    Serialization(serde_json::Error),
    /// Persisted state violates a structural invariant.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "invalid record body: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

fn wrong_kind(expected: ObjectType, record: &Record) -> StoreError {
    StoreError::InvalidData(format!(
        "expected {expected} record, got {} `{}`",
        record.object_type(),
        record.handle()
    ))
}

macro_rules! typed_accessors {
    (
        $ty:ident,
        handle: $by_handle:ident,
        $(id: $by_id:ident,)?
        handles: $handles:ident,
        iter: $iter:ident
    ) => {
        fn $by_handle(&self, handle: &Handle) -> StoreResult<Option<$ty>> {
            match self.get_record(ObjectType::$ty, handle)? {
                Some(Record::$ty(value)) => Ok(Some(value)),
                Some(other) => Err(wrong_kind(ObjectType::$ty, &other)),
                None => Ok(None),
            }
        }

        $(
            fn $by_id(&self, gramps_id: &str) -> StoreResult<Option<$ty>> {
                match self.get_record_from_gramps_id(ObjectType::$ty, gramps_id)? {
                    Some(Record::$ty(value)) => Ok(Some(value)),
                    Some(other) => Err(wrong_kind(ObjectType::$ty, &other)),
                    None => Ok(None),
                }
            }
        )?

        fn $handles(&self) -> StoreResult<Vec<Handle>> {
            self.record_handles(ObjectType::$ty)
        }

        fn $iter(&self) -> StoreResult<TypedCursor<'_, $ty>> {
            let cursor = self.iter_records(ObjectType::$ty)?;
            Ok(Box::new(cursor.map(
                |item: StoreResult<Record>| -> StoreResult<$ty> {
                    match item? {
                        Record::$ty(value) => Ok(value),
                        other => Err(wrong_kind(ObjectType::$ty, &other)),
                    }
                },
            )))
        }
    };
}

/// Read contract shared by raw stores and privacy proxies.
///
/// The required methods are type-generic; the typed convenience methods are
/// provided in terms of them and should not be overridden.
pub trait GenealogyStore {
    /// Looks up one record by handle.
    fn get_record(&self, kind: ObjectType, handle: &Handle) -> StoreResult<Option<Record>>;

    /// Looks up one record by its human-assigned ID. Always `None` for tags.
    fn get_record_from_gramps_id(
        &self,
        kind: ObjectType,
        gramps_id: &str,
    ) -> StoreResult<Option<Record>>;

    /// Lists all handles of one type in stable storage order.
    fn record_handles(&self, kind: ObjectType) -> StoreResult<Vec<Handle>>;

    /// Sequential cursor over all records of one type.
    fn iter_records(&self, kind: ObjectType) -> StoreResult<RecordCursor<'_>>;

    /// Returns `(type, handle)` of every record that references `handle`.
    ///
    /// `include` restricts the result to the listed record types.
    fn find_backlink_handles(
        &self,
        handle: &Handle,
        include: Option<&[ObjectType]>,
    ) -> StoreResult<Vec<(ObjectType, Handle)>>;

    /// Handle of the home person, if one is set.
    fn get_default_handle(&self) -> StoreResult<Option<Handle>>;

    /// Bottom-most raw store underneath any wrappers.
    fn unfiltered(&self) -> &dyn GenealogyStore;

    fn has_handle(&self, kind: ObjectType, handle: &Handle) -> StoreResult<bool> {
        Ok(self.get_record(kind, handle)?.is_some())
    }

    fn get_number_of_records(&self, kind: ObjectType) -> StoreResult<usize> {
        Ok(self.record_handles(kind)?.len())
    }

    fn get_number_of_people(&self) -> StoreResult<usize> {
        self.get_number_of_records(ObjectType::Person)
    }

    fn get_default_person(&self) -> StoreResult<Option<Person>> {
        match self.get_default_handle()? {
            Some(handle) => self.get_person_from_handle(&handle),
            None => Ok(None),
        }
    }

    typed_accessors!(Person,
        handle: get_person_from_handle,
        id: get_person_from_gramps_id,
        handles: get_person_handles,
        iter: iter_people);
    typed_accessors!(Family,
        handle: get_family_from_handle,
        id: get_family_from_gramps_id,
        handles: get_family_handles,
        iter: iter_families);
    typed_accessors!(Source,
        handle: get_source_from_handle,
        id: get_source_from_gramps_id,
        handles: get_source_handles,
        iter: iter_sources);
    typed_accessors!(Citation,
        handle: get_citation_from_handle,
        id: get_citation_from_gramps_id,
        handles: get_citation_handles,
        iter: iter_citations);
    typed_accessors!(Event,
        handle: get_event_from_handle,
        id: get_event_from_gramps_id,
        handles: get_event_handles,
        iter: iter_events);
    typed_accessors!(Media,
        handle: get_media_from_handle,
        id: get_media_from_gramps_id,
        handles: get_media_handles,
        iter: iter_media);
    typed_accessors!(Place,
        handle: get_place_from_handle,
        id: get_place_from_gramps_id,
        handles: get_place_handles,
        iter: iter_places);
    typed_accessors!(Repository,
        handle: get_repository_from_handle,
        id: get_repository_from_gramps_id,
        handles: get_repository_handles,
        iter: iter_repositories);
    typed_accessors!(Note,
        handle: get_note_from_handle,
        id: get_note_from_gramps_id,
        handles: get_note_handles,
        iter: iter_notes);
    typed_accessors!(Tag,
        handle: get_tag_from_handle,
        handles: get_tag_handles,
        iter: iter_tags);
}

impl<T: GenealogyStore + ?Sized> GenealogyStore for &T {
    fn get_record(&self, kind: ObjectType, handle: &Handle) -> StoreResult<Option<Record>> {
        (**self).get_record(kind, handle)
    }

    fn get_record_from_gramps_id(
        &self,
        kind: ObjectType,
        gramps_id: &str,
    ) -> StoreResult<Option<Record>> {
        (**self).get_record_from_gramps_id(kind, gramps_id)
    }

    fn record_handles(&self, kind: ObjectType) -> StoreResult<Vec<Handle>> {
        (**self).record_handles(kind)
    }

    fn iter_records(&self, kind: ObjectType) -> StoreResult<RecordCursor<'_>> {
        (**self).iter_records(kind)
    }

    fn find_backlink_handles(
        &self,
        handle: &Handle,
        include: Option<&[ObjectType]>,
    ) -> StoreResult<Vec<(ObjectType, Handle)>> {
        (**self).find_backlink_handles(handle, include)
    }

    fn get_default_handle(&self) -> StoreResult<Option<Handle>> {
        (**self).get_default_handle()
    }

    fn unfiltered(&self) -> &dyn GenealogyStore {
        (**self).unfiltered()
    }
}
