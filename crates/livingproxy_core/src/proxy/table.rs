//! Per-type dispatch table used by type-agnostic traversals.

use crate::model::handle::{Handle, ObjectType};
use crate::model::record::Record;
use crate::store::{GenealogyStore, RecordCursor, StoreResult};

pub type LookupByHandle = fn(&dyn GenealogyStore, &Handle) -> StoreResult<Option<Record>>;
pub type LookupByGrampsId = fn(&dyn GenealogyStore, &str) -> StoreResult<Option<Record>>;
pub type OpenCursor = for<'a> fn(&'a dyn GenealogyStore) -> StoreResult<RecordCursor<'a>>;
pub type ListHandles = fn(&dyn GenealogyStore) -> StoreResult<Vec<Handle>>;

/// Capabilities of one record type, bound to the typed store accessors.
#[derive(Clone, Copy)]
pub struct TypeEntry {
    pub kind: ObjectType,
    pub by_handle: LookupByHandle,
    pub by_gramps_id: LookupByGrampsId,
    pub cursor: OpenCursor,
    pub handles: ListHandles,
}

impl std::fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeEntry").field("kind", &self.kind).finish()
    }
}

macro_rules! type_entry {
    (@build $kind:ident, $by_handle:ident, $by_gramps_id:expr, $iter:ident, $handles:ident) => {
        TypeEntry {
            kind: ObjectType::$kind,
            by_handle: |store, handle| Ok(store.$by_handle(handle)?.map(Record::from)),
            by_gramps_id: $by_gramps_id,
            cursor: |store| {
                let cursor = store.$iter()?;
                Ok(Box::new(cursor.map(|item| item.map(Record::from))))
            },
            handles: |store| store.$handles(),
        }
    };
    ($kind:ident, $by_handle:ident, $by_id:ident, $iter:ident, $handles:ident) => {
        type_entry!(@build $kind, $by_handle,
            |store, gramps_id| Ok(store.$by_id(gramps_id)?.map(Record::from)),
            $iter, $handles)
    };
    ($kind:ident, $by_handle:ident, $iter:ident, $handles:ident) => {
        type_entry!(@build $kind, $by_handle, no_gramps_id, $iter, $handles)
    };
}

fn no_gramps_id(_store: &dyn GenealogyStore, _gramps_id: &str) -> StoreResult<Option<Record>> {
    Ok(None)
}

/// Immutable mapping from [`ObjectType`] to its [`TypeEntry`].
#[derive(Debug, Clone)]
pub struct ProxyTable {
    entries: [TypeEntry; 10],
}

impl Default for ProxyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyTable {
    pub fn new() -> Self {
        // Order follows `ObjectType::ALL`.
        Self {
            entries: [
                type_entry!(
                    Person,
                    get_person_from_handle,
                    get_person_from_gramps_id,
                    iter_people,
                    get_person_handles
                ),
                type_entry!(
                    Family,
                    get_family_from_handle,
                    get_family_from_gramps_id,
                    iter_families,
                    get_family_handles
                ),
                type_entry!(
                    Source,
                    get_source_from_handle,
                    get_source_from_gramps_id,
                    iter_sources,
                    get_source_handles
                ),
                type_entry!(
                    Citation,
                    get_citation_from_handle,
                    get_citation_from_gramps_id,
                    iter_citations,
                    get_citation_handles
                ),
                type_entry!(
                    Event,
                    get_event_from_handle,
                    get_event_from_gramps_id,
                    iter_events,
                    get_event_handles
                ),
                type_entry!(
                    Media,
                    get_media_from_handle,
                    get_media_from_gramps_id,
                    iter_media,
                    get_media_handles
                ),
                type_entry!(
                    Place,
                    get_place_from_handle,
                    get_place_from_gramps_id,
                    iter_places,
                    get_place_handles
                ),
                type_entry!(
                    Repository,
                    get_repository_from_handle,
                    get_repository_from_gramps_id,
                    iter_repositories,
                    get_repository_handles
                ),
                type_entry!(
                    Note,
                    get_note_from_handle,
                    get_note_from_gramps_id,
                    iter_notes,
                    get_note_handles
                ),
                type_entry!(Tag, get_tag_from_handle, iter_tags, get_tag_handles),
            ],
        }
    }

    pub fn entry(&self, kind: ObjectType) -> &TypeEntry {
        &self.entries[kind.index()]
    }

    pub fn entries(&self) -> impl Iterator<Item = &TypeEntry> {
        self.entries.iter()
    }
}
