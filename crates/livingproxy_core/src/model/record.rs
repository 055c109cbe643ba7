//! Type-erased record wrapper used by generic store paths.
//!
//! # Responsibility
//! - Let storage, dispatch and backlink code handle any record uniformly.
//! - Enumerate the outgoing handle references of every record kind.
//!
//! # Invariants
//! - `Record::object_type()` always matches the wrapped variant.
//! - `references()` lists every handle the record points at, so the
//!   backlink index stays complete.

use crate::model::event::Event;
use crate::model::family::Family;
use crate::model::handle::{Handle, ObjectType};
use crate::model::person::Person;
use crate::model::secondary::{Citation, Media, Note, Place, Repository, Source, Tag};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Record {
    Person(Person),
    Family(Family),
    Source(Source),
    Citation(Citation),
    Event(Event),
    Media(Media),
    Place(Place),
    Repository(Repository),
    Note(Note),
    Tag(Tag),
}

impl Record {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Person(_) => ObjectType::Person,
            Self::Family(_) => ObjectType::Family,
            Self::Source(_) => ObjectType::Source,
            Self::Citation(_) => ObjectType::Citation,
            Self::Event(_) => ObjectType::Event,
            Self::Media(_) => ObjectType::Media,
            Self::Place(_) => ObjectType::Place,
            Self::Repository(_) => ObjectType::Repository,
            Self::Note(_) => ObjectType::Note,
            Self::Tag(_) => ObjectType::Tag,
        }
    }

    pub fn handle(&self) -> &Handle {
        match self {
            Self::Person(value) => &value.handle,
            Self::Family(value) => &value.handle,
            Self::Source(value) => &value.handle,
            Self::Citation(value) => &value.handle,
            Self::Event(value) => &value.handle,
            Self::Media(value) => &value.handle,
            Self::Place(value) => &value.handle,
            Self::Repository(value) => &value.handle,
            Self::Note(value) => &value.handle,
            Self::Tag(value) => &value.handle,
        }
    }

    /// Human-assigned ID. Tags have none.
    pub fn gramps_id(&self) -> Option<&str> {
        match self {
            Self::Person(value) => Some(&value.gramps_id),
            Self::Family(value) => Some(&value.gramps_id),
            Self::Source(value) => Some(&value.gramps_id),
            Self::Citation(value) => Some(&value.gramps_id),
            Self::Event(value) => Some(&value.gramps_id),
            Self::Media(value) => Some(&value.gramps_id),
            Self::Place(value) => Some(&value.gramps_id),
            Self::Repository(value) => Some(&value.gramps_id),
            Self::Note(value) => Some(&value.gramps_id),
            Self::Tag(_) => None,
        }
    }

    pub fn change(&self) -> i64 {
        match self {
            Self::Person(value) => value.change,
            Self::Family(value) => value.change,
            Self::Source(value) => value.change,
            Self::Citation(value) => value.change,
            Self::Event(value) => value.change,
            Self::Media(value) => value.change,
            Self::Place(value) => value.change,
            Self::Repository(value) => value.change,
            Self::Note(value) => value.change,
            Self::Tag(value) => value.change,
        }
    }

    /// Outgoing `(target type, target handle)` references, deduplicated.
    pub fn references(&self) -> Vec<(ObjectType, Handle)> {
        let mut refs = Vec::new();
        match self {
            Self::Person(person) => {
                push_all(
                    &mut refs,
                    ObjectType::Event,
                    person.event_ref_list.iter().map(|r| &r.ref_handle),
                );
                push_all(&mut refs, ObjectType::Family, &person.family_list);
                push_all(&mut refs, ObjectType::Family, &person.parent_family_list);
                push_all(&mut refs, ObjectType::Citation, &person.citation_list);
                push_all(&mut refs, ObjectType::Note, &person.note_list);
                push_all(&mut refs, ObjectType::Media, &person.media_list);
                push_all(&mut refs, ObjectType::Tag, &person.tag_list);
            }
            Self::Family(family) => {
                push_all(&mut refs, ObjectType::Person, family.parent_handles());
                push_all(&mut refs, ObjectType::Person, family.child_handles());
                push_all(
                    &mut refs,
                    ObjectType::Event,
                    family.event_ref_list.iter().map(|r| &r.ref_handle),
                );
                push_all(&mut refs, ObjectType::Citation, &family.citation_list);
                push_all(&mut refs, ObjectType::Note, &family.note_list);
                push_all(&mut refs, ObjectType::Tag, &family.tag_list);
            }
            Self::Source(source) => {
                push_all(
                    &mut refs,
                    ObjectType::Repository,
                    source.reporef_list.iter().map(|r| &r.ref_handle),
                );
                push_all(&mut refs, ObjectType::Note, &source.note_list);
                push_all(&mut refs, ObjectType::Tag, &source.tag_list);
            }
            Self::Citation(citation) => {
                push_all(&mut refs, ObjectType::Source, &citation.source_handle);
                push_all(&mut refs, ObjectType::Note, &citation.note_list);
                push_all(&mut refs, ObjectType::Tag, &citation.tag_list);
            }
            Self::Event(event) => {
                push_all(&mut refs, ObjectType::Place, &event.place);
                push_all(&mut refs, ObjectType::Citation, &event.citation_list);
                push_all(&mut refs, ObjectType::Note, &event.note_list);
                push_all(&mut refs, ObjectType::Tag, &event.tag_list);
            }
            Self::Media(media) => {
                push_all(&mut refs, ObjectType::Citation, &media.citation_list);
                push_all(&mut refs, ObjectType::Note, &media.note_list);
                push_all(&mut refs, ObjectType::Tag, &media.tag_list);
            }
            Self::Place(place) => {
                push_all(&mut refs, ObjectType::Place, &place.enclosed_by);
                push_all(&mut refs, ObjectType::Citation, &place.citation_list);
                push_all(&mut refs, ObjectType::Note, &place.note_list);
                push_all(&mut refs, ObjectType::Tag, &place.tag_list);
            }
            Self::Repository(repository) => {
                push_all(&mut refs, ObjectType::Note, &repository.note_list);
                push_all(&mut refs, ObjectType::Tag, &repository.tag_list);
            }
            Self::Note(note) => {
                push_all(&mut refs, ObjectType::Tag, &note.tag_list);
            }
            Self::Tag(_) => {}
        }
        refs
    }

    /// Serializes the wrapped record body (without the variant tag).
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Self::Person(value) => serde_json::to_string(value),
            Self::Family(value) => serde_json::to_string(value),
            Self::Source(value) => serde_json::to_string(value),
            Self::Citation(value) => serde_json::to_string(value),
            Self::Event(value) => serde_json::to_string(value),
            Self::Media(value) => serde_json::to_string(value),
            Self::Place(value) => serde_json::to_string(value),
            Self::Repository(value) => serde_json::to_string(value),
            Self::Note(value) => serde_json::to_string(value),
            Self::Tag(value) => serde_json::to_string(value),
        }
    }

    /// Decodes a record body stored for `kind`.
    pub fn from_json(kind: ObjectType, body: &str) -> serde_json::Result<Self> {
        Ok(match kind {
            ObjectType::Person => Self::Person(serde_json::from_str(body)?),
            ObjectType::Family => Self::Family(serde_json::from_str(body)?),
            ObjectType::Source => Self::Source(serde_json::from_str(body)?),
            ObjectType::Citation => Self::Citation(serde_json::from_str(body)?),
            ObjectType::Event => Self::Event(serde_json::from_str(body)?),
            ObjectType::Media => Self::Media(serde_json::from_str(body)?),
            ObjectType::Place => Self::Place(serde_json::from_str(body)?),
            ObjectType::Repository => Self::Repository(serde_json::from_str(body)?),
            ObjectType::Note => Self::Note(serde_json::from_str(body)?),
            ObjectType::Tag => Self::Tag(serde_json::from_str(body)?),
        })
    }
}

fn push_all<'a>(
    refs: &mut Vec<(ObjectType, Handle)>,
    kind: ObjectType,
    handles: impl IntoIterator<Item = &'a Handle>,
) {
    for handle in handles {
        let entry = (kind, handle.clone());
        if !handle.is_empty() && !refs.contains(&entry) {
            refs.push(entry);
        }
    }
}

macro_rules! record_conversions {
    ($($variant:ident => $into:ident),* $(,)?) => {
        $(
            impl From<$variant> for Record {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )*

        impl Record {
            $(
                pub fn $into(self) -> Option<$variant> {
                    match self {
                        Self::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            )*
        }
    };
}

record_conversions! {
    Person => into_person,
    Family => into_family,
    Source => into_source,
    Citation => into_citation,
    Event => into_event,
    Media => into_media,
    Place => into_place,
    Repository => into_repository,
    Note => into_note,
    Tag => into_tag,
}
