//! Person record.
//!
//! # Invariants
//! - `handle` and `gramps_id` identify the same person for its lifetime.
//! - `family_list` lists families where the person is a parent/spouse;
//!   `parent_family_list` lists families where the person is a child.

use crate::model::event::EventRef;
use crate::model::handle::Handle;
use crate::model::name::Name;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub handle: Handle,
    pub gramps_id: String,
    pub primary_name: Name,
    pub alternate_names: Vec<Name>,
    pub gender: Gender,
    pub event_ref_list: Vec<EventRef>,
    pub family_list: Vec<Handle>,
    pub parent_family_list: Vec<Handle>,
    pub citation_list: Vec<Handle>,
    pub note_list: Vec<Handle>,
    pub media_list: Vec<Handle>,
    pub tag_list: Vec<Handle>,
    pub private: bool,
    /// Unix epoch seconds of the last change.
    pub change: i64,
}

impl Person {
    /// Creates a person with a generated handle and empty relations.
    pub fn new(gramps_id: impl Into<String>, primary_name: Name) -> Self {
        Self::with_handle(Handle::generate(), gramps_id, primary_name)
    }

    pub fn with_handle(handle: Handle, gramps_id: impl Into<String>, primary_name: Name) -> Self {
        Self {
            handle,
            gramps_id: gramps_id.into(),
            primary_name,
            alternate_names: Vec::new(),
            gender: Gender::Unknown,
            event_ref_list: Vec::new(),
            family_list: Vec::new(),
            parent_family_list: Vec::new(),
            citation_list: Vec::new(),
            note_list: Vec::new(),
            media_list: Vec::new(),
            tag_list: Vec::new(),
            private: false,
            change: 0,
        }
    }

    /// Builds the detached copy handed out for a living person.
    ///
    /// Only structural fields survive; everything describing the person's
    /// life (events, sources, notes, media, other names) is dropped.
    pub fn restricted(&self, primary_name: Name) -> Self {
        Self {
            handle: self.handle.clone(),
            gramps_id: self.gramps_id.clone(),
            primary_name,
            alternate_names: Vec::new(),
            gender: self.gender,
            event_ref_list: Vec::new(),
            family_list: self.family_list.clone(),
            parent_family_list: self.parent_family_list.clone(),
            citation_list: Vec::new(),
            note_list: Vec::new(),
            media_list: Vec::new(),
            tag_list: self.tag_list.clone(),
            private: self.private,
            change: self.change,
        }
    }
}
