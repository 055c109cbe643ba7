//! Family record.
//!
//! # Invariants
//! - `child_ref_list` order is the display order of children.
//! - A family may legitimately have no parents and no children.

use crate::model::event::EventRef;
use crate::model::handle::Handle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildRelation {
    #[default]
    Birth,
    Adopted,
    Stepchild,
    Foster,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyRelType {
    Married,
    Unmarried,
    CivilUnion,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRef {
    pub ref_handle: Handle,
    pub father_relation: ChildRelation,
    pub mother_relation: ChildRelation,
    pub private: bool,
}

impl ChildRef {
    pub fn new(ref_handle: Handle) -> Self {
        Self {
            ref_handle,
            father_relation: ChildRelation::Birth,
            mother_relation: ChildRelation::Birth,
            private: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub handle: Handle,
    pub gramps_id: String,
    pub father_handle: Option<Handle>,
    pub mother_handle: Option<Handle>,
    pub child_ref_list: Vec<ChildRef>,
    pub event_ref_list: Vec<EventRef>,
    pub relationship: FamilyRelType,
    pub citation_list: Vec<Handle>,
    pub note_list: Vec<Handle>,
    pub tag_list: Vec<Handle>,
    pub private: bool,
    /// Unix epoch seconds of the last change.
    pub change: i64,
}

impl Family {
    pub fn new(gramps_id: impl Into<String>) -> Self {
        Self {
            handle: Handle::generate(),
            gramps_id: gramps_id.into(),
            father_handle: None,
            mother_handle: None,
            child_ref_list: Vec::new(),
            event_ref_list: Vec::new(),
            relationship: FamilyRelType::Unknown,
            citation_list: Vec::new(),
            note_list: Vec::new(),
            tag_list: Vec::new(),
            private: false,
            change: 0,
        }
    }

    /// Parent handles that are set, father first.
    pub fn parent_handles(&self) -> impl Iterator<Item = &Handle> {
        self.father_handle.iter().chain(self.mother_handle.iter())
    }

    pub fn child_handles(&self) -> impl Iterator<Item = &Handle> {
        self.child_ref_list.iter().map(|child| &child.ref_handle)
    }

    /// Builds a detached copy with the given membership and event list.
    ///
    /// Every other field is carried over unchanged.
    pub fn rebuilt(
        &self,
        father_handle: Option<Handle>,
        mother_handle: Option<Handle>,
        child_ref_list: Vec<ChildRef>,
        event_ref_list: Vec<EventRef>,
    ) -> Self {
        Self {
            handle: self.handle.clone(),
            gramps_id: self.gramps_id.clone(),
            father_handle,
            mother_handle,
            child_ref_list,
            event_ref_list,
            relationship: self.relationship,
            citation_list: self.citation_list.clone(),
            note_list: self.note_list.clone(),
            tag_list: self.tag_list.clone(),
            private: self.private,
            change: self.change,
        }
    }
}
