//! Records the privacy layer passes through untouched.

use crate::model::date::Date;
use crate::model::handle::Handle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub ref_handle: Handle,
    pub call_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub handle: Handle,
    pub gramps_id: String,
    pub title: String,
    pub author: String,
    pub reporef_list: Vec<RepoRef>,
    pub note_list: Vec<Handle>,
    pub tag_list: Vec<Handle>,
    pub private: bool,
    pub change: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub handle: Handle,
    pub gramps_id: String,
    pub source_handle: Option<Handle>,
    pub page: String,
    pub date: Date,
    pub note_list: Vec<Handle>,
    pub tag_list: Vec<Handle>,
    pub private: bool,
    pub change: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub handle: Handle,
    pub gramps_id: String,
    pub path: String,
    pub mime: String,
    pub description: String,
    pub citation_list: Vec<Handle>,
    pub note_list: Vec<Handle>,
    pub tag_list: Vec<Handle>,
    pub private: bool,
    pub change: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub handle: Handle,
    pub gramps_id: String,
    pub name: String,
    pub enclosed_by: Vec<Handle>,
    pub citation_list: Vec<Handle>,
    pub note_list: Vec<Handle>,
    pub tag_list: Vec<Handle>,
    pub private: bool,
    pub change: i64,
}

impl Place {
    pub fn new(gramps_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            handle: Handle::generate(),
            gramps_id: gramps_id.into(),
            name: name.into(),
            enclosed_by: Vec::new(),
            citation_list: Vec::new(),
            note_list: Vec::new(),
            tag_list: Vec::new(),
            private: false,
            change: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub handle: Handle,
    pub gramps_id: String,
    pub name: String,
    pub note_list: Vec<Handle>,
    pub tag_list: Vec<Handle>,
    pub private: bool,
    pub change: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub handle: Handle,
    pub gramps_id: String,
    pub text: String,
    pub tag_list: Vec<Handle>,
    pub private: bool,
    pub change: i64,
}

impl Note {
    pub fn new(gramps_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            handle: Handle::generate(),
            gramps_id: gramps_id.into(),
            text: text.into(),
            tag_list: Vec::new(),
            private: false,
            change: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub handle: Handle,
    pub name: String,
    pub color: String,
    pub priority: i32,
    pub change: i64,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::generate(),
            name: name.into(),
            color: "#000000000000".to_string(),
            priority: 0,
            change: 0,
        }
    }
}
