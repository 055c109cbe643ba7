//! Events and the references people/families hold to them.

use crate::model::date::Date;
use crate::model::handle::Handle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Birth,
    Baptism,
    Christening,
    Death,
    Burial,
    Cremation,
    CauseOfDeath,
    Marriage,
    Divorce,
    Residence,
    Occupation,
    Custom(String),
}

impl EventType {
    /// Events that substitute for a missing birth event.
    pub fn is_birth_fallback(&self) -> bool {
        matches!(self, Self::Baptism | Self::Christening)
    }

    /// Events that substitute for a missing death event.
    pub fn is_death_fallback(&self) -> bool {
        matches!(self, Self::Burial | Self::Cremation | Self::CauseOfDeath)
    }
}

/// Role a person or family plays in a referenced event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventRoleType {
    #[default]
    Primary,
    Family,
    Witness,
    Informant,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRef {
    pub ref_handle: Handle,
    pub role: EventRoleType,
    pub private: bool,
}

impl EventRef {
    pub fn primary(ref_handle: Handle) -> Self {
        Self {
            ref_handle,
            role: EventRoleType::Primary,
            private: false,
        }
    }

    pub fn with_role(ref_handle: Handle, role: EventRoleType) -> Self {
        Self {
            ref_handle,
            role,
            private: false,
        }
    }

    /// Primary and family roles describe the holder's own event.
    pub fn is_own_event(&self) -> bool {
        matches!(self.role, EventRoleType::Primary | EventRoleType::Family)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub handle: Handle,
    pub gramps_id: String,
    pub event_type: EventType,
    pub date: Date,
    pub place: Option<Handle>,
    pub description: String,
    pub citation_list: Vec<Handle>,
    pub note_list: Vec<Handle>,
    pub tag_list: Vec<Handle>,
    pub private: bool,
    /// Unix epoch seconds of the last change.
    pub change: i64,
}

impl Event {
    pub fn new(gramps_id: impl Into<String>, event_type: EventType, date: Date) -> Self {
        Self {
            handle: Handle::generate(),
            gramps_id: gramps_id.into(),
            event_type,
            date,
            place: None,
            description: String::new(),
            citation_list: Vec::new(),
            note_list: Vec::new(),
            tag_list: Vec::new(),
            private: false,
            change: 0,
        }
    }
}
