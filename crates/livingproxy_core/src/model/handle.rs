//! Record identity: opaque handles and record type tags.
//!
//! # Responsibility
//! - Define the stable handle used for every internal cross-reference.
//! - Define the type tag shared by storage tables, backlinks and dispatch.
//!
//! # Invariants
//! - A handle is never reused for another record.
//! - `ObjectType::as_str` values are persisted and must stay stable.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque stable identifier for one record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Wraps an existing handle value (import and storage read paths).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh handle.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Handle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Handle {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Handle {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Type tag for the ten primary record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Person,
    Family,
    Source,
    Citation,
    Event,
    Media,
    Place,
    Repository,
    Note,
    Tag,
}

impl ObjectType {
    /// Every record type, in dispatch-table order.
    pub const ALL: [ObjectType; 10] = [
        ObjectType::Person,
        ObjectType::Family,
        ObjectType::Source,
        ObjectType::Citation,
        ObjectType::Event,
        ObjectType::Media,
        ObjectType::Place,
        ObjectType::Repository,
        ObjectType::Note,
        ObjectType::Tag,
    ];

    /// Stable class name used in the `reference` table.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Family => "Family",
            Self::Source => "Source",
            Self::Citation => "Citation",
            Self::Event => "Event",
            Self::Media => "Media",
            Self::Place => "Place",
            Self::Repository => "Repository",
            Self::Note => "Note",
            Self::Tag => "Tag",
        }
    }

    /// Position inside `ObjectType::ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Tags have no human-assigned ID.
    pub fn has_gramps_id(self) -> bool {
        !matches!(self, Self::Tag)
    }
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a persisted class name is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownObjectType(pub String);

impl Display for UnknownObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown object type `{}`", self.0)
    }
}

impl Error for UnknownObjectType {}

impl std::str::FromStr for ObjectType {
    type Err = UnknownObjectType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ObjectType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownObjectType(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, ObjectType};

    #[test]
    fn generated_handles_are_unique_and_non_empty() {
        let first = Handle::generate();
        let second = Handle::generate();
        assert!(!first.is_empty());
        assert_ne!(first, second);
    }

    #[test]
    fn object_type_names_parse_back() {
        for kind in ObjectType::ALL {
            assert_eq!(kind.as_str().parse::<ObjectType>().unwrap(), kind);
            assert_eq!(ObjectType::ALL[kind.index()], kind);
        }
        assert!("Atom".parse::<ObjectType>().is_err());
    }
}
