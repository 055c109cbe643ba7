//! Person names and surnames.
//!
//! # Invariants
//! - Surname order is meaningful (display and sort keys follow it).
//! - At most one surname should be flagged `primary`; when none is, the
//!   first surname is treated as primary.

use serde::{Deserialize, Serialize};

/// How a surname was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameOriginType {
    #[default]
    Unknown,
    Inherited,
    Given,
    Taken,
    Patronymic,
    Matronymic,
    Feudal,
    Pseudonym,
    Patrilineal,
    Matrilineal,
    Occupation,
    Location,
}

impl NameOriginType {
    /// Surnames built from a parent's given name.
    pub fn is_parent_derived(self) -> bool {
        matches!(self, Self::Patronymic | Self::Matronymic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameType {
    Unknown,
    #[default]
    Birth,
    Married,
    AlsoKnownAs,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Surname {
    pub surname: String,
    pub prefix: String,
    pub connector: String,
    pub primary: bool,
    pub origin_type: NameOriginType,
}

impl Surname {
    pub fn new(surname: impl Into<String>) -> Self {
        Self {
            surname: surname.into(),
            primary: true,
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, origin_type: NameOriginType) -> Self {
        self.origin_type = origin_type;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Name {
    pub first_name: String,
    pub call_name: String,
    pub nick_name: String,
    pub surname_list: Vec<Surname>,
    pub title: String,
    pub suffix: String,
    pub name_type: NameType,
    /// Grouping override used by surname indexes; empty means "use surname".
    pub group_as: String,
    /// Name-format code used for sorting; 0 means the default format.
    pub sort_as: i32,
    /// Name-format code used for display; 0 means the default format.
    pub display_as: i32,
}

impl Name {
    pub fn new(first_name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            surname_list: vec![Surname::new(surname)],
            ..Self::default()
        }
    }

    /// Returns the primary surname, falling back to the first entry.
    pub fn primary_surname(&self) -> Option<&Surname> {
        self.surname_list
            .iter()
            .find(|surname| surname.primary)
            .or_else(|| self.surname_list.first())
    }

    /// `Surname, Given` rendering used by listings.
    pub fn display(&self) -> String {
        let surname = self
            .primary_surname()
            .map(|value| value.surname.as_str())
            .unwrap_or("");
        match (surname.is_empty(), self.first_name.is_empty()) {
            (true, _) => self.first_name.clone(),
            (false, true) => surname.to_string(),
            (false, false) => format!("{surname}, {}", self.first_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Name, NameOriginType, Surname};

    #[test]
    fn primary_surname_falls_back_to_first_entry() {
        let mut name = Name::new("Anna", "Berg");
        name.surname_list[0].primary = false;
        name.surname_list
            .push(Surname::new("Olsdotter").with_origin(NameOriginType::Matronymic));
        name.surname_list[1].primary = false;
        assert_eq!(name.primary_surname().unwrap().surname, "Berg");

        name.surname_list[1].primary = true;
        assert_eq!(name.primary_surname().unwrap().surname, "Olsdotter");
    }

    #[test]
    fn display_handles_missing_parts() {
        assert_eq!(Name::new("Anna", "Berg").display(), "Berg, Anna");
        assert_eq!(Name::new("", "Berg").display(), "Berg");
        assert_eq!(Name::new("Anna", "").display(), "Anna");
    }
}
