//! Name redaction for living people shown in a restrict mode.

use crate::config::{PrivacyConfig, RedactionMode};
use crate::model::name::{Name, Surname};

/// Redaction modes that still show the person.
///
/// Exclusion never reaches the name redactor, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictMode {
    LastNameOnly,
    FullNameOnly,
}

impl RestrictMode {
    /// Maps a proxy mode to its restrict mode; `None` for exclusion.
    pub fn from_mode(mode: RedactionMode) -> Option<Self> {
        match mode {
            RedactionMode::ExcludeAll => None,
            RedactionMode::LastNameOnly => Some(Self::LastNameOnly),
            RedactionMode::FullNameOnly => Some(Self::FullNameOnly),
        }
    }
}

/// Replaces identifying name parts with configured placeholder texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRedactor {
    given_text: String,
    surname_text: String,
}

impl NameRedactor {
    pub fn new(given_text: impl Into<String>, surname_text: impl Into<String>) -> Self {
        Self {
            given_text: given_text.into(),
            surname_text: surname_text.into(),
        }
    }

    pub fn from_config(config: &PrivacyConfig) -> Self {
        Self::new(
            config.private_given_text.clone(),
            config.private_surname_text.clone(),
        )
    }

    /// Builds the redacted copy of `name`.
    ///
    /// | field                    | last-name-only | full-name-only |
    /// |--------------------------|----------------|----------------|
    /// | first name               | placeholder    | kept           |
    /// | title, suffix            | cleared        | kept           |
    /// | call name, nick name     | cleared        | cleared        |
    /// | patronymic/matronymic    | placeholder    | placeholder    |
    /// | other surnames           | kept           | kept           |
    /// | type, group/sort/display | kept           | kept           |
    pub fn redact(&self, name: &Name, mode: RestrictMode) -> Name {
        let (first_name, title, suffix) = match mode {
            RestrictMode::LastNameOnly => (self.given_text.clone(), String::new(), String::new()),
            RestrictMode::FullNameOnly => (
                name.first_name.clone(),
                name.title.clone(),
                name.suffix.clone(),
            ),
        };

        Name {
            first_name,
            call_name: String::new(),
            nick_name: String::new(),
            surname_list: name
                .surname_list
                .iter()
                .map(|surname| self.redact_surname(surname))
                .collect(),
            title,
            suffix,
            name_type: name.name_type,
            group_as: name.group_as.clone(),
            sort_as: name.sort_as,
            display_as: name.display_as,
        }
    }

    fn redact_surname(&self, surname: &Surname) -> Surname {
        let mut copy = surname.clone();
        if surname.origin_type.is_parent_derived() {
            copy.surname = self.surname_text.clone();
        }
        copy
    }
}
