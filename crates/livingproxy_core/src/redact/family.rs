//! Family redaction driven by the living status of its members.

use crate::config::RedactionMode;
use crate::model::family::{ChildRef, Family};
use crate::model::handle::Handle;
use crate::store::StoreResult;

/// Rewrites families that involve living people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyRedactor {
    mode: RedactionMode,
}

impl FamilyRedactor {
    pub fn new(mode: RedactionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RedactionMode {
        self.mode
    }

    /// Builds the redacted copy of `family`.
    ///
    /// `is_living` answers for one member handle; a handle that resolves to
    /// no person must answer `false`.
    ///
    /// - Exclusion clears living parents and drops living children.
    /// - A living parent clears the family events in every mode.
    /// - `None` stays `None`.
    pub fn redact(
        &self,
        family: Option<&Family>,
        mut is_living: impl FnMut(&Handle) -> StoreResult<bool>,
    ) -> StoreResult<Option<Family>> {
        let Some(family) = family else {
            return Ok(None);
        };
        let excludes = self.mode.excludes();
        let mut parent_is_living = false;

        let mut keep_parent = |handle: &Option<Handle>| -> StoreResult<Option<Handle>> {
            let Some(handle) = handle else {
                return Ok(None);
            };
            if is_living(handle)? {
                parent_is_living = true;
                if excludes {
                    return Ok(None);
                }
            }
            Ok(Some(handle.clone()))
        };
        let father_handle = keep_parent(&family.father_handle)?;
        let mother_handle = keep_parent(&family.mother_handle)?;

        let child_ref_list = if excludes {
            let mut kept: Vec<ChildRef> = Vec::with_capacity(family.child_ref_list.len());
            for child_ref in &family.child_ref_list {
                if !is_living(&child_ref.ref_handle)? {
                    kept.push(child_ref.clone());
                }
            }
            kept
        } else {
            family.child_ref_list.clone()
        };

        let event_ref_list = if parent_is_living {
            Vec::new()
        } else {
            family.event_ref_list.clone()
        };

        Ok(Some(family.rebuilt(
            father_handle,
            mother_handle,
            child_ref_list,
            event_ref_list,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::FamilyRedactor;
    use crate::config::RedactionMode;
    use crate::model::event::EventRef;
    use crate::model::family::{ChildRef, Family};
    use crate::model::handle::Handle;
    use crate::store::StoreResult;

    fn sample_family() -> Family {
        let mut family = Family::new("F0001");
        family.father_handle = Some(Handle::from("dad"));
        family.mother_handle = Some(Handle::from("mum"));
        family.child_ref_list = vec![
            ChildRef::new(Handle::from("kid-old")),
            ChildRef::new(Handle::from("kid-young")),
        ];
        family.event_ref_list = vec![EventRef::primary(Handle::from("wedding"))];
        family
    }

    fn living(names: &'static [&'static str]) -> impl FnMut(&Handle) -> StoreResult<bool> {
        move |handle: &Handle| Ok(names.iter().any(|name| *name == handle.as_str()))
    }

    #[test]
    fn exclusion_clears_living_parents_and_children() {
        let family = sample_family();
        let redacted = FamilyRedactor::new(RedactionMode::ExcludeAll)
            .redact(Some(&family), living(&["mum", "kid-young"]))
            .unwrap()
            .unwrap();

        assert_eq!(redacted.father_handle, Some(Handle::from("dad")));
        assert_eq!(redacted.mother_handle, None);
        let children: Vec<&str> = redacted.child_handles().map(Handle::as_str).collect();
        assert_eq!(children, vec!["kid-old"]);
        assert!(redacted.event_ref_list.is_empty());
        assert_eq!(redacted.gramps_id, family.gramps_id);
        assert_eq!(family.child_ref_list.len(), 2);
    }

    #[test]
    fn restrict_modes_keep_members_but_drop_events() {
        let family = sample_family();
        for mode in [RedactionMode::LastNameOnly, RedactionMode::FullNameOnly] {
            let redacted = FamilyRedactor::new(mode)
                .redact(Some(&family), living(&["dad", "kid-young"]))
                .unwrap()
                .unwrap();
            assert_eq!(redacted.father_handle, family.father_handle);
            assert_eq!(redacted.child_ref_list, family.child_ref_list);
            assert!(redacted.event_ref_list.is_empty());
        }
    }

    #[test]
    fn living_child_alone_keeps_family_events() {
        let family = sample_family();
        let redacted = FamilyRedactor::new(RedactionMode::ExcludeAll)
            .redact(Some(&family), living(&["kid-old"]))
            .unwrap()
            .unwrap();
        assert_eq!(redacted.event_ref_list, family.event_ref_list);
        assert_eq!(redacted.child_ref_list.len(), 1);
    }

    #[test]
    fn absent_family_stays_absent() {
        let redacted = FamilyRedactor::new(RedactionMode::ExcludeAll)
            .redact(None, living(&[]))
            .unwrap();
        assert!(redacted.is_none());
    }
}
