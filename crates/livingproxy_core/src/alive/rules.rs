//! Built-in aliveness rules, in evaluation order.

use super::{Aliveness, AlivenessRule, RuleContext, RuleOutcome};
use crate::model::event::EventType;
use crate::model::person::Person;
use crate::store::StoreResult;

/// Default chain: death evidence, then birth evidence, then relatives.
pub fn default_rules() -> Vec<Box<dyn AlivenessRule>> {
    vec![
        Box::new(DeathEventRule),
        Box::new(DeathWithoutDateRule),
        Box::new(BirthAgeRule),
        Box::new(KinEvidenceRule),
    ]
}

/// Decides from a dated death event (or burial/cremation fallback).
///
/// A death inside the years-after-death window still counts as living.
/// A death dated after the reference year is contradictory and yields
/// `Unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeathEventRule;

impl AlivenessRule for DeathEventRule {
    fn name(&self) -> &'static str {
        "death-event"
    }

    fn classify(&self, ctx: &RuleContext<'_>, person: &Person) -> StoreResult<RuleOutcome> {
        let Some(death_year) = ctx.life_years(person)?.death else {
            return Ok(RuleOutcome::Inconclusive);
        };
        if death_year > ctx.reference_year {
            return Ok(RuleOutcome::Decided(Aliveness::Unknown));
        }
        let since_death = i64::from(ctx.reference_year) - i64::from(death_year);
        if ctx.years_after_death > 0 && since_death <= i64::from(ctx.years_after_death) {
            return Ok(RuleOutcome::Decided(Aliveness::Alive));
        }
        Ok(RuleOutcome::Decided(Aliveness::Dead))
    }
}

/// A recorded death without any usable year still means dead.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeathWithoutDateRule;

impl AlivenessRule for DeathWithoutDateRule {
    fn name(&self) -> &'static str {
        "death-without-date"
    }

    fn classify(&self, ctx: &RuleContext<'_>, person: &Person) -> StoreResult<RuleOutcome> {
        let recorded = ctx.own_events(person)?.iter().any(|event| {
            event.event_type == EventType::Death || event.event_type.is_death_fallback()
        });
        if recorded {
            Ok(RuleOutcome::Decided(Aliveness::Dead))
        } else {
            Ok(RuleOutcome::Inconclusive)
        }
    }
}

/// Decides from the birth year (or baptism/christening fallback).
#[derive(Debug, Clone, Copy, Default)]
pub struct BirthAgeRule;

impl AlivenessRule for BirthAgeRule {
    fn name(&self) -> &'static str {
        "birth-age"
    }

    fn classify(&self, ctx: &RuleContext<'_>, person: &Person) -> StoreResult<RuleOutcome> {
        let Some(birth_year) = ctx.life_years(person)?.birth else {
            return Ok(RuleOutcome::Inconclusive);
        };
        if birth_year > ctx.reference_year {
            return Ok(RuleOutcome::Inconclusive);
        }
        let age = i64::from(ctx.reference_year) - i64::from(birth_year);
        if age > ctx.age_limit() {
            Ok(RuleOutcome::Decided(Aliveness::Dead))
        } else {
            Ok(RuleOutcome::Decided(Aliveness::Alive))
        }
    }
}

/// Bounds the person's birth year from parents, siblings, spouses,
/// children and grandchildren. Only ever concludes `Dead`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KinEvidenceRule;

impl KinEvidenceRule {
    /// Latest year the person can plausibly have been born in.
    fn latest_birth_bound(ctx: &RuleContext<'_>, person: &Person) -> StoreResult<Option<i64>> {
        let lifespan = ctx.lifespan;
        let max_generation = i64::from(lifespan.max_generation_years);
        let min_generation = i64::from(lifespan.min_generation_years);
        let sibling_gap = i64::from(lifespan.max_sibling_age_diff);
        let spouse_gap = i64::from(lifespan.max_spouse_age_diff);

        let mut bound: Option<i64> = None;
        let mut tighten = |candidate: i64| {
            bound = Some(bound.map_or(candidate, |current| current.min(candidate)));
        };

        for family_handle in &person.parent_family_list {
            let Some(family) = ctx.store.get_family_from_handle(family_handle)? else {
                continue;
            };
            for parent_handle in family.parent_handles() {
                let Some(parent) = ctx.person(parent_handle)? else {
                    continue;
                };
                let years = ctx.life_years(&parent)?;
                if let Some(birth) = years.birth {
                    tighten(i64::from(birth) + max_generation);
                }
                if let Some(death) = years.death {
                    tighten(i64::from(death) + 1);
                }
            }
            for sibling_handle in family.child_handles() {
                if *sibling_handle == person.handle {
                    continue;
                }
                let Some(sibling) = ctx.person(sibling_handle)? else {
                    continue;
                };
                if let Some(birth) = ctx.life_years(&sibling)?.birth {
                    tighten(i64::from(birth) + sibling_gap);
                }
            }
        }

        for family_handle in &person.family_list {
            let Some(family) = ctx.store.get_family_from_handle(family_handle)? else {
                continue;
            };
            for spouse_handle in family.parent_handles() {
                if *spouse_handle == person.handle {
                    continue;
                }
                let Some(spouse) = ctx.person(spouse_handle)? else {
                    continue;
                };
                if let Some(birth) = ctx.life_years(&spouse)?.birth {
                    tighten(i64::from(birth) + spouse_gap);
                }
            }
            for child_handle in family.child_handles() {
                let Some(child) = ctx.person(child_handle)? else {
                    continue;
                };
                let years = ctx.life_years(&child)?;
                // A child's death year also bounds the child's own birth.
                if let Some(year) = years.birth.or(years.death) {
                    tighten(i64::from(year) - min_generation);
                }
                for grand_family_handle in &child.family_list {
                    let Some(grand_family) = ctx.store.get_family_from_handle(grand_family_handle)?
                    else {
                        continue;
                    };
                    for grandchild_handle in grand_family.child_handles() {
                        let Some(grandchild) = ctx.person(grandchild_handle)? else {
                            continue;
                        };
                        let years = ctx.life_years(&grandchild)?;
                        if let Some(year) = years.birth.or(years.death) {
                            tighten(i64::from(year) - 2 * min_generation);
                        }
                    }
                }
            }
        }

        Ok(bound)
    }
}

impl AlivenessRule for KinEvidenceRule {
    fn name(&self) -> &'static str {
        "kin-evidence"
    }

    fn classify(&self, ctx: &RuleContext<'_>, person: &Person) -> StoreResult<RuleOutcome> {
        let Some(bound) = Self::latest_birth_bound(ctx, person)? else {
            return Ok(RuleOutcome::Inconclusive);
        };
        if i64::from(ctx.reference_year) - bound > ctx.age_limit() {
            Ok(RuleOutcome::Decided(Aliveness::Dead))
        } else {
            Ok(RuleOutcome::Inconclusive)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BirthAgeRule, DeathEventRule, KinEvidenceRule};
    use crate::alive::{Aliveness, AlivenessEvaluator, AlivenessRule, RuleContext, RuleOutcome};
    use crate::config::LifespanConfig;
    use crate::db::open_db_in_memory;
    use crate::model::date::Date;
    use crate::model::event::{Event, EventRef, EventType};
    use crate::model::family::{ChildRef, Family};
    use crate::model::name::Name;
    use crate::model::person::Person;
    use crate::store::sqlite_store::SqliteGenealogyStore;

    fn person_with_event(
        store: &SqliteGenealogyStore<'_>,
        id: &str,
        event: Option<(EventType, Date)>,
    ) -> Person {
        let mut person = Person::new(id, Name::new("Given", "Family"));
        if let Some((kind, date)) = event {
            let event = Event::new(format!("E-{id}"), kind, date);
            person
                .event_ref_list
                .push(EventRef::primary(store.commit(event).unwrap()));
        }
        store.commit(person.clone()).unwrap();
        person
    }

    fn ctx<'a>(
        store: &'a SqliteGenealogyStore<'_>,
        lifespan: &'a LifespanConfig,
        years_after_death: u32,
    ) -> RuleContext<'a> {
        RuleContext {
            store,
            reference_year: 2024,
            years_after_death,
            lifespan,
        }
    }

    #[test]
    fn death_event_respects_window_and_future_dates() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteGenealogyStore::try_new(&conn).unwrap();
        let lifespan = LifespanConfig::default();
        let recent = person_with_event(
            &store,
            "I1",
            Some((EventType::Death, Date::from_year(2010))),
        );
        let future = person_with_event(
            &store,
            "I2",
            Some((EventType::Burial, Date::from_year(2030))),
        );

        let outcome = DeathEventRule.classify(&ctx(&store, &lifespan, 20), &recent);
        assert_eq!(outcome.unwrap(), RuleOutcome::Decided(Aliveness::Alive));
        let outcome = DeathEventRule.classify(&ctx(&store, &lifespan, 14), &recent);
        assert_eq!(outcome.unwrap(), RuleOutcome::Decided(Aliveness::Alive));
        let outcome = DeathEventRule.classify(&ctx(&store, &lifespan, 13), &recent);
        assert_eq!(outcome.unwrap(), RuleOutcome::Decided(Aliveness::Dead));
        let outcome = DeathEventRule.classify(&ctx(&store, &lifespan, 0), &future);
        assert_eq!(outcome.unwrap(), RuleOutcome::Decided(Aliveness::Unknown));
    }

    #[test]
    fn birth_age_uses_baptism_fallback() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteGenealogyStore::try_new(&conn).unwrap();
        let lifespan = LifespanConfig::default();
        let baptised = person_with_event(
            &store,
            "I1",
            Some((EventType::Baptism, Date::from_year(1900))),
        );
        let unborn = person_with_event(
            &store,
            "I2",
            Some((EventType::Birth, Date::from_year(2050))),
        );

        let outcome = BirthAgeRule.classify(&ctx(&store, &lifespan, 0), &baptised);
        assert_eq!(outcome.unwrap(), RuleOutcome::Decided(Aliveness::Dead));
        let outcome = BirthAgeRule.classify(&ctx(&store, &lifespan, 20), &baptised);
        assert_eq!(outcome.unwrap(), RuleOutcome::Decided(Aliveness::Alive));
        let outcome = BirthAgeRule.classify(&ctx(&store, &lifespan, 0), &unborn);
        assert_eq!(outcome.unwrap(), RuleOutcome::Inconclusive);
    }

    #[test]
    fn kin_evidence_dates_person_through_grandchild() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteGenealogyStore::try_new(&conn).unwrap();
        let lifespan = LifespanConfig::default();

        let mut elder = Person::new("I1", Name::new("Elder", "Line"));
        let mut child = Person::new("I2", Name::new("Middle", "Line"));
        let grandchild = person_with_event(
            &store,
            "I3",
            Some((EventType::Birth, Date::from_year(1880))),
        );

        let mut upper = Family::new("F1");
        upper.father_handle = Some(elder.handle.clone());
        upper.child_ref_list.push(ChildRef::new(child.handle.clone()));
        let mut lower = Family::new("F2");
        lower.father_handle = Some(child.handle.clone());
        lower
            .child_ref_list
            .push(ChildRef::new(grandchild.handle.clone()));

        elder.family_list.push(upper.handle.clone());
        child.parent_family_list.push(upper.handle.clone());
        child.family_list.push(lower.handle.clone());
        store.commit(upper).unwrap();
        store.commit(lower).unwrap();
        store.commit(elder.clone()).unwrap();
        store.commit(child.clone()).unwrap();

        // 1880 - 26 = 1854 at the latest; 2024 - 1854 = 170 > 110.
        let outcome = KinEvidenceRule.classify(&ctx(&store, &lifespan, 0), &elder);
        assert_eq!(outcome.unwrap(), RuleOutcome::Decided(Aliveness::Dead));

        let evaluator = AlivenessEvaluator::new(lifespan.clone(), Some(2024));
        let verdict = evaluator.evaluate(&store, &elder, 0).unwrap();
        assert_eq!(verdict.decided_by, Some("kin-evidence"));

        let loner = person_with_event(&store, "I4", None);
        let verdict = evaluator.evaluate(&store, &loner, 0).unwrap();
        assert_eq!(verdict.aliveness, Aliveness::Unknown);
        assert!(verdict.is_living());
        assert_eq!(verdict.decided_by, None);
    }
}
