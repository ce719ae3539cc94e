//! Deterministic exercise selection for a workout focus.
//!
//! Selection walks the focus blueprint slot by slot:
//! 1. Build candidates: pattern + muscle match, then pattern only, then any
//!    exercise in the equipment pool
//! 2. Rotate candidates by the day-seed (a cyclic shift, never a shuffle)
//! 3. Take the first unused candidate, then try the alternate pattern, then
//!    reuse the first rotated candidate
//! 4. Top up from the whole equipment pool until `max_items` is reached
//!
//! Identical inputs always produce identical output.

use crate::blueprint::{blueprint_for, Blueprint, Slot, TOP_UP_SCHEME};
use crate::catalog::ExerciseFilter;
use crate::{
    Catalog, Equipment, Exercise, ExerciseId, Modality, MovementPattern, SlotRole, Suggestion,
    WorkoutType,
};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// Number of suggestions returned when the caller has no preference
pub const DEFAULT_MAX_ITEMS: usize = 4;

/// `NaiveDate::num_days_from_ce` of 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Day-seed for a calendar date: days since 1970-01-01
pub fn day_seed(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}

/// Suggest up to `max_items` exercises for `focus`
///
/// An empty `equipment_pool` means every kind of equipment. `day_seed` only
/// rotates candidate order; it never introduces randomness.
pub fn suggest_exercises_for_focus(
    catalog: &Catalog,
    focus: WorkoutType,
    equipment_pool: &[Equipment],
    max_items: usize,
    day_seed: i64,
) -> Vec<Suggestion> {
    tracing::info!(
        "Suggesting up to {} exercises for {:?} (seed {})",
        max_items,
        focus,
        day_seed
    );
    suggest_from_blueprint(
        catalog,
        &blueprint_for(focus),
        equipment_pool,
        max_items,
        day_seed,
    )
}

/// Same as `suggest_exercises_for_focus`, for an explicit blueprint
pub fn suggest_from_blueprint(
    catalog: &Catalog,
    blueprint: &Blueprint,
    equipment_pool: &[Equipment],
    max_items: usize,
    day_seed: i64,
) -> Vec<Suggestion> {
    let pool = effective_pool(equipment_pool);
    let mut used: HashSet<ExerciseId> = HashSet::new();
    let mut suggestions = Vec::with_capacity(max_items);

    for (index, slot) in blueprint.slots().enumerate() {
        if suggestions.len() >= max_items {
            break;
        }

        let role = if index == 0 {
            SlotRole::Main
        } else {
            SlotRole::Accessory
        };

        match pick_for_slot(catalog, slot, &pool, &used, day_seed) {
            Some(exercise) => {
                tracing::debug!(
                    "Slot {} ({:?}) -> {} [{}]",
                    index,
                    slot.pattern,
                    exercise.name,
                    exercise.id
                );
                used.insert(exercise.id);
                suggestions.push(Suggestion {
                    exercise: exercise.clone(),
                    role,
                    scheme: slot.scheme,
                });
            }
            None => {
                tracing::debug!("Slot {} ({:?}) has no candidates, skipping", index, slot.pattern);
            }
        }
    }

    if suggestions.len() < max_items {
        let mut broad = catalog.list_exercises(&pool_filter(&pool));
        rotate(&mut broad, day_seed);

        for exercise in broad {
            if suggestions.len() >= max_items {
                break;
            }
            if used.insert(exercise.id) {
                tracing::debug!("Top-up -> {} [{}]", exercise.name, exercise.id);
                suggestions.push(Suggestion {
                    exercise: exercise.clone(),
                    role: SlotRole::TopUp,
                    scheme: TOP_UP_SCHEME,
                });
            }
        }
    }

    suggestions.truncate(max_items);
    tracing::info!("Selected {} exercises", suggestions.len());
    suggestions
}

fn effective_pool(equipment_pool: &[Equipment]) -> Vec<Equipment> {
    if equipment_pool.is_empty() {
        Equipment::ALL.to_vec()
    } else {
        equipment_pool.to_vec()
    }
}

fn pool_filter(pool: &[Equipment]) -> ExerciseFilter {
    ExerciseFilter {
        equipment: pool.to_vec(),
        modality: Some(Modality::Strength),
        ..Default::default()
    }
}

/// Candidates for a slot, most specific match first
fn slot_candidates<'a>(catalog: &'a Catalog, slot: &Slot, pool: &[Equipment]) -> Vec<&'a Exercise> {
    let base = pool_filter(pool);

    let targeted = if slot.pattern == MovementPattern::None {
        catalog.list_exercises(&ExerciseFilter {
            muscles: slot.muscles.to_vec(),
            ..base.clone()
        })
    } else {
        let by_pattern_and_muscle = catalog.list_exercises(&ExerciseFilter {
            pattern: Some(slot.pattern),
            muscles: slot.muscles.to_vec(),
            ..base.clone()
        });
        if by_pattern_and_muscle.is_empty() {
            catalog.list_exercises(&ExerciseFilter {
                pattern: Some(slot.pattern),
                ..base.clone()
            })
        } else {
            by_pattern_and_muscle
        }
    };

    if targeted.is_empty() {
        tracing::debug!("No targeted match for {:?}, using equipment pool", slot.pattern);
        catalog.list_exercises(&base)
    } else {
        targeted
    }
}

fn pick_for_slot<'a>(
    catalog: &'a Catalog,
    slot: &Slot,
    pool: &[Equipment],
    used: &HashSet<ExerciseId>,
    day_seed: i64,
) -> Option<&'a Exercise> {
    let mut candidates = slot_candidates(catalog, slot, pool);
    if candidates.is_empty() {
        return None;
    }
    rotate(&mut candidates, day_seed);

    if let Some(fresh) = first_unused(&candidates, used) {
        return Some(fresh);
    }

    if let Some(alternate) = slot.pattern.alternate() {
        let mut alternates = catalog.list_exercises(&ExerciseFilter {
            pattern: Some(alternate),
            ..pool_filter(pool)
        });
        rotate(&mut alternates, day_seed);
        if let Some(fresh) = first_unused(&alternates, used) {
            tracing::debug!("Used alternate pattern {:?} for {:?}", alternate, slot.pattern);
            return Some(fresh);
        }
    }

    // Everything is taken; repeat rather than leave the slot empty
    candidates.first().copied()
}

fn first_unused<'a>(candidates: &[&'a Exercise], used: &HashSet<ExerciseId>) -> Option<&'a Exercise> {
    candidates.iter().find(|e| !used.contains(&e.id)).copied()
}

/// Cyclic left shift by `|seed| mod len`
fn rotate<T>(items: &mut [T], seed: i64) {
    if items.is_empty() {
        return;
    }
    let shift = (seed.unsigned_abs() % items.len() as u64) as usize;
    items.rotate_left(shift);
}
