//! Personal-record detection and next-session load suggestions.
//!
//! A successful weighted set is compared against history for the same
//! exercise + equipment:
//! - Hard PR: weight beats the best weight previously lifted at the same reps
//! - Soft PR: Epley estimate beats the best previous estimate at any reps
//!
//! Callers must serialize evaluation per exercise; two interleaved logs could
//! both read the same stale best and both claim a PR.

use crate::estimation::estimate_one_rep_max;
use crate::history::{RecordStore, SetHistory};
use crate::set_log::SetSink;
use crate::{
    Equipment, ExerciseId, LoggedSet, PersonalRecord, PrCelebrationEvent, RecordKey, RecordType,
    Result,
};
use chrono::{DateTime, Utc};

/// Flat linear progression applied to the last successful weight
pub const LOAD_INCREMENT: f64 = 1.02;

/// Result of a PR check: the event to show and the records to upsert
#[derive(Clone, Debug, PartialEq)]
pub struct PrEvaluation {
    pub event: PrCelebrationEvent,
    pub records: Vec<PersonalRecord>,
}

/// Previous best: the larger of what history shows and what is stored
fn previous_best<S: RecordStore>(
    store: &S,
    key: RecordKey,
    from_history: Option<f64>,
) -> Result<Option<f64>> {
    let stored = store.current_record(&key)?.map(|r| r.value_kg);
    Ok(match (from_history, stored) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    })
}

fn beats(new: f64, previous: Option<f64>) -> bool {
    previous.map_or(true, |prev| new > prev)
}

/// Decide whether a set is a PR without writing anything
///
/// The set being evaluated must not already be in `store`'s history.
pub fn evaluate_pr<S: SetHistory + RecordStore>(
    store: &S,
    exercise_id: ExerciseId,
    equipment: Equipment,
    reps: u32,
    weight_kg: Option<f64>,
    success: bool,
    achieved_at: DateTime<Utc>,
) -> Result<Option<PrEvaluation>> {
    if !success {
        tracing::debug!("Set for {} not successful, skipping PR check", exercise_id);
        return Ok(None);
    }
    let weight = match weight_kg {
        Some(w) if w.is_finite() && w > 0.0 && reps > 0 => w,
        _ => {
            tracing::debug!("Set for {} has no usable weight/reps, skipping PR check", exercise_id);
            return Ok(None);
        }
    };

    let rep_max_key = RecordKey {
        exercise_id,
        equipment,
        record_type: RecordType::RepMax { reps },
    };
    let e1rm_key = RecordKey {
        exercise_id,
        equipment,
        record_type: RecordType::EstimatedOneRepMax,
    };

    let prev_weight = previous_best(
        store,
        rep_max_key,
        store.best_weight_at_reps(exercise_id, equipment, reps)?,
    )?;
    let prev_e1rm = previous_best(
        store,
        e1rm_key,
        store
            .best_estimated_1rm(exercise_id, equipment)?
            .map(|(value, _)| value),
    )?;

    let new_e1rm = estimate_one_rep_max(weight, reps);
    let is_hard_pr = beats(weight, prev_weight);
    let is_soft_pr = new_e1rm.is_some_and(|e1rm| beats(e1rm, prev_e1rm));

    if !is_hard_pr && !is_soft_pr {
        tracing::debug!(
            "No PR for {} on {}: {} x {}kg (best {:?}, e1RM best {:?})",
            exercise_id,
            equipment,
            reps,
            weight,
            prev_weight,
            prev_e1rm
        );
        return Ok(None);
    }

    let mut records = Vec::with_capacity(2);
    if is_hard_pr {
        records.push(PersonalRecord {
            exercise_id,
            equipment,
            record_type: rep_max_key.record_type,
            value_kg: weight,
            achieved_at,
        });
    }
    if let (true, Some(e1rm)) = (is_soft_pr, new_e1rm) {
        records.push(PersonalRecord {
            exercise_id,
            equipment,
            record_type: e1rm_key.record_type,
            value_kg: e1rm,
            achieved_at,
        });
    }

    let event = PrCelebrationEvent {
        exercise_id,
        equipment,
        is_hard_pr,
        reps: is_hard_pr.then_some(reps),
        new_weight_kg: is_hard_pr.then_some(weight),
        prev_weight_kg: if is_hard_pr { prev_weight } else { None },
        new_e1rm_kg: new_e1rm,
        prev_e1rm_kg: prev_e1rm,
    };

    tracing::info!(
        "PR on {} ({}): hard={} soft={} {} x {}kg",
        exercise_id,
        equipment,
        is_hard_pr,
        is_soft_pr,
        reps,
        weight
    );

    Ok(Some(PrEvaluation { event, records }))
}

/// Evaluate a set and upsert whichever records improved
pub fn evaluate_and_record_pr_if_any<S: SetHistory + RecordStore>(
    store: &mut S,
    exercise_id: ExerciseId,
    equipment: Equipment,
    reps: u32,
    weight_kg: Option<f64>,
    success: bool,
) -> Result<Option<PrCelebrationEvent>> {
    let evaluation = evaluate_pr(
        store,
        exercise_id,
        equipment,
        reps,
        weight_kg,
        success,
        Utc::now(),
    )?;
    match evaluation {
        Some(PrEvaluation { event, records }) => {
            for record in records {
                store.upsert_personal_record(record)?;
            }
            Ok(Some(event))
        }
        None => Ok(None),
    }
}

/// Record a new set: evaluate against prior history, append, then upsert
pub fn log_set<S: SetHistory + RecordStore + SetSink>(
    store: &mut S,
    set: &LoggedSet,
) -> Result<Option<PrCelebrationEvent>> {
    let evaluation = evaluate_pr(
        store,
        set.exercise_id,
        set.equipment,
        set.reps,
        set.weight_kg,
        set.outcome.is_success(),
        set.logged_at,
    )?;

    store.append(set)?;

    match evaluation {
        Some(PrEvaluation { event, records }) => {
            for record in records {
                store.upsert_personal_record(record)?;
            }
            Ok(Some(event))
        }
        None => Ok(None),
    }
}

/// Suggested load for the next session: last successful weight x 1.02
///
/// Returns `None` when there is no successful weighted history. No default
/// starting weight is ever invented.
pub fn suggest_next_load<H: SetHistory>(
    history: &H,
    exercise_id: ExerciseId,
    equipment: Equipment,
    reps: Option<u32>,
) -> Result<Option<f64>> {
    let last = history.last_successful_logged_set(exercise_id, equipment, reps)?;
    let suggestion = last
        .and_then(|set| set.weight_kg)
        .map(|weight| weight * LOAD_INCREMENT);

    match suggestion {
        Some(load) => tracing::info!("Next load for {} ({}): {:.2}kg", exercise_id, equipment, load),
        None => tracing::debug!("No successful history for {} ({})", exercise_id, equipment),
    }
    Ok(suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::InMemoryHistory;
    use crate::SetOutcome;
    use uuid::Uuid;

    const SQUAT: ExerciseId = ExerciseId(40);

    fn logged(reps: u32, weight: Option<f64>, outcome: SetOutcome) -> LoggedSet {
        LoggedSet {
            id: Uuid::new_v4(),
            session_id: Uuid::nil(),
            exercise_id: SQUAT,
            equipment: Equipment::Barbell,
            reps,
            weight_kg: weight,
            outcome,
            notes: None,
            logged_at: Utc::now(),
        }
    }

    fn log(history: &mut InMemoryHistory, reps: u32, weight: f64) -> Option<PrCelebrationEvent> {
        log_set(history, &logged(reps, Some(weight), SetOutcome::Success)).unwrap()
    }

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 0.01)
    }

    #[test]
    fn test_first_set_is_hard_and_soft_pr() {
        let mut history = InMemoryHistory::default();
        let event = log(&mut history, 5, 100.0).unwrap();

        assert!(event.is_hard_pr);
        assert_eq!(event.reps, Some(5));
        assert_eq!(event.new_weight_kg, Some(100.0));
        assert_eq!(event.prev_weight_kg, None);
        assert!(approx(event.new_e1rm_kg, 116.67));
        assert_eq!(event.prev_e1rm_kg, None);
        assert_eq!(history.list_records().unwrap().len(), 2);
    }

    #[test]
    fn test_pr_sequence() {
        let mut history = InMemoryHistory::default();
        log(&mut history, 5, 100.0).unwrap();

        // Lighter at same reps: nothing
        assert!(log(&mut history, 5, 90.0).is_none());

        // New rep count and higher estimate
        let event = log(&mut history, 3, 110.0).unwrap();
        assert!(event.is_hard_pr);
        assert_eq!(event.reps, Some(3));
        assert_eq!(event.new_weight_kg, Some(110.0));
        assert_eq!(event.prev_weight_kg, None);
        assert!(approx(event.new_e1rm_kg, 121.0));
        assert!(approx(event.prev_e1rm_kg, 116.67));

        let e1rm = history
            .current_record(&RecordKey {
                exercise_id: SQUAT,
                equipment: Equipment::Barbell,
                record_type: RecordType::EstimatedOneRepMax,
            })
            .unwrap()
            .unwrap();
        assert!((e1rm.value_kg - 121.0).abs() < 1e-9);
        // 5RM, 3RM, e1RM
        assert_eq!(history.list_records().unwrap().len(), 3);
    }

    #[test]
    fn test_lighter_sets_after_pr_are_ignored() {
        let mut history = InMemoryHistory::default();
        log(&mut history, 5, 100.0).unwrap();
        let event = log(&mut history, 8, 95.0).unwrap();
        assert!(approx(event.new_e1rm_kg, 120.33));

        assert!(log(&mut history, 8, 94.0).is_none());
        assert!(log(&mut history, 5, 100.0).is_none());
        assert_eq!(history.sets().len(), 4);
    }

    #[test]
    fn test_hard_pr_without_soft_pr() {
        let mut history = InMemoryHistory::default();
        log(&mut history, 5, 100.0).unwrap();

        // First 10-rep set, but an estimate well under 116.67
        let event = log(&mut history, 10, 80.0).unwrap();
        assert!(event.is_hard_pr);
        assert_eq!(event.reps, Some(10));
        assert_eq!(event.new_weight_kg, Some(80.0));
        assert!(approx(event.new_e1rm_kg, 106.67));
        assert!(approx(event.prev_e1rm_kg, 116.67));

        let e1rm = history
            .current_record(&RecordKey {
                exercise_id: SQUAT,
                equipment: Equipment::Barbell,
                record_type: RecordType::EstimatedOneRepMax,
            })
            .unwrap()
            .unwrap();
        assert!((e1rm.value_kg - 116.666).abs() < 0.01);
    }

    #[test]
    fn test_soft_pr_event_has_no_hard_fields() {
        let mut history = InMemoryHistory::default();
        history
            .append(&logged(5, Some(100.0), SetOutcome::Success))
            .unwrap();
        history
            .append(&logged(8, Some(100.0), SetOutcome::Success))
            .unwrap();
        // Seed a stored 8RM above what history shows
        history
            .upsert_personal_record(PersonalRecord {
                exercise_id: SQUAT,
                equipment: Equipment::Barbell,
                record_type: RecordType::RepMax { reps: 8 },
                value_kg: 105.0,
                achieved_at: Utc::now(),
            })
            .unwrap();

        // 8 x 104: below stored 8RM of 105, but e1RM 131.73 beats 126.67
        let event = log(&mut history, 8, 104.0).unwrap();
        assert!(!event.is_hard_pr);
        assert_eq!(event.reps, None);
        assert_eq!(event.new_weight_kg, None);
        assert_eq!(event.prev_weight_kg, None);
        assert!(approx(event.new_e1rm_kg, 131.73));
        assert!(approx(event.prev_e1rm_kg, 126.67));
    }

    #[test]
    fn test_high_rep_set_can_only_be_hard_pr() {
        let mut history = InMemoryHistory::default();
        log(&mut history, 5, 100.0).unwrap();

        let event = log(&mut history, 15, 60.0).unwrap();
        assert!(event.is_hard_pr);
        assert_eq!(event.reps, Some(15));
        assert_eq!(event.new_e1rm_kg, None);
        assert!(approx(event.prev_e1rm_kg, 116.67));
        // No e1RM record written for the 15-rep set
        let records = history.list_records().unwrap();
        assert_eq!(records.len(), 3);

        assert!(log(&mut history, 15, 55.0).is_none());
    }

    #[test]
    fn test_failed_and_unweighted_sets_never_pr() {
        let mut history = InMemoryHistory::default();
        let failed = log_set(&mut history, &logged(5, Some(200.0), SetOutcome::Fail)).unwrap();
        assert!(failed.is_none());
        let neutral = log_set(&mut history, &logged(5, Some(200.0), SetOutcome::Neutral)).unwrap();
        assert!(neutral.is_none());
        let bodyweight = log_set(&mut history, &logged(12, None, SetOutcome::Success)).unwrap();
        assert!(bodyweight.is_none());
        let zero = log_set(&mut history, &logged(5, Some(0.0), SetOutcome::Success)).unwrap();
        assert!(zero.is_none());

        // Still logged, never recorded
        assert_eq!(history.sets().len(), 4);
        assert!(history.list_records().unwrap().is_empty());
    }

    #[test]
    fn test_equal_weight_is_not_a_pr() {
        let mut history = InMemoryHistory::default();
        log(&mut history, 5, 100.0).unwrap();
        assert!(log(&mut history, 5, 100.0).is_none());
    }

    #[test]
    fn test_equipment_variants_are_separate() {
        let mut history = InMemoryHistory::default();
        log(&mut history, 5, 100.0).unwrap();

        let mut dumbbell = logged(5, Some(40.0), SetOutcome::Success);
        dumbbell.equipment = Equipment::Dumbbell;
        let event = log_set(&mut history, &dumbbell).unwrap().unwrap();
        assert!(event.is_hard_pr);
        assert_eq!(event.prev_weight_kg, None);
        assert_eq!(event.prev_e1rm_kg, None);
    }

    #[test]
    fn test_evaluate_and_record_does_not_append() {
        let mut history = InMemoryHistory::default();
        let event = evaluate_and_record_pr_if_any(
            &mut history,
            SQUAT,
            Equipment::Barbell,
            5,
            Some(100.0),
            true,
        )
        .unwrap();
        assert!(event.is_some());
        assert!(history.sets().is_empty());
        assert_eq!(history.list_records().unwrap().len(), 2);

        // Stored records now act as the baseline
        let again = evaluate_and_record_pr_if_any(
            &mut history,
            SQUAT,
            Equipment::Barbell,
            5,
            Some(100.0),
            true,
        )
        .unwrap();
        assert!(again.is_none());
    }

    #[test]
    fn test_suggest_next_load() {
        let mut history = InMemoryHistory::default();
        assert_eq!(
            suggest_next_load(&history, SQUAT, Equipment::Barbell, None).unwrap(),
            None
        );

        history
            .append(&logged(5, Some(100.0), SetOutcome::Success))
            .unwrap();
        history
            .append(&logged(3, Some(110.0), SetOutcome::Success))
            .unwrap();
        history
            .append(&logged(5, Some(120.0), SetOutcome::Fail))
            .unwrap();

        assert_eq!(
            suggest_next_load(&history, SQUAT, Equipment::Barbell, None).unwrap(),
            Some(110.0 * 1.02)
        );
        assert_eq!(
            suggest_next_load(&history, SQUAT, Equipment::Barbell, Some(5)).unwrap(),
            Some(100.0 * 1.02)
        );
        assert_eq!(
            suggest_next_load(&history, SQUAT, Equipment::Barbell, Some(8)).unwrap(),
            None
        );
        assert_eq!(
            suggest_next_load(&history, SQUAT, Equipment::Dumbbell, None).unwrap(),
            None
        );
    }

    #[test]
    fn test_next_load_ignores_non_positive_weights() {
        let mut history = InMemoryHistory::default();
        history
            .append(&logged(5, Some(0.0), SetOutcome::Success))
            .unwrap();
        history
            .append(&logged(5, Some(-20.0), SetOutcome::Success))
            .unwrap();
        assert_eq!(
            suggest_next_load(&history, SQUAT, Equipment::Barbell, None).unwrap(),
            None
        );

        log_set(&mut history, &logged(5, Some(100.0), SetOutcome::Success)).unwrap();
        log_set(&mut history, &logged(5, Some(0.0), SetOutcome::Success)).unwrap();
        log_set(&mut history, &logged(5, Some(-20.0), SetOutcome::Success)).unwrap();
        assert_eq!(
            suggest_next_load(&history, SQUAT, Equipment::Barbell, None).unwrap(),
            Some(100.0 * 1.02)
        );
    }
}
