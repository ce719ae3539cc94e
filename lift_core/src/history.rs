//! History and record collaborators consulted by the progression evaluator.
//!
//! The evaluator only talks to these traits. `InMemoryHistory` implements them
//! over a plain `Vec`; `store::FileStore` implements them over files.

use crate::estimation::estimate_one_rep_max;
use crate::records::RecordBook;
use crate::set_log::SetSink;
use crate::{Equipment, ExerciseId, LoggedSet, PersonalRecord, RecordKey, Result};

/// Read access to logged sets
///
/// All queries only consider successful sets with a weight, scoped to one
/// exercise + equipment pair.
pub trait SetHistory {
    /// Most recently logged successful set, optionally at exactly `reps`
    fn last_successful_logged_set(
        &self,
        exercise_id: ExerciseId,
        equipment: Equipment,
        reps: Option<u32>,
    ) -> Result<Option<LoggedSet>>;

    /// Heaviest successful weight at exactly `reps`
    fn best_weight_at_reps(
        &self,
        exercise_id: ExerciseId,
        equipment: Equipment,
        reps: u32,
    ) -> Result<Option<f64>>;

    /// Best Epley estimate and the rep count that produced it
    fn best_estimated_1rm(
        &self,
        exercise_id: ExerciseId,
        equipment: Equipment,
    ) -> Result<Option<(f64, u32)>>;
}

/// Read/write access to the current personal records
pub trait RecordStore {
    fn current_record(&self, key: &RecordKey) -> Result<Option<PersonalRecord>>;

    /// Replace the record stored under the record's key
    fn upsert_personal_record(&mut self, record: PersonalRecord) -> Result<()>;

    fn list_records(&self) -> Result<Vec<PersonalRecord>>;
}

fn weighted_successes<'a>(
    sets: &'a [LoggedSet],
    exercise_id: ExerciseId,
    equipment: Equipment,
) -> impl DoubleEndedIterator<Item = (&'a LoggedSet, f64)> + 'a {
    sets.iter().filter_map(move |set| {
        let weight = set.weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
        (set.exercise_id == exercise_id
            && set.equipment == equipment
            && set.outcome.is_success())
        .then_some((set, weight))
    })
}

/// `SetHistory::last_successful_logged_set` over sets in insertion order
pub fn last_successful_in<'a>(
    sets: &'a [LoggedSet],
    exercise_id: ExerciseId,
    equipment: Equipment,
    reps: Option<u32>,
) -> Option<&'a LoggedSet> {
    weighted_successes(sets, exercise_id, equipment)
        .rev()
        .map(|(set, _)| set)
        .find(|set| reps.map_or(true, |r| set.reps == r))
}

/// `SetHistory::best_weight_at_reps` over a slice of sets
pub fn best_weight_at_reps_in(
    sets: &[LoggedSet],
    exercise_id: ExerciseId,
    equipment: Equipment,
    reps: u32,
) -> Option<f64> {
    weighted_successes(sets, exercise_id, equipment)
        .filter(|(set, _)| set.reps == reps)
        .map(|(_, weight)| weight)
        .max_by(f64::total_cmp)
}

/// `SetHistory::best_estimated_1rm` over a slice of sets
pub fn best_estimated_1rm_in(
    sets: &[LoggedSet],
    exercise_id: ExerciseId,
    equipment: Equipment,
) -> Option<(f64, u32)> {
    weighted_successes(sets, exercise_id, equipment)
        .filter_map(|(set, weight)| Some((estimate_one_rep_max(weight, set.reps)?, set.reps)))
        .max_by(|a, b| a.0.total_cmp(&b.0))
}

/// History and records held in memory
#[derive(Clone, Debug, Default)]
pub struct InMemoryHistory {
    sets: Vec<LoggedSet>,
    records: RecordBook,
}

impl InMemoryHistory {
    pub fn new(sets: Vec<LoggedSet>, records: RecordBook) -> Self {
        Self { sets, records }
    }

    pub fn sets(&self) -> &[LoggedSet] {
        &self.sets
    }

    pub fn records(&self) -> &RecordBook {
        &self.records
    }
}

impl SetSink for InMemoryHistory {
    fn append(&mut self, set: &LoggedSet) -> Result<()> {
        self.sets.push(set.clone());
        Ok(())
    }
}

impl SetHistory for InMemoryHistory {
    fn last_successful_logged_set(
        &self,
        exercise_id: ExerciseId,
        equipment: Equipment,
        reps: Option<u32>,
    ) -> Result<Option<LoggedSet>> {
        Ok(last_successful_in(&self.sets, exercise_id, equipment, reps).cloned())
    }

    fn best_weight_at_reps(
        &self,
        exercise_id: ExerciseId,
        equipment: Equipment,
        reps: u32,
    ) -> Result<Option<f64>> {
        Ok(best_weight_at_reps_in(&self.sets, exercise_id, equipment, reps))
    }

    fn best_estimated_1rm(
        &self,
        exercise_id: ExerciseId,
        equipment: Equipment,
    ) -> Result<Option<(f64, u32)>> {
        Ok(best_estimated_1rm_in(&self.sets, exercise_id, equipment))
    }
}

impl RecordStore for InMemoryHistory {
    fn current_record(&self, key: &RecordKey) -> Result<Option<PersonalRecord>> {
        Ok(self.records.get(key).cloned())
    }

    fn upsert_personal_record(&mut self, record: PersonalRecord) -> Result<()> {
        self.records.upsert(record);
        Ok(())
    }

    fn list_records(&self) -> Result<Vec<PersonalRecord>> {
        Ok(self.records.iter().cloned().collect())
    }
}
