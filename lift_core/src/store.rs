//! File-backed history and record store.
//!
//! Layout under the data directory:
//! - `sets.jsonl`: append-only set log
//! - `records.json`: current personal records
//! - `store.lock`: held exclusively while a set is logged, so evaluation,
//!   append and upsert happen as one unit across processes

use crate::history::{
    best_estimated_1rm_in, best_weight_at_reps_in, last_successful_in, RecordStore, SetHistory,
};
use crate::progression;
use crate::records::RecordBook;
use crate::set_log::{JsonlSetLog, SetSink};
use crate::{
    Equipment, ExerciseId, LoggedSet, PersonalRecord, PrCelebrationEvent, RecordKey, Result,
};
use fs2::FileExt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

pub const SET_LOG_FILE: &str = "sets.jsonl";
pub const RECORDS_FILE: &str = "records.json";
const LOCK_FILE: &str = "store.lock";

/// History and records persisted in a data directory
pub struct FileStore {
    data_dir: PathBuf,
    set_log: JsonlSetLog,
}

impl FileStore {
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        let set_log = JsonlSetLog::new(data_dir.join(SET_LOG_FILE));
        Ok(Self { data_dir, set_log })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn set_log_path(&self) -> &Path {
        self.set_log.path()
    }

    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join(RECORDS_FILE)
    }

    /// Every logged set, in insertion order
    pub fn sets(&self) -> Result<Vec<LoggedSet>> {
        self.set_log.read_all()
    }

    pub fn record_book(&self) -> Result<RecordBook> {
        RecordBook::load(&self.records_path())
    }

    /// Log a set and upsert any records it beats, holding the store lock
    pub fn log_set(&mut self, set: &LoggedSet) -> Result<Option<PrCelebrationEvent>> {
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.data_dir.join(LOCK_FILE))?;
        lock.lock_exclusive()?;
        tracing::debug!("Acquired store lock for exercise {}", set.exercise_id);

        let outcome = progression::log_set(self, set);

        lock.unlock()?;
        outcome
    }
}

impl SetSink for FileStore {
    fn append(&mut self, set: &LoggedSet) -> Result<()> {
        self.set_log.append(set)
    }
}

impl SetHistory for FileStore {
    fn last_successful_logged_set(
        &self,
        exercise_id: ExerciseId,
        equipment: Equipment,
        reps: Option<u32>,
    ) -> Result<Option<LoggedSet>> {
        let sets = self.sets()?;
        Ok(last_successful_in(&sets, exercise_id, equipment, reps).cloned())
    }

    fn best_weight_at_reps(
        &self,
        exercise_id: ExerciseId,
        equipment: Equipment,
        reps: u32,
    ) -> Result<Option<f64>> {
        Ok(best_weight_at_reps_in(&self.sets()?, exercise_id, equipment, reps))
    }

    fn best_estimated_1rm(
        &self,
        exercise_id: ExerciseId,
        equipment: Equipment,
    ) -> Result<Option<(f64, u32)>> {
        Ok(best_estimated_1rm_in(&self.sets()?, exercise_id, equipment))
    }
}

impl RecordStore for FileStore {
    fn current_record(&self, key: &RecordKey) -> Result<Option<PersonalRecord>> {
        Ok(self.record_book()?.get(key).cloned())
    }

    fn upsert_personal_record(&mut self, record: PersonalRecord) -> Result<()> {
        RecordBook::update(&self.records_path(), |book| {
            book.upsert(record);
            Ok(())
        })?;
        Ok(())
    }

    fn list_records(&self) -> Result<Vec<PersonalRecord>> {
        Ok(self.record_book()?.iter().cloned().collect())
    }
}
