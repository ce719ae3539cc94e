//! Append-only log of logged sets.
//!
//! Sets are appended to a JSONL (JSON Lines) file with file locking
//! to ensure safe concurrent access. Lines are never rewritten.

use crate::{LoggedSet, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Sink that accepts newly logged sets
pub trait SetSink {
    fn append(&mut self, set: &LoggedSet) -> Result<()>;
}

/// JSONL-based set log with file locking
pub struct JsonlSetLog {
    path: PathBuf,
}

impl JsonlSetLog {
    /// Create a new set log for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every set in insertion order
    pub fn read_all(&self) -> Result<Vec<LoggedSet>> {
        read_sets(&self.path)
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl SetSink for JsonlSetLog {
    fn append(&mut self, set: &LoggedSet) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(set)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended set {} to log", set.id);
        Ok(())
    }
}

/// Read all sets from a log file
///
/// A missing file is an empty history. Unparseable lines are skipped.
pub fn read_sets(path: &Path) -> Result<Vec<LoggedSet>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut sets = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<LoggedSet>(&line) {
            Ok(set) => sets.push(set),
            Err(e) => {
                tracing::warn!("Failed to parse set at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} sets from log", sets.len());
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Equipment, ExerciseId, SetOutcome};
    use chrono::Utc;
    use uuid::Uuid;

    fn create_test_set(reps: u32, weight: f64) -> LoggedSet {
        LoggedSet {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            exercise_id: ExerciseId(1),
            equipment: Equipment::Barbell,
            reps,
            weight_kg: Some(weight),
            outcome: SetOutcome::Success,
            notes: None,
            logged_at: Utc::now(),
        }
    }

    #[test]
    fn test_append_and_read_single_set() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("sets.jsonl");

        let set = create_test_set(5, 100.0);

        let mut log = JsonlSetLog::new(&log_path);
        log.append(&set).unwrap();

        let sets = read_sets(&log_path).unwrap();
        assert_eq!(sets, vec![set]);
    }

    #[test]
    fn test_append_preserves_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("nested").join("sets.jsonl");

        let mut log = JsonlSetLog::new(&log_path);
        for reps in 1..=5 {
            log.append(&create_test_set(reps, 60.0)).unwrap();
        }

        let reps: Vec<_> = log.read_all().unwrap().iter().map(|s| s.reps).collect();
        assert_eq!(reps, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_read_missing_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("nonexistent.jsonl");

        let sets = read_sets(&log_path).unwrap();
        assert!(sets.is_empty());
    }

    #[test]
    fn test_corrupt_lines_are_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("sets.jsonl");

        let mut log = JsonlSetLog::new(&log_path);
        log.append(&create_test_set(5, 100.0)).unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(&log_path).unwrap();
            writeln!(file, "{{ truncated").unwrap();
        }
        log.append(&create_test_set(3, 110.0)).unwrap();

        let sets = read_sets(&log_path).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[1].reps, 3);
    }
}
