//! Personal-record book persistence with file locking.
//!
//! The book holds at most one current record per (exercise, equipment,
//! record type). Upserts replace; nothing is appended.

use crate::{Error, PersonalRecord, RecordKey, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Keyed map of current personal records
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PersonalRecord>", into = "Vec<PersonalRecord>")]
pub struct RecordBook {
    records: BTreeMap<RecordKey, PersonalRecord>,
}

impl From<Vec<PersonalRecord>> for RecordBook {
    fn from(records: Vec<PersonalRecord>) -> Self {
        let mut book = RecordBook::default();
        for record in records {
            book.upsert(record);
        }
        book
    }
}

impl From<RecordBook> for Vec<PersonalRecord> {
    fn from(book: RecordBook) -> Self {
        book.records.into_values().collect()
    }
}

impl RecordBook {
    pub fn get(&self, key: &RecordKey) -> Option<&PersonalRecord> {
        self.records.get(key)
    }

    /// Insert or replace the record under its key
    ///
    /// Returns the record that was replaced, if any.
    pub fn upsert(&mut self, record: PersonalRecord) -> Option<PersonalRecord> {
        self.records.insert(record.key(), record)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonalRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load the book from a file with shared locking
    ///
    /// Returns an empty book if the file doesn't exist or is corrupted.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No record book at {:?}, starting empty", path);
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open record book {:?}: {}. Starting empty.", path, e);
                return Ok(Self::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock record book {:?}: {}. Starting empty.", path, e);
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read record book {:?}: {}. Starting empty.", path, e);
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<RecordBook>(&contents) {
            Ok(book) => {
                tracing::debug!("Loaded {} records from {:?}", book.len(), path);
                Ok(book)
            }
            Err(e) => {
                tracing::warn!("Failed to parse record book {:?}: {}. Starting empty.", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Save the book atomically (temp file, fsync, rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::Store(format!("record book path {:?} has no parent", path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} records to {:?}", self.len(), path);
        Ok(())
    }

    /// Load, modify and save back
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut RecordBook) -> Result<()>,
    {
        let mut book = Self::load(path)?;
        f(&mut book)?;
        book.save(path)?;
        Ok(book)
    }
}
