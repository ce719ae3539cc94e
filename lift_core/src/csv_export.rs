//! CSV export of logged sets.
//!
//! The set log stays the source of truth; the export is a fresh snapshot
//! each time.

use crate::{Equipment, LoggedSet, Result, SetOutcome};
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    session_id: String,
    logged_at: String,
    exercise_id: u32,
    equipment: Equipment,
    reps: u32,
    weight_kg: Option<f64>,
    outcome: SetOutcome,
    notes: Option<String>,
}

impl From<&LoggedSet> for CsvRow {
    fn from(set: &LoggedSet) -> Self {
        CsvRow {
            id: set.id.to_string(),
            session_id: set.session_id.to_string(),
            logged_at: set.logged_at.to_rfc3339(),
            exercise_id: set.exercise_id.0,
            equipment: set.equipment,
            reps: set.reps,
            weight_kg: set.weight_kg,
            outcome: set.outcome,
            notes: set.notes.clone(),
        }
    }
}

/// Write `sets` to `csv_path`, replacing any previous export
///
/// Returns the number of rows written. The file is synced before returning.
pub fn export_sets(sets: &[LoggedSet], csv_path: &Path) -> Result<usize> {
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(csv_path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(file);

    for set in sets {
        writer.serialize(CsvRow::from(set))?;
    }

    // Header-only output when there are no rows
    if sets.is_empty() {
        writer.write_record([
            "id",
            "session_id",
            "logged_at",
            "exercise_id",
            "equipment",
            "reps",
            "weight_kg",
            "outcome",
            "notes",
        ])?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} sets to {:?}", sets.len(), csv_path);
    Ok(sets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExerciseId;
    use chrono::Utc;
    use uuid::Uuid;

    fn create_test_set(weight: Option<f64>, notes: Option<&str>) -> LoggedSet {
        LoggedSet {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            exercise_id: ExerciseId(45),
            equipment: Equipment::Barbell,
            reps: 8,
            weight_kg: weight,
            outcome: SetOutcome::Neutral,
            notes: notes.map(str::to_string),
            logged_at: Utc::now(),
        }
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("export").join("sets.csv");

        let sets = vec![
            create_test_set(Some(80.0), Some("grip slipped, last rep")),
            create_test_set(None, None),
        ];
        let count = export_sets(&sets, &csv_path).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "id");
        assert_eq!(&headers[6], "weight_kg");

        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][4], "barbell");
        assert_eq!(&rows[0][6], "80.0");
        assert_eq!(&rows[0][7], "neutral");
        assert_eq!(&rows[0][8], "grip slipped, last rep");
        assert_eq!(&rows[1][6], "");
    }

    #[test]
    fn test_export_replaces_previous_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("sets.csv");

        export_sets(&[create_test_set(Some(60.0), None)], &csv_path).unwrap();
        export_sets(
            &[
                create_test_set(Some(60.0), None),
                create_test_set(Some(62.5), None),
            ],
            &csv_path,
        )
        .unwrap();

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.into_records().count(), 2);
    }

    #[test]
    fn test_export_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("sets.csv");

        assert_eq!(export_sets(&[], &csv_path).unwrap(), 0);
        let contents = std::fs::read_to_string(&csv_path).unwrap();
        assert!(contents.starts_with("id,session_id"));
    }
}
