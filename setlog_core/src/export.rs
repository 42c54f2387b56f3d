//! CSV export of a routine's workout table.
//!
//! Unlike the JSON document this includes session data (weight and
//! completed sets), so it can be used to keep a record of a finished
//! workout.

use crate::{Exercise, Result, Routine};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    equipment: &'static str,
    sets: u32,
    reps: u32,
    weight: u32,
    sets_completed: u32,
    met_goal: bool,
}

impl<'a> From<&'a Exercise> for CsvRow<'a> {
    fn from(exercise: &'a Exercise) -> Self {
        CsvRow {
            name: exercise.name(),
            equipment: exercise.equipment().as_str(),
            sets: exercise.sets(),
            reps: exercise.reps(),
            weight: exercise.weight(),
            sets_completed: exercise.sets_completed(),
            met_goal: exercise.has_met_goal(),
        }
    }
}

/// Write the workout table as CSV to any writer
pub fn write_csv<W: Write>(routine: &Routine, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for exercise in routine.exercises() {
        writer.serialize(CsvRow::from(exercise))?;
    }
    writer.flush()?;
    Ok(())
}

/// Export the workout table to a CSV file, replacing it atomically
///
/// Returns the number of rows written.
pub fn export_csv(routine: &Routine, path: &Path) -> Result<usize> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    write_csv(routine, temp.as_file())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| crate::Error::Io(e.error))?;

    tracing::info!(
        "Exported {} exercises of {:?} to {:?}",
        routine.len(),
        routine.name(),
        path
    );
    Ok(routine.len())
}
