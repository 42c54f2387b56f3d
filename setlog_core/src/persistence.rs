//! Routine persistence as single JSON documents.
//!
//! Only the plan is stored: the routine name and each exercise's name, goal
//! and equipment. Weights and completed sets are session data and are not
//! written, so a loaded routine always starts fresh.
//!
//! Writes go through a locked temp file that is renamed over the target,
//! so a failed save never leaves a half-written routine behind.

use crate::{Equipment, Error, Exercise, Result, Routine};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// On-disk form of a routine
#[derive(Debug, Serialize, Deserialize)]
struct RoutineDocument {
    name: String,
    exercises: Vec<ExerciseDocument>,
}

/// On-disk form of an exercise
#[derive(Debug, Serialize, Deserialize)]
struct ExerciseDocument {
    name: String,
    sets: u32,
    reps: u32,
    equipment: Equipment,
}

impl From<&Routine> for RoutineDocument {
    fn from(routine: &Routine) -> Self {
        RoutineDocument {
            name: routine.name().to_string(),
            exercises: routine
                .exercises()
                .iter()
                .map(|e| ExerciseDocument {
                    name: e.name().to_string(),
                    sets: e.sets(),
                    reps: e.reps(),
                    equipment: e.equipment(),
                })
                .collect(),
        }
    }
}

impl From<RoutineDocument> for Routine {
    fn from(doc: RoutineDocument) -> Self {
        let mut routine = Routine::new(doc.name);
        for e in doc.exercises {
            routine.add_exercise(Exercise::new(e.name, e.equipment), e.sets, e.reps);
        }
        routine
    }
}

impl Routine {
    /// Serialize the routine plan as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&RoutineDocument::from(self))?)
    }

    /// Parse a routine plan from JSON
    ///
    /// Missing fields, unknown equipment names and negative counts are
    /// rejected rather than defaulted.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: RoutineDocument = serde_json::from_str(json)?;
        Ok(doc.into())
    }

    /// Load a routine from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let routine = Self::from_json_str(&contents)?;
        tracing::debug!(
            "Loaded routine {:?} ({} exercises) from {:?}",
            routine.name(),
            routine.len(),
            path
        );
        Ok(routine)
    }

    /// Save the routine to a JSON file with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file next to the target
    /// 2. Syncing to disk
    /// 3. Renaming over the target
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let contents = self.to_json_string()?;

        let temp = NamedTempFile::new_in(&parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved routine {:?} to {:?}", self.name(), path);
        Ok(())
    }
}

/// File name for a routine: spaces become underscores, plus `.json`
pub fn routine_file_name(name: &str) -> String {
    format!("{}.json", name.replace(' ', "_"))
}

/// All saved routine files in `dir`, sorted by path
///
/// A missing directory has no routines.
pub fn list_routines(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        tracing::debug!("No routines directory at {:?}", dir);
        return Ok(Vec::new());
    }

    let mut routines = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            routines.push(path);
        }
    }
    routines.sort();
    Ok(routines)
}
