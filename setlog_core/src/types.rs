//! Core domain types for setlog.
//!
//! This module defines the building blocks of a routine:
//! - Equipment kinds, which pick the weight rule for an exercise
//! - Exercises with their goal (sets × reps) and live progress

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Equipment
// ============================================================================

/// Equipment used to perform an exercise
///
/// Serialized by its canonical variant name (`"Barbell"`, `"Dumbbell"`, ...).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Machine,
    None,
}

impl Equipment {
    pub const ALL: [Equipment; 4] = [
        Equipment::Barbell,
        Equipment::Dumbbell,
        Equipment::Machine,
        Equipment::None,
    ];

    /// Canonical variant name, as written to routine documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::Barbell => "Barbell",
            Equipment::Dumbbell => "Dumbbell",
            Equipment::Machine => "Machine",
            Equipment::None => "None",
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Equipment {
    type Err = Error;

    /// Parse user input. Accepts the canonical names in any case and the
    /// single-letter menu shortcuts (b, d, m, n).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "barbell" | "b" => Ok(Equipment::Barbell),
            "dumbbell" | "d" => Ok(Equipment::Dumbbell),
            "machine" | "m" => Ok(Equipment::Machine),
            "none" | "n" => Ok(Equipment::None),
            _ => Err(Error::UnknownEquipment(s.to_string())),
        }
    }
}

// ============================================================================
// Exercise
// ============================================================================

/// A single movement with its goal and the progress made towards it
///
/// Weights are in pounds. For barbell movements `weight` holds the total
/// load including the bar, not the plate input the user typed.
///
/// Setters do not validate their arguments; callers own that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exercise {
    name: String,
    equipment: Equipment,
    sets: u32,
    reps: u32,
    weight: u32,
    sets_completed: u32,
}

impl Exercise {
    /// Create an exercise with no goal, no weight and no progress
    pub fn new(name: impl Into<String>, equipment: Equipment) -> Self {
        Self::with_goal(name, equipment, 0, 0)
    }

    /// Create an exercise with its goal sets and reps already set
    pub fn with_goal(name: impl Into<String>, equipment: Equipment, sets: u32, reps: u32) -> Self {
        Self {
            name: name.into(),
            equipment,
            sets,
            reps,
            weight: 0,
            sets_completed: 0,
        }
    }

    /// True once the completed sets match the goal
    ///
    /// Note this is vacuously true for an exercise whose goal was never set
    /// (`sets == 0`).
    pub fn has_met_goal(&self) -> bool {
        self.sets_completed == self.sets
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn equipment(&self) -> Equipment {
        self.equipment
    }

    pub fn set_equipment(&mut self, equipment: Equipment) {
        self.equipment = equipment;
    }

    pub fn sets(&self) -> u32 {
        self.sets
    }

    pub fn set_sets(&mut self, sets: u32) {
        self.sets = sets;
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    pub fn set_reps(&mut self, reps: u32) {
        self.reps = reps;
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: u32) {
        self.weight = weight;
    }

    pub fn sets_completed(&self) -> u32 {
        self.sets_completed
    }

    pub fn set_sets_completed(&mut self, sets_completed: u32) {
        self.sets_completed = sets_completed;
    }
}
