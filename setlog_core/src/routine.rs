//! Workout routine and its guided session state machine.
//!
//! A routine is an ordered list of exercises. While a session is active the
//! routine points at the exercise being performed and counts the sets done
//! on it. Completing the last set of an exercise moves on to the next one;
//! completing (or skipping) the last exercise ends the session.

use crate::events::{Event, EventSink};
use crate::{Equipment, Error, Exercise, Result};
use std::fmt;

/// Weight of an empty barbell in pounds
pub const BAR_WEIGHT: u32 = 45;

/// Field changes for [`Routine::edit_exercise`]; `None` leaves a field as is
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExerciseEdit {
    pub name: Option<String>,
    pub equipment: Option<Equipment>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
}

impl ExerciseEdit {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A named, ordered workout plan with session state
#[derive(Default)]
pub struct Routine {
    name: String,
    exercises: Vec<Exercise>,
    /// Index of the exercise being performed; `Some` iff in session
    current: Option<usize>,
    /// Sets done on the current exercise; always 0 outside a session
    progress: u32,
    sink: Option<Box<dyn EventSink>>,
}

impl fmt::Debug for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routine")
            .field("name", &self.name)
            .field("exercises", &self.exercises)
            .field("current", &self.current)
            .field("progress", &self.progress)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl Routine {
    /// Create an empty routine that is not in session
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach an event sink, builder style
    pub fn with_event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.set_event_sink(sink);
        self
    }

    pub fn set_event_sink(&mut self, sink: impl EventSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    pub fn clear_event_sink(&mut self) {
        self.sink = None;
    }

    fn record(&mut self, description: String) {
        if let Some(sink) = self.sink.as_mut() {
            let event = Event::new(description);
            if let Err(e) = sink.record(&event) {
                tracing::warn!("Failed to record event {:?}: {}", event.description, e);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        let description = format!("Renamed routine {} to {}", self.name, name);
        self.name = name;
        self.record(description);
    }

    /// Exercises in workout order
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn in_session(&self) -> bool {
        self.current.is_some()
    }

    /// The exercise being performed, if a session is active
    pub fn current(&self) -> Option<&Exercise> {
        self.current.map(|i| &self.exercises[i])
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn exercise(&self, index: usize) -> Result<&Exercise> {
        let len = self.exercises.len();
        self.exercises
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    /// Set the goal on `exercise` and append it to the end of the routine
    pub fn add_exercise(&mut self, mut exercise: Exercise, sets: u32, reps: u32) {
        exercise.set_sets(sets);
        exercise.set_reps(reps);
        let description = format!(
            "Added {} ({} x {}, {}) to {}",
            exercise.name(),
            sets,
            reps,
            exercise.equipment(),
            self.name
        );
        self.exercises.push(exercise);
        self.record(description);
    }

    /// Remove and return the exercise at `index`
    ///
    /// Not allowed while a session is active.
    pub fn remove_exercise(&mut self, index: usize) -> Result<Exercise> {
        if self.in_session() {
            return Err(Error::AlreadyInSession);
        }
        let len = self.exercises.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }

        let removed = self.exercises.remove(index);
        self.record(format!("Removed {} from {}", removed.name(), self.name));
        Ok(removed)
    }

    /// Change the name, equipment or goal of the exercise at `index`
    ///
    /// Not allowed while a session is active, since the goal drives the
    /// session's progress.
    pub fn edit_exercise(&mut self, index: usize, edit: ExerciseEdit) -> Result<()> {
        if self.in_session() {
            return Err(Error::AlreadyInSession);
        }
        let len = self.exercises.len();
        let exercise = self
            .exercises
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        if edit.is_empty() {
            return Ok(());
        }

        let mut changes = Vec::new();
        let old_name = exercise.name().to_string();
        if let Some(name) = edit.name {
            changes.push(format!("name {}", name));
            exercise.set_name(name);
        }
        if let Some(equipment) = edit.equipment {
            changes.push(format!("equipment {}", equipment));
            exercise.set_equipment(equipment);
        }
        if let Some(sets) = edit.sets {
            changes.push(format!("sets {}", sets));
            exercise.set_sets(sets);
        }
        if let Some(reps) = edit.reps {
            changes.push(format!("reps {}", reps));
            exercise.set_reps(reps);
        }

        self.record(format!("Edited {} in {}: {}", old_name, self.name, changes.join(", ")));
        Ok(())
    }

    /// Position of the first exercise with the given name
    pub fn index_of_exercise(&self, name: &str) -> Option<usize> {
        self.exercises.iter().position(|e| e.name() == name)
    }

    // ------------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------------

    /// Start at the first exercise with no progress
    ///
    /// Completed sets left over from an earlier session are not cleared; each
    /// exercise's count is overwritten when the new session records a set on it.
    pub fn begin_session(&mut self) -> Result<()> {
        if self.in_session() {
            return Err(Error::AlreadyInSession);
        }
        if self.exercises.is_empty() {
            return Err(Error::EmptyRoutine);
        }

        self.current = Some(0);
        self.progress = 0;
        tracing::debug!("Began session for {}", self.name);
        self.record(format!("Began session for {}", self.name));
        Ok(())
    }

    /// End the session. Completed sets stay recorded on each exercise.
    pub fn end_session(&mut self) -> Result<()> {
        if !self.in_session() {
            return Err(Error::NotInSession);
        }

        self.current = None;
        self.progress = 0;
        tracing::debug!("Ended session for {}", self.name);
        self.record(format!("Ended session for {}", self.name));
        Ok(())
    }

    /// Apply a weight to the current exercise
    ///
    /// For barbell movements `weight` is the plate load on one side, and the
    /// stored weight is both sides plus the bar. Otherwise it is stored as is.
    pub fn add_weight_to_current(&mut self, weight: u32) -> Result<()> {
        let index = self.current.ok_or(Error::NotInSession)?;
        let current = &mut self.exercises[index];

        let total = match current.equipment() {
            Equipment::Barbell => weight.saturating_mul(2).saturating_add(BAR_WEIGHT),
            Equipment::Dumbbell | Equipment::Machine | Equipment::None => weight,
        };
        current.set_weight(total);

        let description = format!("Set weight of {} to {} lb", current.name(), total);
        self.record(description);
        Ok(())
    }

    /// Record one completed set on the current exercise
    ///
    /// The set that meets the goal moves the session to the next exercise,
    /// or ends it when the current exercise is the last one.
    pub fn add_set_to_progress(&mut self) -> Result<()> {
        let index = self.current.ok_or(Error::NotInSession)?;
        let current = &mut self.exercises[index];
        let done = self.progress + 1;

        if done >= current.sets() {
            // A zero-set goal completes immediately without recording a set
            current.set_sets_completed(done.min(current.sets()));
            let description = format!("Completed all sets of {}", current.name());
            self.progress = 0;
            self.record(description);
            self.advance(index)
        } else {
            current.set_sets_completed(done);
            let description = format!(
                "Completed set {} of {} for {}",
                done,
                current.sets(),
                current.name()
            );
            self.progress = done;
            self.record(description);
            Ok(())
        }
    }

    /// Move on to the next exercise without recording another set
    pub fn skip_exercise(&mut self) -> Result<()> {
        let index = self.current.ok_or(Error::NotInSession)?;
        self.progress = 0;
        self.record(format!("Skipped {}", self.exercises[index].name()));
        self.advance(index)
    }

    fn advance(&mut self, index: usize) -> Result<()> {
        if index + 1 >= self.exercises.len() {
            tracing::info!("Workout {} complete", self.name);
            self.end_session()
        } else {
            self.current = Some(index + 1);
            Ok(())
        }
    }

    /// True when every exercise has met its goal
    ///
    /// An empty routine has not met its goals.
    pub fn has_met_all_goals(&self) -> bool {
        !self.exercises.is_empty() && self.exercises.iter().all(Exercise::has_met_goal)
    }
}
