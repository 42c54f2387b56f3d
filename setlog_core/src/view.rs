//! Fixed-width table view of a routine.
//!
//! ```text
//! Test Routine A
//! |Cur|Num| Name                    |Sets|Reps| Wgt |Prg|
//! =======================================================
//! | * | 1 | Bent Over Barbell Row   | 3  | 5  | 95  | 1 |
//! =======================================================
//! Met Goal: No
//! ```

use crate::{Exercise, Routine};

pub const HEADER: &str = "|Cur|Num| Name                    |Sets|Reps| Wgt |Prg|";
pub const DIVIDER: &str = "=======================================================";

impl Exercise {
    /// One table row for this exercise
    pub fn view_row(&self, ordinal: usize, is_current: bool) -> String {
        let marker = if is_current { " * " } else { "   " };
        format!(
            "|{}|{:<3}|{:<25}|{:<4}|{:<4}|{:<5}|{:<3}|",
            marker,
            format!(" {}", ordinal),
            format!(" {}", self.name()),
            format!(" {}", self.sets()),
            format!(" {}", self.reps()),
            format!(" {}", self.weight()),
            format!(" {}", self.sets_completed()),
        )
    }
}

impl Routine {
    /// Render the whole workout: title, header, one row per exercise
    /// (1-based ordinals, current exercise starred) and the goal summary.
    pub fn view_workout(&self) -> String {
        let mut lines = Vec::with_capacity(self.len() + 5);
        lines.push(self.name().to_string());
        lines.push(HEADER.to_string());
        lines.push(DIVIDER.to_string());

        let current = self.current_index();
        for (i, exercise) in self.exercises().iter().enumerate() {
            lines.push(exercise.view_row(i + 1, current == Some(i)));
        }

        lines.push(DIVIDER.to_string());
        let met = if self.has_met_all_goals() { "Yes" } else { "No" };
        lines.push(format!("Met Goal: {}", met));
        lines.join("\n")
    }
}
