#![forbid(unsafe_code)]

//! Core domain model and business logic for setlog.
//!
//! This crate provides:
//! - Domain types (equipment, exercises)
//! - Routines and the guided workout session state machine
//! - The fixed-width workout table view
//! - Persistence (JSON routine documents, JSONL event log, CSV export)
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod routine;
pub mod view;
pub mod persistence;
pub mod events;
pub mod export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use routine::{ExerciseEdit, Routine, BAR_WEIGHT};
pub use persistence::{list_routines, routine_file_name};
pub use events::{read_events, Event, EventSink, JsonlEventSink, MemoryEventLog};
pub use export::export_csv;
pub use config::Config;
