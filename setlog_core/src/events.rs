//! Event log for routine mutations.
//!
//! A routine records what happened to it (exercises added, sets completed,
//! sessions begun and ended) through an injected [`EventSink`]. Two sinks
//! are provided: a JSONL file sink with file locking and an in-memory log.

use crate::Result;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use uuid::Uuid;

/// A single recorded mutation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    pub description: String,
}

impl Event {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            logged_at: Utc::now(),
            description: description.into(),
        }
    }
}

/// Destination for routine events
pub trait EventSink {
    fn record(&mut self, event: &Event) -> Result<()>;
}

/// JSONL-based event sink with file locking
pub struct JsonlEventSink {
    path: PathBuf,
}

impl JsonlEventSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl EventSink for JsonlEventSink {
    fn record(&mut self, event: &Event) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(event)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended event {} to {:?}", event.id, self.path);
        Ok(())
    }
}

/// In-memory event log
///
/// Clones share the same underlying list, so a caller can hand one clone to
/// a routine and keep another to read the events back.
#[derive(Clone, Debug, Default)]
pub struct MemoryEventLog {
    events: Rc<RefCell<Vec<Event>>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|e| e.description.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventSink for MemoryEventLog {
    fn record(&mut self, event: &Event) -> Result<()> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}

/// Read all events from a JSONL event log
///
/// A missing file yields an empty log. Lines that fail to parse are skipped
/// with a warning.
pub fn read_events(path: &Path) -> Result<Vec<Event>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut events = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Event>(&line) {
            Ok(event) => events.push(event),
            Err(e) => {
                tracing::warn!("Failed to parse event at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} events from {:?}", events.len(), path);
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_read_single_event() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("events.jsonl");

        let event = Event::new("Added Deadlift to Test Routine B");
        let event_id = event.id;

        let mut sink = JsonlEventSink::new(&log_path);
        sink.record(&event).unwrap();

        let events = read_events(&log_path).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, event_id);
        assert_eq!(events[0].description, "Added Deadlift to Test Routine B");
    }

    #[test]
    fn test_record_creates_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("nested").join("events.jsonl");

        let mut sink = JsonlEventSink::new(&log_path);
        for i in 0..3 {
            sink.record(&Event::new(format!("event {}", i))).unwrap();
        }

        let events = read_events(&log_path).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2].description, "event 2");
    }

    #[test]
    fn test_read_missing_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let events = read_events(&temp_dir.path().join("nonexistent.jsonl")).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_read_skips_corrupted_lines() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("events.jsonl");

        let mut sink = JsonlEventSink::new(&log_path);
        sink.record(&Event::new("first")).unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(&log_path).unwrap();
            file.write_all(b"{ not json }\n\n").unwrap();
        }
        sink.record(&Event::new("second")).unwrap();

        let events = read_events(&log_path).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].description, "second");
    }

    #[test]
    fn test_memory_log_clones_share_events() {
        let log = MemoryEventLog::new();
        let mut sink = log.clone();
        sink.record(&Event::new("Began session")).unwrap();

        assert_eq!(log.len(), 1);
        assert_eq!(log.descriptions(), vec!["Began session".to_string()]);

        log.clear();
        assert!(sink.is_empty());
    }
}
