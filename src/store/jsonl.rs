//! JSON Lines file store
//!
//! Each created state is appended as one JSON object per line. The last
//! non-empty line is the most recent state, which lets separate runs of the
//! binary continue the same event stream.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::store::{ElevatorState, ElevatorStateStore, StoreError, StoreResult};

/// Append-only JSON Lines store
#[derive(Debug, Clone)]
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    /// Create a store backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("Using JSON Lines state store at {}", path.display());
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored state in file order
    pub fn load_all(&self) -> StoreResult<Vec<ElevatorState>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| parse_line(index, line))
            .collect()
    }
}

fn parse_line(index: usize, line: &str) -> StoreResult<ElevatorState> {
    serde_json::from_str(line).map_err(|source| StoreError::CorruptRecord { line: index + 1, source })
}

impl ElevatorStateStore for JsonlStore {
    fn get_last_elevator_state(&self) -> StoreResult<Option<ElevatorState>> {
        if !self.path.exists() {
            debug!("State store {} does not exist yet", self.path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .last()
            .map(|(index, line)| parse_line(index, line))
            .transpose()
    }

    fn create_elevator_state(
        &mut self,
        current_floor: i32,
        demand_floor: i32,
        next_floor: i32,
        date_str: &str,
    ) -> StoreResult<ElevatorState> {
        let state = ElevatorState::from_date_str(current_floor, demand_floor, next_floor, date_str)?;
        let json_line = serde_json::to_string(&state)?;

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", json_line)?;
        writer.flush()?;

        debug!("Appended state {} to {}", state.id, self.path.display());
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::new(dir.path().join("states.jsonl"));

        assert!(store.get_last_elevator_state().unwrap().is_none());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.jsonl");
        let mut store = JsonlStore::new(&path);

        let first = store.create_elevator_state(0, 3, 1, "2024-01-15 08:00:00").unwrap();
        let second = store.create_elevator_state(1, 2, 4, "2024-01-15 08:03:10").unwrap();

        assert_eq!(store.get_last_elevator_state().unwrap(), Some(second.clone()));
        assert_eq!(store.load_all().unwrap(), vec![first, second]);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_reopened_store_sees_previous_states() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.jsonl");

        let created = JsonlStore::new(&path)
            .create_elevator_state(-1, 2, 0, "2024-01-15 23:59:59")
            .unwrap();

        let reopened = JsonlStore::new(&path);
        assert_eq!(reopened.get_last_elevator_state().unwrap(), Some(created));
    }

    #[test]
    fn test_trailing_blank_lines_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.jsonl");
        let mut store = JsonlStore::new(&path);
        let created = store.create_elevator_state(2, 5, 3, "2024-01-15 10:00:00").unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   ").unwrap();

        assert_eq!(store.get_last_elevator_state().unwrap(), Some(created));
    }

    #[test]
    fn test_corrupt_record_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.jsonl");
        fs::write(&path, "{\"current_floor\": 1}\n").unwrap();

        let store = JsonlStore::new(&path);
        match store.get_last_elevator_state() {
            Err(StoreError::CorruptRecord { line, .. }) => assert_eq!(line, 1),
            other => panic!("Expected CorruptRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_parent_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonlStore::new(dir.path().join("missing").join("states.jsonl"));

        let result = store.create_elevator_state(0, 1, 2, "2024-01-15 08:00:00");
        assert!(matches!(result, Err(StoreError::IoError(_))));
    }
}
