//! Elevator state persistence
//!
//! The generation engine only ever reads the most recent state and appends
//! new ones, so stores expose exactly those two operations.
//!
//! # Overview
//!
//! - **ElevatorStateStore**: the narrow store interface injected into the engine
//! - **InMemoryStore**: `Vec`-backed store for tests and embedding
//! - **JsonlStore**: append-only JSON Lines file used by the binary
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dataset_generator::store::*;
//!
//! let mut store = InMemoryStore::new();
//! assert!(store.get_last_elevator_state().unwrap().is_none());
//!
//! let created = store.create_elevator_state(3, 7, 5, "2024-01-15 08:30:00").unwrap();
//! let last = store.get_last_elevator_state().unwrap().unwrap();
//! assert_eq!(last, created);
//! ```

pub mod jsonl;
pub mod memory;
pub mod state;

pub use jsonl::*;
pub use memory::*;
pub use state::*;

use thiserror::Error;

/// Errors raised by state stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error
    #[error("Store I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Store serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A date string did not match `YYYY-MM-DD HH:MM:SS`
    #[error("Invalid call datetime '{value}': {source}")]
    InvalidDatetime {
        /// The rejected string
        value: String,
        /// Parse failure
        source: chrono::ParseError,
    },

    /// A persisted record could not be decoded
    #[error("Corrupt record at line {line}: {source}")]
    CorruptRecord {
        /// 1-based line number
        line: usize,
        /// Decode failure
        source: serde_json::Error,
    },

    /// The backing store cannot be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence capability consumed by the generation engine
pub trait ElevatorStateStore {
    /// Most recently created state, or `None` if the store is empty
    fn get_last_elevator_state(&self) -> StoreResult<Option<ElevatorState>>;

    /// Persist a new state and return it
    ///
    /// `date_str` is formatted `YYYY-MM-DD HH:MM:SS`.
    fn create_elevator_state(
        &mut self,
        current_floor: i32,
        demand_floor: i32,
        next_floor: i32,
        date_str: &str,
    ) -> StoreResult<ElevatorState>;
}

impl<S: ElevatorStateStore + ?Sized> ElevatorStateStore for &mut S {
    fn get_last_elevator_state(&self) -> StoreResult<Option<ElevatorState>> {
        (**self).get_last_elevator_state()
    }

    fn create_elevator_state(
        &mut self,
        current_floor: i32,
        demand_floor: i32,
        next_floor: i32,
        date_str: &str,
    ) -> StoreResult<ElevatorState> {
        (**self).create_elevator_state(current_floor, demand_floor, next_floor, date_str)
    }
}
