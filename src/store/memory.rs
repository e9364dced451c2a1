//! In-memory state store

use tracing::debug;

use crate::store::{ElevatorState, ElevatorStateStore, StoreResult};

/// `Vec`-backed store keeping states in creation order
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    states: Vec<ElevatorState>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `states`
    pub fn with_states(states: Vec<ElevatorState>) -> Self {
        Self { states }
    }

    /// All states in creation order
    pub fn states(&self) -> &[ElevatorState] {
        &self.states
    }

    /// Number of stored states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the store holds no states
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl ElevatorStateStore for InMemoryStore {
    fn get_last_elevator_state(&self) -> StoreResult<Option<ElevatorState>> {
        Ok(self.states.last().cloned())
    }

    fn create_elevator_state(
        &mut self,
        current_floor: i32,
        demand_floor: i32,
        next_floor: i32,
        date_str: &str,
    ) -> StoreResult<ElevatorState> {
        let state = ElevatorState::from_date_str(current_floor, demand_floor, next_floor, date_str)?;
        debug!("Stored state {} in memory ({} total)", state.id, self.states.len() + 1);
        self.states.push(state.clone());
        Ok(state)
    }
}
