//! Simulation cursor and seeding
//!
//! The cursor is the position the generator continues from: where the
//! elevator is, where the pending call comes from, and the simulated clock.

use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::simulation::FloorSampler;
use crate::store::{ElevatorState, ElevatorStateStore, StoreResult};

/// How a cursor was seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorOrigin {
    /// The store was empty; floors were drawn and the clock set to the run start
    ColdStart,
    /// Continued from the most recently persisted state
    Resumed,
}

/// Mutable simulation position carried between rows and across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationCursor {
    /// Floor the elevator is on
    pub current_floor: i32,
    /// Floor of the pending call
    pub demand_floor: i32,
    /// Simulated clock the next interval is added to, at full precision
    pub start_time: NaiveDateTime,
    /// Second-precision call datetime of the most recently persisted state
    pub last_persisted: Option<NaiveDateTime>,
}

impl SimulationCursor {
    /// Create a cursor at an explicit position
    pub fn new(current_floor: i32, demand_floor: i32, start_time: NaiveDateTime) -> Self {
        Self { current_floor, demand_floor, start_time, last_persisted: None }
    }

    /// Continue from a persisted state
    pub fn from_last_state(state: &ElevatorState) -> Self {
        Self {
            last_persisted: Some(state.call_datetime),
            ..Self::new(state.next_floor, state.demand_floor, state.call_datetime)
        }
    }

    /// Draw both floors independently and start the clock at `start_time`
    pub fn cold_start<R: Rng + ?Sized>(
        sampler: &FloorSampler,
        rng: &mut R,
        start_time: NaiveDateTime,
    ) -> Self {
        let current_floor = sampler.pick_weighted_floor(rng);
        let demand_floor = sampler.pick_weighted_floor(rng);
        Self::new(current_floor, demand_floor, start_time)
    }

    /// Seed from the store's last state, or cold start if it is empty
    pub fn seed<S, R>(
        store: &S,
        sampler: &FloorSampler,
        rng: &mut R,
        run_start: NaiveDateTime,
    ) -> StoreResult<(Self, CursorOrigin)>
    where
        S: ElevatorStateStore + ?Sized,
        R: Rng + ?Sized,
    {
        match store.get_last_elevator_state()? {
            Some(last) => {
                let cursor = Self::from_last_state(&last);
                info!(
                    "Resuming from state {}: current floor {}, demand floor {}, clock {}",
                    last.id, cursor.current_floor, cursor.demand_floor, cursor.start_time
                );
                Ok((cursor, CursorOrigin::Resumed))
            }
            None => {
                let cursor = Self::cold_start(sampler, rng, run_start);
                info!(
                    "Empty store, cold start: current floor {}, demand floor {}, clock {}",
                    cursor.current_floor, cursor.demand_floor, cursor.start_time
                );
                Ok((cursor, CursorOrigin::ColdStart))
            }
        }
    }

    /// Floors between the elevator and the pending call
    pub fn current_distance(&self) -> u32 {
        self.current_floor.abs_diff(self.demand_floor)
    }

    /// Move to the next row
    ///
    /// `call_datetime` is the unrounded clock; `persisted` is what the store
    /// recorded for the row.
    pub fn advance(
        &mut self,
        next_floor: i32,
        demand_floor: i32,
        call_datetime: NaiveDateTime,
        persisted: NaiveDateTime,
    ) {
        self.current_floor = next_floor;
        self.demand_floor = demand_floor;
        self.start_time = call_datetime;
        self.last_persisted = Some(persisted);
    }
}
