//! Elevator state generation engine
//!
//! Drives one generation run: seeds the cursor from the store, then emits
//! `rows_to_generate` chained states, each persisted before the next is
//! computed.

use chrono::{Duration, Local, NaiveDateTime, SubsecRound};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::sim_event;
use crate::simulation::{
    CursorOrigin, FloorSampler, FloorWeights, IntervalBreakdown, IntervalCalculator, RunStatistics,
    SimulationCursor, SimulationError, SimulationResult, StoreOperation,
};
use crate::store::{format_call_datetime, ElevatorState, ElevatorStateStore};
use crate::types::SimulationParameters;

/// Second-precision datetime to persist for the clock value `call_datetime`
///
/// Always later than `last_persisted`, bumping by one second when truncation
/// would land on or before it.
pub fn persisted_call_datetime(
    call_datetime: NaiveDateTime,
    last_persisted: Option<NaiveDateTime>,
) -> NaiveDateTime {
    let truncated = call_datetime.trunc_subsecs(0);
    match last_persisted {
        Some(previous) if truncated <= previous => previous + Duration::seconds(1),
        _ => truncated,
    }
}

/// Generates chained elevator states into an [`ElevatorStateStore`]
#[derive(Debug)]
pub struct GenerationEngine<S, R = StdRng>
where
    S: ElevatorStateStore,
    R: Rng,
{
    parameters: SimulationParameters,
    weights: FloorWeights,
    sampler: FloorSampler,
    intervals: IntervalCalculator,
    store: S,
    rng: R,
    run_start: Option<NaiveDateTime>,
}

impl<S: ElevatorStateStore> GenerationEngine<S, StdRng> {
    /// Create an engine with a seeded or entropy-based [`StdRng`]
    pub fn from_seed(parameters: SimulationParameters, store: S, seed: Option<u64>) -> SimulationResult<Self> {
        let rng = if let Some(seed) = seed {
            info!("Using deterministic seed: {}", seed);
            StdRng::seed_from_u64(seed)
        } else {
            debug!("Using entropy-based random seed");
            StdRng::from_entropy()
        };
        Self::new(parameters, store, rng)
    }
}

impl<S, R> GenerationEngine<S, R>
where
    S: ElevatorStateStore,
    R: Rng,
{
    /// Create an engine over `store`
    ///
    /// Validates the parameters and derives floor weights up front. Fails with
    /// [`SimulationError::DegenerateInputError`] when fewer than two floors
    /// can be drawn, since every row needs a next floor distinct from the
    /// demand floor.
    #[instrument(skip_all, fields(rows = parameters.rows_to_generate, floor_count = parameters.floor_count()))]
    pub fn new(parameters: SimulationParameters, store: S, rng: R) -> SimulationResult<Self> {
        parameters.validate()?;

        let weights = FloorWeights::derive(&parameters)?;
        if weights.positive_count() < 2 {
            return Err(SimulationError::degenerate_input(format!(
                "at least two floors need a positive weight, found {} in [{}, {})",
                weights.positive_count(),
                parameters.negative_floor_number,
                parameters.floor_number
            )));
        }

        let sampler = FloorSampler::new(&weights)?;
        let intervals = IntervalCalculator::new(&parameters);

        info!(
            "Generation engine ready: {} rows over floors [{}, {})",
            parameters.rows_to_generate, parameters.negative_floor_number, parameters.floor_number
        );

        Ok(Self { parameters, weights, sampler, intervals, store, rng, run_start: None })
    }

    /// Clock to cold start from instead of the local time at [`run`](Self::run)
    pub fn with_run_start(mut self, run_start: NaiveDateTime) -> Self {
        self.run_start = Some(run_start);
        self
    }

    /// Parameters for this engine
    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    /// Derived floor weights
    pub fn weights(&self) -> &FloorWeights {
        &self.weights
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the engine and return its store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Seed a cursor from the store, cold starting at `run_start` if it is empty
    pub fn seed_cursor(&mut self, run_start: NaiveDateTime) -> SimulationResult<(SimulationCursor, CursorOrigin)> {
        SimulationCursor::seed(&self.store, &self.sampler, &mut self.rng, run_start)
            .map_err(|e| SimulationError::store_error(StoreOperation::GetLastElevatorState, None, e))
    }

    /// Generate, persist and advance past a single row
    ///
    /// `row` is the 1-based index used in error reports.
    pub fn generate_row(
        &mut self,
        cursor: &mut SimulationCursor,
        row: usize,
    ) -> SimulationResult<(ElevatorState, IntervalBreakdown)> {
        let next_floor = self.sampler.pick_next_floor(cursor.demand_floor, &mut self.rng)?;
        let interval = self.intervals.calculate(cursor, next_floor, &mut self.rng);
        let call_datetime = cursor
            .start_time
            .checked_add_signed(interval.as_duration())
            .ok_or_else(|| {
                SimulationError::degenerate_input(format!(
                    "simulated clock overflows at row {}: {} + {:.2} minutes",
                    row,
                    cursor.start_time,
                    interval.total_minutes()
                ))
            })?;
        let persisted = persisted_call_datetime(call_datetime, cursor.last_persisted);

        let state = self
            .store
            .create_elevator_state(
                cursor.current_floor,
                cursor.demand_floor,
                next_floor,
                &format_call_datetime(&persisted),
            )
            .map_err(|e| SimulationError::store_error(StoreOperation::CreateElevatorState, Some(row), e))?;

        debug!(
            "Row {}: floor {} -> {} (demand {}), +{:.2} min{}, call at {}",
            row,
            state.current_floor,
            state.next_floor,
            state.demand_floor,
            interval.total_minutes(),
            if interval.is_peak { " [peak]" } else { "" },
            state.date_string()
        );

        let demand_floor = self.sampler.pick_weighted_floor(&mut self.rng);
        cursor.advance(next_floor, demand_floor, call_datetime, state.call_datetime);

        Ok((state, interval))
    }

    /// Run the full generation loop
    #[instrument(skip(self), fields(rows = self.parameters.rows_to_generate))]
    pub fn run(&mut self) -> SimulationResult<RunStatistics> {
        let started = Instant::now();
        let rows = self.parameters.rows_to_generate;
        let run_start = self.run_start.unwrap_or_else(|| Local::now().naive_local());

        let (mut cursor, origin) = self.seed_cursor(run_start)?;
        let mut statistics = RunStatistics::new(origin, cursor.start_time);

        info!("Generating {} elevator states from {}", rows, cursor.start_time);
        let progress_step = (rows / 10).max(1);

        for row in 1..=rows {
            let (state, interval) = self.generate_row(&mut cursor, row)?;
            statistics.record(&state, &interval);

            if row % progress_step == 0 && row < rows {
                info!("Generated {} of {} states, clock at {}", row, rows, cursor.start_time);
            }
        }

        statistics.set_run_duration(started.elapsed());
        sim_event!(
            info,
            "Generation run complete",
            rows_generated = statistics.rows_generated,
            peak_rows = statistics.peak_rows,
            simulated_minutes = statistics.simulated_span().num_minutes(),
            elapsed_ms = statistics.run_duration.as_millis() as u64,
        );

        Ok(statistics)
    }
}
