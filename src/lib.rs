//! Elevator Dataset Generator
//!
//! Generates synthetic, chained elevator usage events for seeding analytics
//! and forecasting datasets.
//!
//! # Overview
//!
//! Each generated row records where the elevator was, which floor called it,
//! where it went next and when the call happened. Rows are chained: a row
//! starts on the floor the previous one ended on, and its call datetime is
//! strictly later. Separate runs continue from the last persisted row.
//!
//! ## Key Features
//!
//! - **Capacity-Weighted Floors**: busier floor types attract more calls
//! - **Peak Hours**: calls arrive faster inside configured hour windows
//! - **Travel Lag**: intervals grow with the distance the elevator travels
//! - **Pluggable Persistence**: any [`store::ElevatorStateStore`] can receive the rows
//!
//! ## Quick Start
//!
//! ```rust
//! use elevator_dataset_generator::*;
//!
//! let parameters = SimulationParameters { rows_to_generate: 10, ..Default::default() };
//! let mut engine = GenerationEngine::from_seed(parameters, InMemoryStore::new(), Some(7))?;
//!
//! let statistics = engine.run()?;
//! println!("Generated {} rows", statistics.rows_generated);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Parameters, identifiers, and CLI arguments
//! - [`store`]: Elevator state records and persistence
//! - [`simulation`]: Weighting, sampling, intervals, and the generation engine
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod simulation;
pub mod store;
pub mod types;

// Parameters and identifiers
pub use types::{
    CliArgs, ConfigError, ConfigValidationError, ElevatorStateId, PeakWindow, RandomMinutesRange,
    SimulationParameters,
};

// Persistence
pub use store::{ElevatorState, ElevatorStateStore, InMemoryStore, JsonlStore, StoreError};

// Generation
pub use simulation::{
    CursorOrigin, FloorSampler, FloorWeights, GenerationEngine, IntervalCalculator, LoggingConfig,
    RunStatistics, SimulationCursor, SimulationError, SimulationResult,
};
