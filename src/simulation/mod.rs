//! Generation engine and its building blocks
//!
//! This module contains the generation engine, floor weighting and sampling,
//! the interval model, run statistics, logging and error handling.
//!
//! # Overview
//!
//! - **GenerationEngine**: drives a run and persists each row through the store
//! - **FloorWeights** / **FloorSampler**: capacity-derived floor weights and weighted draws
//! - **IntervalCalculator**: random minutes, peak multiplier and travel lag
//! - **SimulationCursor**: current floor, demand floor and simulated clock
//! - **RunStatistics**: per-run counters and summary output
//! - **SimulationError**: error taxonomy for a run
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dataset_generator::simulation::*;
//! use elevator_dataset_generator::store::InMemoryStore;
//! use elevator_dataset_generator::types::SimulationParameters;
//!
//! let parameters = SimulationParameters { rows_to_generate: 25, ..Default::default() };
//! let mut engine = GenerationEngine::from_seed(parameters, InMemoryStore::new(), Some(42)).unwrap();
//!
//! let statistics = engine.run().unwrap();
//! assert_eq!(statistics.rows_generated, 25);
//! assert_eq!(engine.store().len(), 25);
//! ```

pub mod cursor;
pub mod error;
pub mod floor_weights;
pub mod generator;
pub mod interval;
pub mod logging;
pub mod sampler;
pub mod statistics;

// Re-export all public types for convenience
pub use cursor::*;
pub use error::*;
pub use floor_weights::*;
pub use generator::*;
pub use interval::*;
pub use logging::*;
pub use sampler::*;
pub use statistics::*;
