//! Core types and identifiers for the elevator dataset generator
//!
//! This module contains the parameter structures, their validation, the
//! command line interface and the identifier types for persisted states.
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_dataset_generator::types::*;
//!
//! let params = SimulationParameters {
//!     rows_to_generate: 25,
//!     ..Default::default()
//! };
//! params.validate().unwrap();
//!
//! assert_eq!(params.floor_type(40), DEFAULT_FLOOR_TYPE);
//! let state_id = ElevatorStateId::new();
//! assert!(state_id.to_string().starts_with("STATE_"));
//! ```

pub mod config;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use identifiers::*;
