//! Error types and handling
//!
//! This module contains the error taxonomy for a generation run. Every error
//! is terminal for the run that raised it; nothing here is retried.

use std::fmt;
use thiserror::Error;

use crate::store::StoreError;
use crate::types::{ConfigError, ConfigValidationError};

/// Store operation that was in flight when a store error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    /// Reading the most recent state to seed the cursor
    GetLastElevatorState,
    /// Persisting a generated state
    CreateElevatorState,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOperation::GetLastElevatorState => write!(f, "get_last_elevator_state"),
            StoreOperation::CreateElevatorState => write!(f, "create_elevator_state"),
        }
    }
}

fn row_suffix(row: &Option<usize>) -> String {
    row.map(|row| format!(" at row {}", row)).unwrap_or_default()
}

/// Errors that can occur during a generation run
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Parameters could not be loaded or failed validation
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(#[from] ConfigError),

    /// Parameters are valid but leave the sampler nothing to choose from
    #[error("Degenerate input: {0}")]
    DegenerateInputError(String),

    /// The external store failed to read or write
    #[error("Store operation {operation} failed{}: {source}", row_suffix(.row))]
    StoreError {
        /// Operation that failed
        operation: StoreOperation,
        /// 1-based row being generated, if the failure happened inside the loop
        row: Option<usize>,
        /// Underlying store failure
        source: StoreError,
    },
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(ConfigError::ValidationError(error))
    }
}

impl SimulationError {
    /// Create a degenerate input error
    pub fn degenerate_input(msg: impl Into<String>) -> Self {
        Self::DegenerateInputError(msg.into())
    }

    /// Wrap a store failure with the operation and row it happened in
    pub fn store_error(operation: StoreOperation, row: Option<usize>, source: StoreError) -> Self {
        Self::StoreError { operation, row, source }
    }

    /// Row index the error is attached to, if any
    pub fn row(&self) -> Option<usize> {
        match self {
            SimulationError::StoreError { row, .. } => *row,
            _ => None,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::DegenerateInputError(_) => "Degenerate Input",
            SimulationError::StoreError { .. } => "Store",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
