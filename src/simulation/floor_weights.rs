//! Floor weight derivation
//!
//! Turns floor-type capacities into one sampling weight per floor. Floors with
//! a larger capacity attract more calls.

use tracing::{debug, info, instrument, warn};

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{ConfigValidationError, SimulationParameters};

/// Round to three decimal places
///
/// Exact ties at 0.0005 round away from zero, not to even.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Normalized sampling weight per floor, in floor range order
#[derive(Debug, Clone, PartialEq)]
pub struct FloorWeights {
    floors: Vec<i32>,
    weights: Vec<f64>,
    uniform_fallback: bool,
}

impl FloorWeights {
    /// Derive weights from the floor capacities in `parameters`
    ///
    /// Each floor gets `1 / floor_number` plus its capacity rescaled to
    /// `[0, 1]` between the smallest and largest capacity in the building.
    /// The result is normalized and rounded to three decimals. When every
    /// floor has the same capacity the rescaling is undefined and uniform
    /// weights are used instead.
    #[instrument(skip_all, fields(floor_count = parameters.floor_count()))]
    pub fn derive(parameters: &SimulationParameters) -> SimulationResult<Self> {
        let floors: Vec<i32> = parameters.floor_range().collect();
        if floors.is_empty() {
            return Err(SimulationError::degenerate_input(format!(
                "floor range [{}, {}) is empty",
                parameters.negative_floor_number, parameters.floor_number
            )));
        }

        let capacities = floors
            .iter()
            .map(|&floor| {
                parameters.floor_capacity(floor).ok_or_else(|| ConfigValidationError::UnknownFloorType {
                    floor,
                    floor_type: parameters.floor_type(floor).to_string(),
                })
            })
            .collect::<Result<Vec<u32>, _>>()?;

        // Non-empty, checked above
        let min_capacity = capacities.iter().copied().min().unwrap_or_default();
        let max_capacity = capacities.iter().copied().max().unwrap_or_default();

        let uniform_fallback = min_capacity == max_capacity;
        let raw_weights: Vec<f64> = if uniform_fallback {
            warn!(
                "All {} floors share capacity {}, falling back to uniform floor weights",
                floors.len(),
                min_capacity
            );
            vec![1.0; floors.len()]
        } else {
            let base_weight = 1.0 / f64::from(parameters.floor_number);
            let spread = f64::from(max_capacity - min_capacity);
            capacities
                .iter()
                .map(|&capacity| base_weight + f64::from(capacity - min_capacity) / spread)
                .collect()
        };

        let total: f64 = raw_weights.iter().sum();
        let weights: Vec<f64> = raw_weights.iter().map(|w| round3(w / total)).collect();

        for (floor, weight) in floors.iter().zip(&weights) {
            debug!("Floor {} ({}): weight {:.3}", floor, parameters.floor_type(*floor), weight);
        }
        info!(
            "Derived weights for {} floors (capacity {}..={}, weight sum {:.3})",
            floors.len(),
            min_capacity,
            max_capacity,
            weights.iter().sum::<f64>()
        );

        Ok(Self { floors, weights, uniform_fallback })
    }

    /// Floors in range order
    pub fn floors(&self) -> &[i32] {
        &self.floors
    }

    /// Weights aligned with [`floors`](Self::floors)
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight of a single floor
    pub fn weight_of(&self, floor: i32) -> Option<f64> {
        self.floors.iter().position(|f| *f == floor).map(|index| self.weights[index])
    }

    /// `(floor, weight)` pairs in range order
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.floors.iter().copied().zip(self.weights.iter().copied())
    }

    /// Number of floors
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    /// Whether there are no floors
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Sum of the rounded weights
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Whether equal capacities forced uniform weights
    pub fn used_uniform_fallback(&self) -> bool {
        self.uniform_fallback
    }

    /// Number of floors that can actually be drawn
    pub fn positive_count(&self) -> usize {
        self.weights.iter().filter(|w| **w > 0.0).count()
    }
}
