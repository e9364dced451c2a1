//! Weighted floor sampling

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::trace;

use crate::simulation::{FloorWeights, SimulationError, SimulationResult};

/// Draws floors with probability proportional to their weight
#[derive(Debug, Clone)]
pub struct FloorSampler {
    floors: Vec<i32>,
    weights: Vec<f64>,
    distribution: WeightedIndex<f64>,
}

impl FloorSampler {
    /// Build a sampler over the floors in `weights`
    ///
    /// Weights do not need to sum to exactly one, but at least one must be
    /// positive.
    pub fn new(weights: &FloorWeights) -> SimulationResult<Self> {
        let distribution = WeightedIndex::new(weights.weights()).map_err(|e| {
            SimulationError::degenerate_input(format!("floor weights cannot be sampled: {}", e))
        })?;

        Ok(Self {
            floors: weights.floors().to_vec(),
            weights: weights.weights().to_vec(),
            distribution,
        })
    }

    /// Floors this sampler draws from
    pub fn floors(&self) -> &[i32] {
        &self.floors
    }

    /// Single unconditional weighted draw
    pub fn pick_weighted_floor<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        self.floors[self.distribution.sample(rng)]
    }

    /// Whether some floor other than `floor` has a chance of being drawn
    pub fn has_alternative_to(&self, floor: i32) -> bool {
        self.floors.iter().zip(&self.weights).any(|(f, w)| *f != floor && *w > 0.0)
    }

    /// Weighted draw that never returns `demand_floor`
    ///
    /// Redraws until the result differs from the demand floor. Fails instead
    /// of looping forever when no other floor can be drawn.
    pub fn pick_next_floor<R: Rng + ?Sized>(&self, demand_floor: i32, rng: &mut R) -> SimulationResult<i32> {
        if !self.has_alternative_to(demand_floor) {
            return Err(SimulationError::degenerate_input(format!(
                "no floor other than {} can be drawn from {:?}",
                demand_floor, self.floors
            )));
        }

        let mut redraws = 0usize;
        loop {
            let floor = self.pick_weighted_floor(rng);
            if floor != demand_floor {
                if redraws > 0 {
                    trace!("Drew next floor {} after {} redraws", floor, redraws);
                }
                return Ok(floor);
            }
            redraws += 1;
        }
    }
}
