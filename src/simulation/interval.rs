//! Inter-event time model
//!
//! The gap between two calls is a random number of minutes, scaled down
//! during peak hours, plus a travel lag for the elevator's distance to the
//! demand floor before and after the move.

use chrono::{Duration, NaiveDateTime, Timelike};
use rand::Rng;

use crate::simulation::SimulationCursor;
use crate::types::{PeakWindow, RandomMinutesRange, SimulationParameters};

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Convert fractional minutes to a duration with millisecond precision
pub fn minutes_to_duration(minutes: f64) -> Duration {
    Duration::milliseconds((minutes * SECONDS_PER_MINUTE * 1000.0).round() as i64)
}

/// Components of one computed interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalBreakdown {
    /// Uniform draw from the random minutes range
    pub random_minutes: u32,
    /// Peak multiplier, or 1.0 outside peak windows
    pub multiplier: f64,
    /// Lag for the current floor to demand floor distance
    pub current_lag_minutes: f64,
    /// Lag for the next floor to demand floor distance
    pub next_lag_minutes: f64,
    /// Whether the start time fell in a peak window
    pub is_peak: bool,
}

impl IntervalBreakdown {
    /// Total interval in minutes
    pub fn total_minutes(&self) -> f64 {
        f64::from(self.random_minutes) * self.multiplier + self.current_lag_minutes + self.next_lag_minutes
    }

    /// Total interval as a duration
    pub fn as_duration(&self) -> Duration {
        minutes_to_duration(self.total_minutes())
    }
}

/// Computes the simulated time between consecutive calls
#[derive(Debug, Clone)]
pub struct IntervalCalculator {
    min_interval_seconds: f64,
    max_interval_seconds: f64,
    interval_per_floor_seconds: f64,
    peak_hours: Vec<PeakWindow>,
    peak_multiplier: f64,
    random_minutes_range: RandomMinutesRange,
}

impl IntervalCalculator {
    /// Create a calculator from the run parameters
    pub fn new(parameters: &SimulationParameters) -> Self {
        Self {
            min_interval_seconds: f64::from(parameters.min_interval_seconds),
            max_interval_seconds: f64::from(parameters.max_interval_seconds),
            interval_per_floor_seconds: parameters.interval_per_floor_seconds,
            peak_hours: parameters.peak_hours.clone(),
            peak_multiplier: parameters.peak_multiplier,
            random_minutes_range: parameters.random_minutes_range,
        }
    }

    /// Travel lag in minutes for a distance in floors
    ///
    /// Adjacent or same-floor moves cost the minimum interval; longer moves
    /// cost `distance * interval_per_floor_seconds`, capped at the maximum.
    pub fn floor_lag_minutes(&self, distance: u32) -> f64 {
        let seconds = if distance <= 1 {
            self.min_interval_seconds
        } else {
            (f64::from(distance) * self.interval_per_floor_seconds).min(self.max_interval_seconds)
        };
        seconds / SECONDS_PER_MINUTE
    }

    /// Whether `time`'s hour falls in any `[start, end)` peak window
    pub fn is_peak_time(&self, time: &NaiveDateTime) -> bool {
        let hour = time.hour();
        self.peak_hours.iter().any(|window| window.contains_hour(hour))
    }

    /// Multiplier applied to the random minutes at `time`
    pub fn peak_interval_multiplier(&self, time: &NaiveDateTime) -> f64 {
        if self.is_peak_time(time) {
            self.peak_multiplier
        } else {
            1.0
        }
    }

    /// Compute the interval components for moving from the cursor to `next_floor`
    pub fn calculate<R: Rng + ?Sized>(
        &self,
        cursor: &SimulationCursor,
        next_floor: i32,
        rng: &mut R,
    ) -> IntervalBreakdown {
        let current_lag_minutes = self.floor_lag_minutes(cursor.current_distance());
        let next_lag_minutes = self.floor_lag_minutes(next_floor.abs_diff(cursor.demand_floor));

        let is_peak = self.is_peak_time(&cursor.start_time);
        let multiplier = self.peak_interval_multiplier(&cursor.start_time);
        let random_minutes =
            rng.gen_range(self.random_minutes_range.min..=self.random_minutes_range.max);

        IntervalBreakdown { random_minutes, multiplier, current_lag_minutes, next_lag_minutes, is_peak }
    }
}
