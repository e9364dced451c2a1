//! Statistics collection and reporting
//!
//! This module contains the per-run statistics gathered by the generation engine.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::simulation::{CursorOrigin, IntervalBreakdown};
use crate::store::ElevatorState;

/// Statistics for a single generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Whether the run resumed from the store or started cold
    pub origin: CursorOrigin,
    /// Number of states persisted
    pub rows_generated: usize,
    /// Rows whose interval started inside a peak window
    pub peak_rows: usize,
    /// Simulated clock the run started from
    pub seed_time: NaiveDateTime,
    /// Call datetime of the first persisted state
    pub first_call: Option<NaiveDateTime>,
    /// Call datetime of the last persisted state
    pub last_call: Option<NaiveDateTime>,
    /// Sum of the computed intervals, before truncation to whole seconds
    pub total_interval_minutes: f64,
    /// Number of times each floor was the next floor
    pub floor_visits: BTreeMap<i32, usize>,
    /// Wall-clock duration of the run
    pub run_duration: Duration,
}

impl RunStatistics {
    /// Create empty statistics for a run seeded at `seed_time`
    pub fn new(origin: CursorOrigin, seed_time: NaiveDateTime) -> Self {
        Self {
            origin,
            rows_generated: 0,
            peak_rows: 0,
            seed_time,
            first_call: None,
            last_call: None,
            total_interval_minutes: 0.0,
            floor_visits: BTreeMap::new(),
            run_duration: Duration::ZERO,
        }
    }

    /// Record one persisted row
    pub fn record(&mut self, state: &ElevatorState, interval: &IntervalBreakdown) {
        self.rows_generated += 1;
        if interval.is_peak {
            self.peak_rows += 1;
        }
        self.total_interval_minutes += interval.total_minutes();
        *self.floor_visits.entry(state.next_floor).or_insert(0) += 1;

        if self.first_call.is_none() {
            self.first_call = Some(state.call_datetime);
        }
        self.last_call = Some(state.call_datetime);
    }

    /// Set the wall-clock duration
    pub fn set_run_duration(&mut self, duration: Duration) {
        self.run_duration = duration;
    }

    /// Percentage of rows generated during peak windows
    pub fn peak_percentage(&self) -> f64 {
        if self.rows_generated == 0 {
            0.0
        } else {
            (self.peak_rows as f64 / self.rows_generated as f64) * 100.0
        }
    }

    /// Mean computed interval in minutes
    pub fn average_interval_minutes(&self) -> f64 {
        if self.rows_generated == 0 {
            0.0
        } else {
            self.total_interval_minutes / self.rows_generated as f64
        }
    }

    /// Simulated time between the seed clock and the last call
    pub fn simulated_span(&self) -> chrono::Duration {
        self.last_call
            .map(|last| last - self.seed_time)
            .unwrap_or_else(chrono::Duration::zero)
    }

    /// Floor with the most visits, lowest floor on ties
    pub fn busiest_floor(&self) -> Option<(i32, usize)> {
        self.floor_visits
            .iter()
            .fold(None, |best: Option<(i32, usize)>, (&floor, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((floor, count)),
            })
    }

    /// Generate a human-readable summary
    pub fn generate_summary_output(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Generation Summary ===\n\n");
        report.push_str(&format!(
            "Run Duration: {:.2} seconds\n",
            self.run_duration.as_secs_f64()
        ));
        let origin = match self.origin {
            CursorOrigin::ColdStart => "cold start",
            CursorOrigin::Resumed => "resumed from store",
        };
        report.push_str(&format!("Seeded: {} at {}\n\n", origin, self.seed_time));

        report.push_str("Rows:\n");
        report.push_str(&format!("  • Generated: {}\n", self.rows_generated));
        report.push_str(&format!(
            "  • Peak Window: {} ({:.1}%)\n",
            self.peak_rows,
            self.peak_percentage()
        ));
        if let Some((floor, count)) = self.busiest_floor() {
            report.push_str(&format!("  • Busiest Floor: {} ({} visits)\n", floor, count));
        }

        report.push_str("\nSimulated Time:\n");
        match (self.first_call, self.last_call) {
            (Some(first), Some(last)) => {
                report.push_str(&format!("  • First Call: {}\n", first));
                report.push_str(&format!("  • Last Call: {}\n", last));
            }
            _ => report.push_str("  • No calls generated\n"),
        }
        report.push_str(&format!(
            "  • Span: {} minutes\n",
            self.simulated_span().num_minutes()
        ));
        report.push_str(&format!(
            "  • Average Interval: {:.2} minutes\n",
            self.average_interval_minutes()
        ));

        report
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    fn interval(random_minutes: u32, is_peak: bool) -> IntervalBreakdown {
        IntervalBreakdown {
            random_minutes,
            multiplier: if is_peak { 0.5 } else { 1.0 },
            current_lag_minutes: 0.0,
            next_lag_minutes: 0.0,
            is_peak,
        }
    }

    #[test]
    fn test_empty_statistics() {
        let stats = RunStatistics::new(CursorOrigin::ColdStart, at(8, 0, 0));
        assert_eq!(stats.rows_generated, 0);
        assert_eq!(stats.peak_percentage(), 0.0);
        assert_eq!(stats.average_interval_minutes(), 0.0);
        assert_eq!(stats.simulated_span(), chrono::Duration::zero());
        assert!(stats.busiest_floor().is_none());
        assert!(stats.generate_summary_output().contains("No calls generated"));
    }

    #[test]
    fn test_record_rows() {
        let mut stats = RunStatistics::new(CursorOrigin::Resumed, at(8, 0, 0));
        stats.record(&ElevatorState::new(0, 3, 2, at(8, 2, 0)), &interval(4, true));
        stats.record(&ElevatorState::new(2, 5, 4, at(8, 10, 0)), &interval(8, false));
        stats.record(&ElevatorState::new(4, 1, 2, at(8, 16, 30)), &interval(6, false));

        assert_eq!(stats.rows_generated, 3);
        assert_eq!(stats.peak_rows, 1);
        assert!((stats.peak_percentage() - 100.0 / 3.0).abs() < 1e-9);
        assert!((stats.average_interval_minutes() - 16.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.first_call, Some(at(8, 2, 0)));
        assert_eq!(stats.last_call, Some(at(8, 16, 30)));
        assert_eq!(stats.simulated_span().num_minutes(), 16);
        assert_eq!(stats.busiest_floor(), Some((2, 2)));
    }

    #[test]
    fn test_summary_output() {
        let mut stats = RunStatistics::new(CursorOrigin::Resumed, at(8, 0, 0));
        stats.record(&ElevatorState::new(0, 3, 2, at(8, 2, 0)), &interval(2, false));
        stats.set_run_duration(Duration::from_millis(1500));

        let summary = stats.to_string();
        assert!(summary.contains("=== Generation Summary ==="));
        assert!(summary.contains("Run Duration: 1.50 seconds"));
        assert!(summary.contains("resumed from store"));
        assert!(summary.contains("Generated: 1"));
        assert!(summary.contains("Busiest Floor: 2 (1 visits)"));
        assert!(summary.contains("Average Interval: 2.00 minutes"));
    }
}
