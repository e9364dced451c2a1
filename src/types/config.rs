//! Configuration structures for the elevator dataset generator
//!
//! This module contains the simulation parameters, the raw parameters file
//! representation, the command line interface and the validation logic that
//! runs before any sampling or persistence takes place.

use chrono::NaiveDateTime;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::ops::Range;
use std::path::Path;

/// Floor-type label used for floors absent from `floor_types`
pub const DEFAULT_FLOOR_TYPE: &str = "Residential";

/// Default location of the parameters file
pub const DEFAULT_CONFIG_PATH: &str = "elevator_variables.json";

/// Default location of the JSON Lines state store
pub const DEFAULT_STORE_PATH: &str = "elevator_states.jsonl";

/// Datetime layout shared by the CLI and the state store
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Last valid hour bound for a peak window (end is exclusive)
const HOURS_PER_DAY: u32 = 24;

/// An hour-of-day window during which the random delay is scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakWindow {
    /// First hour inside the window
    pub start: u32,
    /// First hour after the window (exclusive)
    pub end: u32,
}

impl PeakWindow {
    /// Create a new peak window
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Check whether `hour` falls in `[start, end)`
    pub fn contains_hour(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }
}

/// Inclusive bounds for the uniform random minutes component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomMinutesRange {
    /// Smallest value that can be drawn
    pub min: u32,
    /// Largest value that can be drawn
    pub max: u32,
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "elevator-dataset-generator",
    version = "0.1.0",
    about = "Elevator Dataset Generator - Generates chained elevator usage events",
    long_about = "Generates a time-ordered sequence of plausible elevator calls for a building and appends them to a state store. Each run resumes from the last stored state so consecutive runs form one continuous stream.

EXAMPLES:
    # Run with the default parameters file and store
    elevator-dataset-generator

    # Use a specific parameters file and store
    elevator-dataset-generator --config building.json --store states.jsonl

    # Generate a parameters template
    elevator-dataset-generator --print-config > building.json

    # Validate parameters and show floor weights without generating
    elevator-dataset-generator --config building.json --dry-run

    # Reproducible run with a fixed cold-start clock
    elevator-dataset-generator --seed 42 --start-time '2024-01-15 08:00:00'"
)]
pub struct CliArgs {
    /// Parameters file path (JSON format)
    #[arg(
        short,
        long,
        default_value = DEFAULT_CONFIG_PATH,
        help = "Parameters file path (JSON format)"
    )]
    pub config: String,

    /// JSON Lines file holding persisted elevator states
    #[arg(
        short,
        long,
        default_value = DEFAULT_STORE_PATH,
        help = "State store path (JSON Lines)",
        long_help = "Path to the JSON Lines state store. New states are appended; the last line seeds the next run."
    )]
    pub store: String,

    /// Override for the number of rows to generate
    #[arg(long, help = "Number of rows to generate (overrides the parameters file)")]
    pub rows: Option<usize>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Simulated clock used when the store is empty
    #[arg(
        long,
        help = "Cold-start clock, formatted 'YYYY-MM-DD HH:MM:SS'",
        long_help = "Simulated start time used only when the store holds no previous state. Defaults to the local wall clock."
    )]
    pub start_time: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Directory for daily rolling log files
    #[arg(long, help = "Also write logs to daily rolling files in this directory")]
    pub log_dir: Option<String>,

    /// Dry run mode - validate parameters without generating states
    #[arg(long, help = "Validate parameters and print floor weights without generating")]
    pub dry_run: bool,

    /// Print default parameters and exit
    #[arg(long, help = "Print default parameters in JSON format and exit")]
    pub print_config: bool,
}

impl CliArgs {
    /// Parse the `--start-time` override, if any
    pub fn parsed_start_time(&self) -> Result<Option<NaiveDateTime>, ConfigError> {
        self.start_time
            .as_deref()
            .map(|raw| {
                NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
                    .map_err(|e| ConfigError::InvalidStartTime(format!("'{}': {}", raw, e)))
            })
            .transpose()
    }
}

/// Raw parameters file as written on disk
///
/// Every key is optional here so that a missing key is reported by name
/// instead of as a generic parse failure. Integer fields are signed so that
/// out-of-range values reach validation rather than failing to parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParametersFile {
    /// Floor-type label to capacity
    #[serde(alias = "floorCapacities")]
    pub floor_capacities: Option<BTreeMap<String, i64>>,
    /// Floor number (as string) to floor-type label
    #[serde(alias = "floorTypes")]
    pub floor_types: Option<BTreeMap<String, String>>,
    /// Number of states to produce
    #[serde(alias = "rowsToGenerate")]
    pub rows_generated: Option<i64>,
    /// Exclusive upper bound of the floor range
    #[serde(alias = "floorNumber")]
    pub floor_number: Option<i64>,
    /// Inclusive lower bound of the floor range
    #[serde(alias = "negativeFloorNumber")]
    pub negative_floor_number: Option<i64>,
    /// Lag used for short moves
    #[serde(alias = "minIntervalSeconds")]
    pub min_time_interval_seconds: Option<i64>,
    /// Cap on the per-move lag
    #[serde(alias = "maxIntervalSeconds")]
    pub max_time_interval_seconds: Option<i64>,
    /// Seconds of lag per floor travelled
    #[serde(alias = "intervalPerFloorSeconds")]
    pub interval_per_floor_seconds: Option<f64>,
    /// Peak hour windows
    #[serde(alias = "peakHours")]
    pub peak_hours: Option<Vec<PeakWindowEntry>>,
    /// Random delay multiplier during peak windows
    #[serde(alias = "peakMultiplier")]
    pub peak_multiplier: Option<f64>,
    /// Bounds for the random minutes component
    #[serde(alias = "randomMinutesRange")]
    pub random_minutes_range: Option<RangeEntry>,
}

/// Raw peak window entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeakWindowEntry {
    /// First hour inside the window
    pub start: Option<i64>,
    /// First hour after the window
    pub end: Option<i64>,
}

/// Raw `{min, max}` entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeEntry {
    /// Lower bound
    pub min: Option<i64>,
    /// Upper bound
    pub max: Option<i64>,
}

/// Validated parameters for one generation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationParameters {
    /// Floor-type label to capacity
    pub floor_capacities: BTreeMap<String, u32>,

    /// Floor number (as string) to floor-type label
    pub floor_types: BTreeMap<String, String>,

    /// Number of states to produce this run
    #[serde(rename = "rows_generated")]
    pub rows_to_generate: usize,

    /// Exclusive upper bound of the floor range
    pub floor_number: i32,

    /// Inclusive lower bound of the floor range (basements are negative)
    pub negative_floor_number: i32,

    /// Lag in seconds for moves of at most one floor
    #[serde(rename = "min_time_interval_seconds")]
    pub min_interval_seconds: u32,

    /// Cap in seconds on the distance-based lag
    #[serde(rename = "max_time_interval_seconds")]
    pub max_interval_seconds: u32,

    /// Seconds of lag per floor of distance
    pub interval_per_floor_seconds: f64,

    /// Hour-of-day windows where the peak multiplier applies
    pub peak_hours: Vec<PeakWindow>,

    /// Multiplier in `[0, 1]` for the random delay during peak windows
    pub peak_multiplier: f64,

    /// Inclusive bounds for the random minutes component
    pub random_minutes_range: RandomMinutesRange,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error, including keys with the wrong primitive type
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// Parameters parsed but failed validation
    #[error("Invalid parameters: {0}")]
    ValidationError(#[from] ConfigValidationError),

    /// The cold-start clock override could not be parsed
    #[error("Invalid start time {0} (expected YYYY-MM-DD HH:MM:SS)")]
    InvalidStartTime(String),
}

/// Validation errors for simulation parameters
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// A required key is absent
    #[error("Missing required key '{0}'")]
    MissingKey(&'static str),

    /// A floor capacity is not a positive integer
    #[error("Invalid capacity for {floor_type}: {value} (must be a positive integer)")]
    InvalidCapacity {
        /// Floor-type label
        floor_type: String,
        /// The rejected capacity
        value: i64,
    },

    /// Row count is invalid
    #[error("Invalid 'rows_generated' value: {0} (must be greater than 0)")]
    InvalidRowCount(i64),

    /// Floor number is invalid
    #[error("Invalid 'floor_number' value: {0} (must be greater than 0)")]
    InvalidFloorNumber(i64),

    /// Negative floor number is invalid
    #[error("Invalid 'negative_floor_number' value: {0} (must be 0 or lower)")]
    InvalidNegativeFloorNumber(i64),

    /// An interval bound is not a positive integer
    #[error("Invalid '{field}' value: {value} (must be greater than 0)")]
    InvalidInterval {
        /// Name of the interval key
        field: &'static str,
        /// The rejected value
        value: i64,
    },

    /// Minimum interval exceeds the maximum
    #[error("Invalid interval bounds: min ({min}) must be <= max ({max})")]
    InvalidIntervalBounds {
        /// Minimum interval in seconds
        min: u32,
        /// Maximum interval in seconds
        max: u32,
    },

    /// Per-floor interval is negative or not finite
    #[error("Invalid 'interval_per_floor_seconds' value: {0} (must be >= 0)")]
    InvalidIntervalPerFloor(f64),

    /// Peak multiplier is out of range
    #[error("Invalid 'peak_multiplier' value: {0} (must be between 0.0 and 1.0)")]
    InvalidPeakMultiplier(f64),

    /// A peak window entry is malformed
    #[error("Invalid peak hour interval at index {index}: {reason}")]
    MalformedPeakWindow {
        /// Position of the entry in `peak_hours`
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Random minutes range is malformed
    #[error("Invalid 'random_minutes_range': {0}")]
    InvalidRandomMinutesRange(String),

    /// A floor resolves to a label missing from `floor_capacities`
    #[error("Floor {floor} has type '{floor_type}' with no entry in 'floor_capacities'")]
    UnknownFloorType {
        /// Floor number
        floor: i32,
        /// Resolved floor-type label
        floor_type: String,
    },
}

impl Default for SimulationParameters {
    fn default() -> Self {
        let floor_capacities = [
            ("Residential", 4),
            ("Office", 12),
            ("Commercial", 20),
            ("Parking", 6),
            ("Lobby", 25),
        ]
        .into_iter()
        .map(|(label, capacity)| (label.to_string(), capacity))
        .collect();

        // Floors 5 and above fall back to Residential
        let floor_types = [
            ("-2", "Parking"),
            ("-1", "Parking"),
            ("0", "Lobby"),
            ("1", "Commercial"),
            ("2", "Office"),
            ("3", "Office"),
            ("4", "Office"),
        ]
        .into_iter()
        .map(|(floor, label)| (floor.to_string(), label.to_string()))
        .collect();

        Self {
            floor_capacities,
            floor_types,
            rows_to_generate: 1_000,
            floor_number: 12,
            negative_floor_number: -2,
            min_interval_seconds: 5,
            max_interval_seconds: 300,
            interval_per_floor_seconds: 10.0,
            peak_hours: vec![PeakWindow::new(7, 9), PeakWindow::new(12, 14), PeakWindow::new(17, 19)],
            peak_multiplier: 0.5,
            random_minutes_range: RandomMinutesRange { min: 1, max: 10 },
        }
    }
}

impl TryFrom<ParametersFile> for SimulationParameters {
    type Error = ConfigValidationError;

    fn try_from(file: ParametersFile) -> Result<Self, Self::Error> {
        use ConfigValidationError as E;

        let raw_capacities = file.floor_capacities.ok_or(E::MissingKey("floor_capacities"))?;
        let floor_types = file.floor_types.ok_or(E::MissingKey("floor_types"))?;
        let rows = file.rows_generated.ok_or(E::MissingKey("rows_generated"))?;
        let floor_number = file.floor_number.ok_or(E::MissingKey("floor_number"))?;
        let negative_floor_number =
            file.negative_floor_number.ok_or(E::MissingKey("negative_floor_number"))?;
        let min_interval =
            file.min_time_interval_seconds.ok_or(E::MissingKey("min_time_interval_seconds"))?;
        let max_interval =
            file.max_time_interval_seconds.ok_or(E::MissingKey("max_time_interval_seconds"))?;
        let interval_per_floor_seconds =
            file.interval_per_floor_seconds.ok_or(E::MissingKey("interval_per_floor_seconds"))?;
        let raw_peak_hours = file.peak_hours.ok_or(E::MissingKey("peak_hours"))?;
        let peak_multiplier = file.peak_multiplier.ok_or(E::MissingKey("peak_multiplier"))?;
        let raw_range = file.random_minutes_range.ok_or(E::MissingKey("random_minutes_range"))?;

        let mut floor_capacities = BTreeMap::new();
        for (floor_type, value) in raw_capacities {
            let capacity = u32::try_from(value)
                .ok()
                .filter(|c| *c > 0)
                .ok_or_else(|| E::InvalidCapacity { floor_type: floor_type.clone(), value })?;
            floor_capacities.insert(floor_type, capacity);
        }

        let rows_to_generate = usize::try_from(rows).map_err(|_| E::InvalidRowCount(rows))?;
        let floor_number =
            i32::try_from(floor_number).map_err(|_| E::InvalidFloorNumber(floor_number))?;
        let negative_floor_number = i32::try_from(negative_floor_number)
            .map_err(|_| E::InvalidNegativeFloorNumber(negative_floor_number))?;
        let min_interval_seconds = u32::try_from(min_interval).map_err(|_| E::InvalidInterval {
            field: "min_time_interval_seconds",
            value: min_interval,
        })?;
        let max_interval_seconds = u32::try_from(max_interval).map_err(|_| E::InvalidInterval {
            field: "max_time_interval_seconds",
            value: max_interval,
        })?;

        let mut peak_hours = Vec::with_capacity(raw_peak_hours.len());
        for (index, entry) in raw_peak_hours.into_iter().enumerate() {
            let (start, end) = match (entry.start, entry.end) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    return Err(E::MalformedPeakWindow {
                        index,
                        reason: "both 'start' and 'end' are required".to_string(),
                    })
                }
            };
            let hour = |value: i64| {
                u32::try_from(value).map_err(|_| E::MalformedPeakWindow {
                    index,
                    reason: format!("hour {} is outside 0..=24", value),
                })
            };
            peak_hours.push(PeakWindow::new(hour(start)?, hour(end)?));
        }

        let (min, max) = match (raw_range.min, raw_range.max) {
            (Some(min), Some(max)) => (min, max),
            _ => {
                return Err(E::InvalidRandomMinutesRange(
                    "both 'min' and 'max' are required".to_string(),
                ))
            }
        };
        let bound = |value: i64| {
            u32::try_from(value).map_err(|_| {
                E::InvalidRandomMinutesRange(format!("bound {} must be a non-negative integer", value))
            })
        };
        let random_minutes_range = RandomMinutesRange { min: bound(min)?, max: bound(max)? };

        let parameters = Self {
            floor_capacities,
            floor_types,
            rows_to_generate,
            floor_number,
            negative_floor_number,
            min_interval_seconds,
            max_interval_seconds,
            interval_per_floor_seconds,
            peak_hours,
            peak_multiplier,
            random_minutes_range,
        };
        parameters.validate()?;
        Ok(parameters)
    }
}

impl SimulationParameters {
    /// Create parameters from parsed CLI arguments and the referenced file
    pub fn from_cli_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut parameters = Self::from_file(&args.config)?;

        // CLI takes precedence over the file
        if let Some(rows) = args.rows {
            parameters.rows_to_generate = rows;
        }

        parameters.validate()?;
        Ok(parameters)
    }

    /// Load and validate parameters from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                Self::from_json_str(&content)
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Parse and validate parameters from a JSON document
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let file: ParametersFile = serde_json::from_str(content)?;
        Ok(Self::try_from(file)?)
    }

    /// Save parameters to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Render parameters as pretty JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the parameter ranges
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        use ConfigValidationError as E;

        if self.floor_number <= 0 {
            return Err(E::InvalidFloorNumber(self.floor_number.into()));
        }

        if self.negative_floor_number > 0 {
            return Err(E::InvalidNegativeFloorNumber(self.negative_floor_number.into()));
        }

        if self.rows_to_generate == 0 {
            return Err(E::InvalidRowCount(0));
        }

        if let Some((floor_type, _)) = self.floor_capacities.iter().find(|(_, c)| **c == 0) {
            return Err(E::InvalidCapacity { floor_type: floor_type.clone(), value: 0 });
        }

        for (field, value) in [
            ("min_time_interval_seconds", self.min_interval_seconds),
            ("max_time_interval_seconds", self.max_interval_seconds),
        ] {
            if value == 0 {
                return Err(E::InvalidInterval { field, value: 0 });
            }
        }

        if self.min_interval_seconds > self.max_interval_seconds {
            return Err(E::InvalidIntervalBounds {
                min: self.min_interval_seconds,
                max: self.max_interval_seconds,
            });
        }

        if !self.interval_per_floor_seconds.is_finite() || self.interval_per_floor_seconds < 0.0 {
            return Err(E::InvalidIntervalPerFloor(self.interval_per_floor_seconds));
        }

        if !(0.0..=1.0).contains(&self.peak_multiplier) {
            return Err(E::InvalidPeakMultiplier(self.peak_multiplier));
        }

        for (index, window) in self.peak_hours.iter().enumerate() {
            if window.end > HOURS_PER_DAY || window.start >= window.end {
                return Err(E::MalformedPeakWindow {
                    index,
                    reason: format!(
                        "expected 0 <= start < end <= {}, got {}..{}",
                        HOURS_PER_DAY, window.start, window.end
                    ),
                });
            }
        }

        if self.random_minutes_range.min > self.random_minutes_range.max {
            return Err(E::InvalidRandomMinutesRange(format!(
                "min ({}) must be <= max ({})",
                self.random_minutes_range.min, self.random_minutes_range.max
            )));
        }

        for floor in self.floor_range() {
            if self.floor_capacity(floor).is_none() {
                return Err(E::UnknownFloorType {
                    floor,
                    floor_type: self.floor_type(floor).to_string(),
                });
            }
        }

        Ok(())
    }

    /// Floors covered by the building, `[negative_floor_number, floor_number)`
    pub fn floor_range(&self) -> Range<i32> {
        self.negative_floor_number..self.floor_number
    }

    /// Number of floors in the range
    pub fn floor_count(&self) -> usize {
        self.floor_range().len()
    }

    /// Floor-type label for a floor, defaulting to "Residential"
    pub fn floor_type(&self, floor: i32) -> &str {
        self.floor_types
            .get(&floor.to_string())
            .map(String::as_str)
            .unwrap_or(DEFAULT_FLOOR_TYPE)
    }

    /// Capacity of a floor through its floor-type label
    pub fn floor_capacity(&self, floor: i32) -> Option<u32> {
        self.floor_capacities.get(self.floor_type(floor)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> String {
        r#"{
            "floor_capacities": {"Residential": 4, "Office": 10},
            "floor_types": {"1": "Office", "2": "Office"},
            "rows_generated": 50,
            "floor_number": 5,
            "negative_floor_number": -1,
            "min_time_interval_seconds": 5,
            "max_time_interval_seconds": 300,
            "interval_per_floor_seconds": 10,
            "peak_hours": [{"start": 7, "end": 9}, {"start": 17, "end": 19}],
            "peak_multiplier": 0.5,
            "random_minutes_range": {"min": 1, "max": 5}
        }"#
        .to_string()
    }

    fn json_without(key: &str) -> String {
        let mut value: serde_json::Value = serde_json::from_str(&sample_json()).unwrap();
        value.as_object_mut().unwrap().remove(key);
        value.to_string()
    }

    fn json_with(key: &str, replacement: serde_json::Value) -> String {
        let mut value: serde_json::Value = serde_json::from_str(&sample_json()).unwrap();
        value.as_object_mut().unwrap().insert(key.to_string(), replacement);
        value.to_string()
    }

    #[test]
    fn test_default_parameters_are_valid() {
        let params = SimulationParameters::default();
        params.validate().unwrap();
        assert_eq!(params.floor_range(), -2..12);
        assert_eq!(params.floor_type(-1), "Parking");
        assert_eq!(params.floor_type(3), "Office");
        assert_eq!(params.floor_type(9), DEFAULT_FLOOR_TYPE);
    }

    #[test]
    fn test_parse_sample_document() {
        let params = SimulationParameters::from_json_str(&sample_json()).unwrap();

        assert_eq!(params.rows_to_generate, 50);
        assert_eq!(params.floor_range(), -1..5);
        assert_eq!(params.floor_count(), 6);
        assert_eq!(params.interval_per_floor_seconds, 10.0);
        assert_eq!(params.peak_hours, vec![PeakWindow::new(7, 9), PeakWindow::new(17, 19)]);
        assert_eq!(params.random_minutes_range, RandomMinutesRange { min: 1, max: 5 });
        assert_eq!(params.floor_capacity(1), Some(10));
        assert_eq!(params.floor_capacity(-1), Some(4));
    }

    #[test]
    fn test_missing_key_is_reported_by_name() {
        for key in ["floor_capacities", "peak_hours", "negative_floor_number"] {
            match SimulationParameters::from_json_str(&json_without(key)) {
                Err(ConfigError::ValidationError(ConfigValidationError::MissingKey(missing))) => {
                    assert_eq!(missing, key)
                }
                other => panic!("Expected MissingKey({}), got {:?}", key, other),
            }
        }
    }

    #[test]
    fn test_wrong_primitive_type_is_rejected() {
        let json = json_with("rows_generated", serde_json::json!(12.5));
        assert!(matches!(
            SimulationParameters::from_json_str(&json),
            Err(ConfigError::JsonError(_))
        ));

        let json = json_with("peak_multiplier", serde_json::json!("half"));
        assert!(matches!(
            SimulationParameters::from_json_str(&json),
            Err(ConfigError::JsonError(_))
        ));
    }

    #[test]
    fn test_positive_negative_floor_number_is_rejected() {
        let json = json_with("negative_floor_number", serde_json::json!(2));
        match SimulationParameters::from_json_str(&json) {
            Err(ConfigError::ValidationError(ConfigValidationError::InvalidNegativeFloorNumber(2))) => {}
            other => panic!("Expected InvalidNegativeFloorNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_peak_multiplier_range() {
        let json = json_with("peak_multiplier", serde_json::json!(1.5));
        match SimulationParameters::from_json_str(&json) {
            Err(ConfigError::ValidationError(ConfigValidationError::InvalidPeakMultiplier(v))) => {
                assert_eq!(v, 1.5)
            }
            other => panic!("Expected InvalidPeakMultiplier, got {:?}", other),
        }

        let json = json_with("peak_multiplier", serde_json::json!(0));
        assert!(SimulationParameters::from_json_str(&json).is_ok());
    }

    #[test]
    fn test_peak_window_missing_end() {
        let json = json_with("peak_hours", serde_json::json!([{"start": 7, "end": 9}, {"start": 12}]));
        match SimulationParameters::from_json_str(&json) {
            Err(ConfigError::ValidationError(ConfigValidationError::MalformedPeakWindow {
                index,
                ..
            })) => assert_eq!(index, 1),
            other => panic!("Expected MalformedPeakWindow, got {:?}", other),
        }
    }

    #[test]
    fn test_peak_window_bounds() {
        let json = json_with("peak_hours", serde_json::json!([{"start": 20, "end": 25}]));
        assert!(SimulationParameters::from_json_str(&json).is_err());

        let json = json_with("peak_hours", serde_json::json!([{"start": 9, "end": 9}]));
        assert!(SimulationParameters::from_json_str(&json).is_err());
    }

    #[test]
    fn test_non_positive_capacity_is_rejected() {
        let json = json_with("floor_capacities", serde_json::json!({"Residential": 0, "Office": 3}));
        match SimulationParameters::from_json_str(&json) {
            Err(ConfigError::ValidationError(ConfigValidationError::InvalidCapacity {
                floor_type,
                value,
            })) => {
                assert_eq!(floor_type, "Residential");
                assert_eq!(value, 0);
            }
            other => panic!("Expected InvalidCapacity, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_floor_type_is_rejected() {
        let json = json_with("floor_types", serde_json::json!({"3": "Gym"}));
        match SimulationParameters::from_json_str(&json) {
            Err(ConfigError::ValidationError(ConfigValidationError::UnknownFloorType {
                floor,
                floor_type,
            })) => {
                assert_eq!(floor, 3);
                assert_eq!(floor_type, "Gym");
            }
            other => panic!("Expected UnknownFloorType, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_ranges_are_rejected() {
        let json = json_with("random_minutes_range", serde_json::json!({"min": 6, "max": 2}));
        assert!(matches!(
            SimulationParameters::from_json_str(&json),
            Err(ConfigError::ValidationError(ConfigValidationError::InvalidRandomMinutesRange(_)))
        ));

        let json = json_with("min_time_interval_seconds", serde_json::json!(400));
        assert!(matches!(
            SimulationParameters::from_json_str(&json),
            Err(ConfigError::ValidationError(ConfigValidationError::InvalidIntervalBounds { .. }))
        ));
    }

    #[test]
    fn test_camel_case_aliases() {
        let json = r#"{
            "floorCapacities": {"Residential": 4},
            "floorTypes": {},
            "rowsToGenerate": 3,
            "floorNumber": 4,
            "negativeFloorNumber": 0,
            "minIntervalSeconds": 5,
            "maxIntervalSeconds": 60,
            "intervalPerFloorSeconds": 2.5,
            "peakHours": [],
            "peakMultiplier": 1.0,
            "randomMinutesRange": {"min": 0, "max": 2}
        }"#;
        let params = SimulationParameters::from_json_str(json).unwrap();
        assert_eq!(params.rows_to_generate, 3);
        assert_eq!(params.interval_per_floor_seconds, 2.5);
    }

    #[test]
    fn test_peak_window_excludes_end() {
        let window = PeakWindow::new(7, 9);
        assert!(window.contains_hour(7));
        assert!(window.contains_hour(8));
        assert!(!window.contains_hour(9));
        assert!(!window.contains_hour(6));
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(sample_json().as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let params = SimulationParameters::from_file(temp_file.path()).unwrap();
        assert_eq!(params.rows_to_generate, 50);

        // Loading is repeatable without side effects
        let again = SimulationParameters::from_file(temp_file.path()).unwrap();
        assert_eq!(params, again);
    }

    #[test]
    fn test_config_file_errors() {
        assert!(matches!(
            SimulationParameters::from_file("/nonexistent/elevator_variables.json"),
            Err(ConfigError::FileNotFound(_))
        ));

        let temp_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            SimulationParameters::from_file(temp_file.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_saved_parameters_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");

        let params = SimulationParameters::default();
        params.save_to_file(&path).unwrap();

        let loaded = SimulationParameters::from_file(&path).unwrap();
        assert_eq!(loaded, params);
    }

    #[test]
    fn test_cli_rows_override() {
        let mut temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        std::io::Write::write_all(&mut temp_file, sample_json().as_bytes()).unwrap();

        let path = temp_file.path().to_str().unwrap().to_string();
        let args = CliArgs::try_parse_from(["test", "--config", &path, "--rows", "7"]).unwrap();
        let params = SimulationParameters::from_cli_args(&args).unwrap();
        assert_eq!(params.rows_to_generate, 7);

        let args = CliArgs::try_parse_from(["test", "--config", &path, "--rows", "0"]).unwrap();
        assert!(matches!(
            SimulationParameters::from_cli_args(&args),
            Err(ConfigError::ValidationError(ConfigValidationError::InvalidRowCount(0)))
        ));
    }

    #[test]
    fn test_parsed_start_time() {
        let args = CliArgs::try_parse_from(["test", "--start-time", "2024-01-15 08:30:00"]).unwrap();
        let start = args.parsed_start_time().unwrap().unwrap();
        assert_eq!(start.format(DATETIME_FORMAT).to_string(), "2024-01-15 08:30:00");

        let args = CliArgs::try_parse_from(["test", "--start-time", "tomorrow"]).unwrap();
        assert!(matches!(args.parsed_start_time(), Err(ConfigError::InvalidStartTime(_))));

        let args = CliArgs::try_parse_from(["test"]).unwrap();
        assert!(args.parsed_start_time().unwrap().is_none());
    }
}
