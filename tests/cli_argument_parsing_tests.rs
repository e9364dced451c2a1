//! Tests for CLI argument parsing functionality

use chrono::NaiveDate;
use clap::Parser;
use elevator_dataset_generator::types::config::{
    CliArgs, ConfigError, SimulationParameters, DEFAULT_CONFIG_PATH, DEFAULT_STORE_PATH,
};
use std::fs;
use tempfile::TempDir;

/// Test default values when no flags are given
#[test]
fn test_default_arguments() {
    let args = CliArgs::try_parse_from(vec!["test"]).unwrap();

    assert_eq!(args.config, DEFAULT_CONFIG_PATH);
    assert_eq!(args.store, DEFAULT_STORE_PATH);
    assert!(args.rows.is_none());
    assert!(args.seed.is_none());
    assert!(args.start_time.is_none());
    assert!(!args.verbose);
    assert!(!args.debug);
    assert!(!args.json_logs);
    assert!(args.log_dir.is_none());
    assert!(!args.dry_run);
    assert!(!args.print_config);
}

/// Test parsing of every flag
#[test]
fn test_all_arguments() {
    let args = CliArgs::try_parse_from(vec![
        "test",
        "--config",
        "building.json",
        "--store",
        "out.jsonl",
        "--rows",
        "250",
        "--seed",
        "42",
        "--start-time",
        "2024-01-15 08:00:00",
        "--verbose",
        "--json-logs",
        "--log-dir",
        "logs",
        "--dry-run",
    ])
    .unwrap();

    assert_eq!(args.config, "building.json");
    assert_eq!(args.store, "out.jsonl");
    assert_eq!(args.rows, Some(250));
    assert_eq!(args.seed, Some(42));
    assert!(args.verbose);
    assert!(args.json_logs);
    assert_eq!(args.log_dir.as_deref(), Some("logs"));
    assert!(args.dry_run);

    let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(8, 0, 0).unwrap();
    assert_eq!(args.parsed_start_time().unwrap(), Some(expected));
}

/// Test short flags
#[test]
fn test_short_arguments() {
    let args = CliArgs::try_parse_from(vec!["test", "-c", "a.json", "-s", "b.jsonl", "-d"]).unwrap();
    assert_eq!(args.config, "a.json");
    assert_eq!(args.store, "b.jsonl");
    assert!(args.debug);
}

/// Test rejection of malformed values
#[test]
fn test_invalid_argument_values() {
    assert!(CliArgs::try_parse_from(vec!["test", "--rows", "many"]).is_err());
    assert!(CliArgs::try_parse_from(vec!["test", "--rows", "-5"]).is_err());
    assert!(CliArgs::try_parse_from(vec!["test", "--seed", "abc"]).is_err());

    let args = CliArgs::try_parse_from(vec!["test", "--start-time", "15/01/2024"]).unwrap();
    assert!(matches!(args.parsed_start_time(), Err(ConfigError::InvalidStartTime(_))));
}

/// Test that --rows overrides the parameters file
#[test]
fn test_rows_override_applies_to_loaded_parameters() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("building.json");
    SimulationParameters::default().save_to_file(&path).unwrap();

    let path_str = path.to_str().unwrap();
    let args = CliArgs::try_parse_from(vec!["test", "--config", path_str, "--rows", "12"]).unwrap();
    let parameters = SimulationParameters::from_cli_args(&args).unwrap();
    assert_eq!(parameters.rows_to_generate, 12);

    let args = CliArgs::try_parse_from(vec!["test", "--config", path_str, "--rows", "0"]).unwrap();
    assert!(matches!(
        SimulationParameters::from_cli_args(&args),
        Err(ConfigError::ValidationError(_))
    ));
}

/// Test that a missing parameters file is reported
#[test]
fn test_missing_parameters_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");

    let args = CliArgs::try_parse_from(vec!["test", "--config", path.to_str().unwrap()]).unwrap();
    assert!(matches!(
        SimulationParameters::from_cli_args(&args),
        Err(ConfigError::FileNotFound(_))
    ));

    // The template printed by --print-config loads back unchanged
    let template = SimulationParameters::default().print_json().unwrap();
    fs::write(&path, template).unwrap();
    assert_eq!(
        SimulationParameters::from_cli_args(&args).unwrap(),
        SimulationParameters::default()
    );
}
