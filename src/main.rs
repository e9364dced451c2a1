// Elevator Dataset Generator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/elevator-dataset-generator
// ```
//
// Or with a custom parameters file and store:
//
// ```console
// $ ./target/release/elevator-dataset-generator --config building.json --store states.jsonl --verbose
// ```

use anyhow::{Context, Result};
use clap::Parser;
use elevator_dataset_generator::simulation::{FloorWeights, GenerationEngine, LoggingConfig, RunStatistics};
use elevator_dataset_generator::store::JsonlStore;
use elevator_dataset_generator::types::config::CliArgs;
use elevator_dataset_generator::types::SimulationParameters;
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match SimulationParameters::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default parameters: {}", e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = init_logging(&args) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Elevator Dataset Generator");

    let parameters = match SimulationParameters::from_cli_args(&args) {
        Ok(parameters) => parameters,
        Err(e) => {
            error!("Failed to load parameters: {}", e);
            eprintln!("Failed to load parameters from {}: {}", args.config, e);
            process::exit(1);
        }
    };

    info!("Parameters loaded and validated from {}", args.config);

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Parameter validation successful!");
        eprintln!("Dry run mode - no states will be generated.");
        if let Err(e) = print_dry_run_summary(&parameters) {
            error!("Dry run failed: {:#}", e);
            eprintln!("Dry run failed: {:#}", e);
            process::exit(1);
        }
        return;
    }

    print_startup_banner(&parameters, &args);

    match run_generation(&args, parameters) {
        Ok(statistics) => {
            eprintln!();
            eprint!("{}", statistics);
            info!("Elevator Dataset Generator completed successfully");
        }
        Err(e) => {
            error!("Generation failed: {:#}", e);
            eprintln!("Generation failed: {:#}", e);
            process::exit(1);
        }
    }
}

/// Initialize logging based on CLI flags
fn init_logging(args: &CliArgs) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = if args.debug {
        LoggingConfig::debug()
    } else if args.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::quiet()
    };

    if args.json_logs {
        config = config.with_json_format();
    }
    if let Some(dir) = &args.log_dir {
        config = config.with_file_logging(dir.clone());
    }

    config.init()
}

/// Run the generation loop against the JSON Lines store
fn run_generation(args: &CliArgs, parameters: SimulationParameters) -> Result<RunStatistics> {
    let start_time = args.parsed_start_time().context("Invalid --start-time")?;
    let store = JsonlStore::new(&args.store);

    let mut engine = GenerationEngine::from_seed(parameters, store, args.seed)
        .context("Failed to initialize generation engine")?;
    if let Some(start_time) = start_time {
        engine = engine.with_run_start(start_time);
    }

    eprintln!(
        "Generating {} elevator states into {}...",
        engine.parameters().rows_to_generate,
        args.store
    );
    let statistics = engine
        .run()
        .with_context(|| format!("Failed to generate states into {}", args.store))?;

    Ok(statistics)
}

/// Print startup banner with run settings
fn print_startup_banner(parameters: &SimulationParameters, args: &CliArgs) {
    eprintln!("Elevator Dataset Generator");
    eprintln!("==========================");
    eprintln!("Chained elevator usage events for analytics datasets");
    eprintln!();
    print_parameter_summary(parameters);
    eprintln!("  Store: {}", args.store);
    if let Some(seed) = args.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}

/// Print parameter summary
fn print_parameter_summary(parameters: &SimulationParameters) {
    eprintln!("Parameters:");
    eprintln!(
        "  Floors: [{}, {}) ({} floors)",
        parameters.negative_floor_number,
        parameters.floor_number,
        parameters.floor_count()
    );
    eprintln!("  Rows To Generate: {}", parameters.rows_to_generate);
    eprintln!(
        "  Interval Bounds: {}s - {}s ({}s per floor)",
        parameters.min_interval_seconds, parameters.max_interval_seconds, parameters.interval_per_floor_seconds
    );
    let windows: Vec<String> = parameters
        .peak_hours
        .iter()
        .map(|window| format!("{:02}:00-{:02}:00", window.start, window.end))
        .collect();
    eprintln!(
        "  Peak Hours: {} (x{})",
        if windows.is_empty() { "none".to_string() } else { windows.join(", ") },
        parameters.peak_multiplier
    );
    eprintln!(
        "  Random Minutes: {}..={}",
        parameters.random_minutes_range.min, parameters.random_minutes_range.max
    );
}

/// Print parameters and derived floor weights without generating
fn print_dry_run_summary(parameters: &SimulationParameters) -> Result<()> {
    print_parameter_summary(parameters);

    let weights = FloorWeights::derive(parameters).context("Failed to derive floor weights")?;
    eprintln!();
    eprintln!("Floor Weights:");
    for (floor, weight) in weights.iter() {
        eprintln!("  {:>4}  {:<12} {:.3}", floor, parameters.floor_type(floor), weight);
    }
    if weights.used_uniform_fallback() {
        eprintln!("  (all floors share one capacity, weights are uniform)");
    }
    eprintln!("  Total: {:.3}", weights.total());
    Ok(())
}
