//! Patch Evolution Experiment Driver
//!
//! Seeds a scenario, runs it for a number of generations and reports prey
//! alpha and zone occupancy after every generation.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use evo_core::config::{EngineConfig, FecundityTiers, OccupancyPolicy};
use evo_core::output::{ReportError, ReportFormat, ReportWriter};
use evo_core::setup::{banded_scenario, zoned_scenario};

/// Starting layout of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Nine patches, three per zone, crowded with prey and predators
    Banded,
    /// 30x30 grid of nine blocks with scattered prey
    Zoned,
}

/// Command line arguments for the experiment
#[derive(Parser, Debug)]
#[command(name = "evo_sim")]
#[command(about = "Predator-prey trait evolution on resource patches")]
struct Args {
    /// Random seed, overriding the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Number of generations (ticks) to run
    #[arg(long, default_value_t = 25)]
    generations: u64,

    /// Starting scenario
    #[arg(long, value_enum, default_value_t = Scenario::Banded)]
    scenario: Scenario,

    /// TOML file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write per-generation results as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write per-generation results as JSON lines
    #[arg(long)]
    jsonl: Option<PathBuf>,

    /// Allow any number of organisms per patch
    #[arg(long)]
    unbounded: bool,

    /// Let predators roam and breed outside their birth zone
    #[arg(long)]
    no_zone_lock: bool,

    /// Use the high fecundity tiers (4/7/10 prey birth attempts)
    #[arg(long)]
    high_fecundity: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_config(args: &Args) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.unbounded {
        config.occupancy = OccupancyPolicy::Unbounded;
    }
    if args.no_zone_lock {
        config.zone_locking = false;
    }
    if args.high_fecundity {
        config.fecundity = FecundityTiers::HIGH;
    }
    Ok(config)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args)?;
    info!(
        seed = config.seed,
        occupancy = ?config.occupancy,
        zone_locking = config.zone_locking,
        scenario = ?args.scenario,
        generations = args.generations,
        "Starting experiment"
    );

    let mut sim = match args.scenario {
        Scenario::Banded => banded_scenario(config),
        Scenario::Zoned => zoned_scenario(config),
    };

    let mut writers = open_writers(args)?;

    println!("Gen\tAlpha\tPreyLow\tPreyMed\tPreyHigh\tPredLow\tPredMed\tPredHigh");
    for generation in 0..args.generations {
        sim.advance_one_tick();
        let report = sim.generation_report(generation);
        println!("{}", report.to_console_row());

        for writer in &mut writers {
            writer.write(&report)?;
        }
    }

    for writer in &mut writers {
        writer.flush()?;
        info!(
            format = ?writer.format(),
            rows = writer.rows(),
            "Report written"
        );
    }

    info!(
        ticks = sim.tick(),
        population = sim.population(),
        "Experiment complete"
    );
    Ok(())
}

fn open_writers(args: &Args) -> Result<Vec<ReportWriter>, ReportError> {
    let mut writers = Vec::new();
    if let Some(path) = &args.csv {
        writers.push(ReportWriter::create(path, ReportFormat::Csv)?);
        info!("Writing CSV results to {}", path.display());
    }
    if let Some(path) = &args.jsonl {
        writers.push(ReportWriter::create(path, ReportFormat::JsonLines)?);
        info!("Writing JSON-lines results to {}", path.display());
    }
    Ok(writers)
}
