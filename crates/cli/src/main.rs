//! podiumctl - offline driver for the Podium standings pipeline.
//!
//! Exercises the full encode → invoke → decode → merge path against a real
//! engine library without a simulator attached, and validates canned engine
//! responses when debugging schema drift.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use podium_bridge::LibraryEngine;
use podium_pipeline::StandingsPipeline;
use podium_schemas::{PresentationRow, RaceSnapshot};
use podium_wire::decode_standings;

#[derive(Parser)]
#[command(name = "podiumctl")]
#[command(about = "Offline driver for the Podium standings prediction pipeline")]
#[command(version)]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one prediction tick against an engine library
    Predict {
        /// Path to the prediction engine shared library
        #[arg(long, env = "PODIUM_ENGINE")]
        engine: PathBuf,

        /// Race snapshot JSON file (canonical request schema)
        #[arg(long)]
        snapshot: PathBuf,

        /// Roster JSON file mapping cust_id to car number
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Request-source identifier handed to the engine
        #[arg(long, default_value = "podiumctl")]
        source: String,
    },

    /// Decode an engine response file and report the records or the failure
    Validate {
        /// Response JSON file to validate
        response: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Predict {
            engine,
            snapshot,
            roster,
            source,
        } => predict(&engine, &snapshot, roster.as_deref(), &source, cli.json),
        Commands::Validate { response } => validate(&response, cli.json),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn predict(
    engine: &std::path::Path,
    snapshot: &std::path::Path,
    roster: Option<&std::path::Path>,
    source: &str,
    json: bool,
) -> Result<()> {
    let text = fs::read_to_string(snapshot)
        .with_context(|| format!("can not read snapshot {}", snapshot.display()))?;
    let snapshot: RaceSnapshot =
        serde_json::from_str(&text).context("snapshot is not a valid race snapshot")?;

    let roster: HashMap<i32, String> = match roster {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("can not read roster {}", path.display()))?;
            serde_json::from_str(&text).context("roster is not a cust_id to car-number map")?
        }
        None => HashMap::new(),
    };

    let mut pipeline = StandingsPipeline::new(LibraryEngine::new(engine, source));
    let rows = pipeline
        .try_tick(&snapshot, &roster)
        .context("prediction tick failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
    } else {
        print_table(rows);
    }
    Ok(())
}

fn validate(response: &std::path::Path, json: bool) -> Result<()> {
    let text = fs::read_to_string(response)
        .with_context(|| format!("can not read response {}", response.display()))?;

    let standings = decode_standings(&text).context("response failed validation")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&standings)?);
    } else if standings.is_empty() {
        println!("valid response: no predictions yet");
    } else {
        println!("valid response: {} standings", standings.len());
        for standing in &standings {
            println!(
                "  P{} -> P{}  {}",
                standing.current_position, standing.predicted_position, standing.driver_name
            );
        }
    }
    Ok(())
}

fn print_table(rows: &[PresentationRow]) {
    if rows.is_empty() {
        println!("no predictions yet");
        return;
    }

    println!("{:<5} {:>4}  {:<5} {:<28} {:>5}", "Exp.", "+/-", "No.", "Driver", "Pts");
    for row in rows {
        let number = if row.car_number.is_empty() {
            "-".to_string()
        } else {
            format!("#{}", row.car_number)
        };
        let presence = if row.is_present { "" } else { " (not in session)" };
        println!(
            "P{:<4} {:>+4}  {:<5} {:<28} {:>5}",
            row.predicted_position,
            row.change,
            number,
            format!("{}{presence}", row.driver_name),
            row.predicted_points,
        );
    }
}
