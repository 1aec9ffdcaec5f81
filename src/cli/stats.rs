//! Stats command implementation.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::config::Config;
use crate::discovery::collect_inputs;
use crate::error::{MapError, Result};
use crate::loader::load_snapshot;
use crate::output::Printer;
use crate::stats::MapStats;

/// Print room and feature counts
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Snapshot files or directories (`-` reads stdin)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct InputStats {
    input: String,
    stats: MapStats,
}

pub fn run(args: StatsArgs, config: &Config, printer: &Printer) -> Result<()> {
    let inputs = collect_inputs(&args.inputs, config)?;
    let mut rows = Vec::with_capacity(inputs.len());

    for input in &inputs {
        let snapshot = load_snapshot(input, config)?;
        rows.push(InputStats {
            input: input.to_string(),
            stats: MapStats::compute(&snapshot),
        });
    }

    if args.json {
        println!("{}", to_json(&rows)?);
        return Ok(());
    }

    for row in &rows {
        if rows.len() > 1 {
            printer.info("Stats", &row.input);
        }
        println!("{}", row.stats);
    }
    Ok(())
}

fn to_json(rows: &[InputStats]) -> Result<String> {
    serde_json::to_string_pretty(rows).map_err(|e| MapError::Build {
        message: format!("Failed to serialize stats: {}", e),
        help: None,
    })
}
