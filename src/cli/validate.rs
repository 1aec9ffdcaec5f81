//! Validate command implementation.
//!
//! Parses each snapshot and reports entries that extraction dropped, plus
//! consistency problems between the feature layers and the grid.

use std::path::PathBuf;

use clap::Args;

use crate::config::Config;
use crate::discovery::{collect_inputs, Input};
use crate::error::{MapError, Result};
use crate::loader::load_snapshot;
use crate::output::{plural, Printer};
use crate::validation::{
    failure_diagnostic, print_diagnostics, validate_snapshot, ValidationResult,
};

/// Check snapshots for dropped or inconsistent entries
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Snapshot files or directories (`-` reads stdin)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs, config: &Config, printer: &Printer) -> Result<()> {
    let inputs = collect_inputs(&args.inputs, config)?;
    let mut errors = 0;
    let mut warnings = 0;

    for input in &inputs {
        printer.status("Checking", &input.to_string());
        let result = check_input(input, config);
        print_diagnostics(&result, printer);
        errors += result.error_count();
        warnings += result.warning_count();
    }

    let summary = format!(
        "{}: {}, {}",
        plural(inputs.len(), "snapshot", "snapshots"),
        plural(errors, "error", "errors"),
        plural(warnings, "warning", "warnings")
    );

    if errors > 0 || (args.strict && warnings > 0) {
        printer.error("Failed", &summary);
        return Err(MapError::Build {
            message: "Validation failed".to_string(),
            help: (errors == 0).then(|| "Warnings fail because of --strict".to_string()),
        });
    }

    if warnings > 0 {
        printer.warning("Finished", &summary);
    } else {
        printer.status("Finished", &summary);
    }
    Ok(())
}

/// Validate one input; load failures become a single error diagnostic.
fn check_input(input: &Input, config: &Config) -> ValidationResult {
    match load_snapshot(input, config) {
        Ok(snapshot) => validate_snapshot(&snapshot),
        Err(err) => {
            let mut result = ValidationResult::new();
            result.push(failure_diagnostic(&err));
            result
        }
    }
}
