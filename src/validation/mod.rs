//! Validation for parsed snapshots.
//!
//! Parsing tolerates bad entries silently; validation surfaces them. Used by
//! `underspire validate` and by `underspire render --verbose`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::error::MapError;
use crate::output::Printer;
use crate::parser::MapSnapshot;

/// Run all validation checks against a snapshot.
pub fn validate_snapshot(snapshot: &MapSnapshot) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_skipped_entries(snapshot));
    result.merge(checks::check_completed_on_void(snapshot));
    result.merge(checks::check_features_on_void(snapshot));
    result.merge(checks::check_current_position(snapshot));

    result
}

/// Turn a terminal parse failure into an error diagnostic.
pub fn failure_diagnostic(err: &MapError) -> Diagnostic {
    let code = match err {
        MapError::Io { .. } => "underspire::io",
        MapError::Json { .. } => "underspire::json",
        MapError::Parse { .. } => "underspire::parse",
        MapError::Config { .. } => "underspire::config",
        MapError::Build { .. } => "underspire::build",
    };
    Diagnostic::error(code, err.to_string())
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let is_error = d.severity == Severity::Error;
        eprintln!(
            "  {}[{}]: {}",
            printer.severity(&d.severity.to_string(), is_error),
            d.code,
            d.message
        );
        if let Some(help) = &d.help {
            eprintln!("    {}: {}", printer.dim("help"), help);
        }
    }
}
