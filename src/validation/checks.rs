//! Validation checks for a parsed snapshot.
//!
//! Each check takes a `&MapSnapshot` and returns a `ValidationResult`.

use crate::classify::{classify_cell, CellCategory};
use crate::parser::{MapSnapshot, SkipReason, SnapshotField};
use crate::types::Coord;

use super::warning::{Diagnostic, ValidationResult};

/// Report every entry that extraction dropped.
pub fn check_skipped_entries(snapshot: &MapSnapshot) -> ValidationResult {
    let mut result = ValidationResult::new();

    for skipped in snapshot.skipped() {
        let (code, help) = match (&skipped.reason, skipped.field) {
            (SkipReason::InvalidPackedId, _) => (
                "bad-room-id",
                "Room IDs are 4 digits: two for the row, two for the column, both below 20",
            ),
            (SkipReason::InvalidDirection, _) => ("bad-gate-direction", "Dir is 0 (vertical) or 1 (horizontal)"),
            (SkipReason::GateOutOfBounds, _) => (
                "gate-out-of-bounds",
                "Vertical gates extend one row up, horizontal gates one column right",
            ),
            (SkipReason::GateOverlap { .. }, _) => ("gate-overlap", "Each cell can belong to at most one gate"),
            (SkipReason::Malformed(_), SnapshotField::Gates) => {
                ("malformed-entry", "Gate entries look like { \"Node\": \"0505\", \"Dir\": 1 }")
            }
            (SkipReason::Malformed(_), _) => ("malformed-entry", "Check the field's JSON shape"),
        };

        result.push(
            Diagnostic::warning(
                format!("underspire::validate::{}", code),
                format!(
                    "{}: skipped '{}': {}",
                    skipped.field, skipped.entry, skipped.reason
                ),
            )
            .with_help(help),
        );
    }

    result
}

/// Completed IDs that point at void cells.
pub fn check_completed_on_void(snapshot: &MapSnapshot) -> ValidationResult {
    let mut result = ValidationResult::new();

    for coord in snapshot.completed().iter() {
        if !snapshot.grid().is_room(coord) {
            result.push(
                Diagnostic::warning(
                    "underspire::validate::completed-void",
                    format!(
                        "Completed room {} is an empty cell and is not counted",
                        coord.to_packed()
                    ),
                )
                .at(coord),
            );
        }
    }

    result
}

/// Gate, treasure and boss cells that sit on void cells.
pub fn check_features_on_void(snapshot: &MapSnapshot) -> ValidationResult {
    let mut result = ValidationResult::new();

    for coord in Coord::all() {
        if snapshot.grid().is_room(coord) {
            continue;
        }
        let cell = classify_cell(snapshot, coord);
        if cell.category.is_special() {
            result.push(
                Diagnostic::warning(
                    "underspire::validate::feature-on-void",
                    format!(
                        "{} '{}' at {} is on an empty cell",
                        cell.category.name(),
                        cell.label.unwrap_or_default(),
                        coord.to_packed()
                    ),
                )
                .at(coord),
            );
        }
    }

    result
}

/// The current position should be a room.
pub fn check_current_position(snapshot: &MapSnapshot) -> ValidationResult {
    let mut result = ValidationResult::new();

    if let Some(coord) = snapshot.current() {
        if !snapshot.grid().is_room(coord) {
            result.push(
                Diagnostic::warning(
                    "underspire::validate::current-void",
                    format!("Current position {} is an empty cell", coord.to_packed()),
                )
                .at(coord),
            );
        }
    }

    result
}
