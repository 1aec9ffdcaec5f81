//! Machine-readable map report.

use serde::Serialize;

use crate::classify::{classify_grid, ClassifiedCell};
use crate::error::{MapError, Result};
use crate::parser::{MapSnapshot, SkippedEntry};
use crate::stats::MapStats;
use crate::types::{Coord, Gate};

/// Everything a frontend needs to draw the map without re-parsing.
#[derive(Debug, Serialize)]
pub struct MapReport<'a> {
    pub stats: MapStats,
    pub current: Option<Coord>,
    pub gates: Vec<&'a Gate>,
    pub cells: Vec<ClassifiedCell>,
    pub skipped: &'a [SkippedEntry],
}

impl<'a> MapReport<'a> {
    pub fn new(snapshot: &'a MapSnapshot) -> Self {
        Self {
            stats: MapStats::compute(snapshot),
            current: snapshot.current(),
            gates: snapshot.gates().gates(),
            cells: classify_grid(snapshot),
            skipped: snapshot.skipped(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| MapError::Build {
            message: format!("Failed to serialize report: {}", e),
            help: None,
        })
    }
}
