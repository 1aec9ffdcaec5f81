//! underspire-map - Underspire dungeon map viewer
//!
//! A library for decoding Underspire map snapshots (a 20x20 room grid plus
//! feature layers keyed by packed room IDs) into classified cells, summary
//! counts and rendered maps.

pub mod classify;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod output;
pub mod parser;
pub mod render;
pub mod stats;
pub mod types;
pub mod validation;

pub use classify::{classify_cell, classify_grid, CellCategory, CellModifiers, ClassifiedCell};
pub use config::{Config, CONFIG_FILENAME};
pub use discovery::{collect_inputs, Input};
pub use error::{MapError, Result};
pub use loader::{load_snapshot, parse_source};
pub use parser::{
    parse_snapshot, parse_snapshot_str, MapSnapshot, SkipReason, SkippedEntry, DEFAULT_DATA_PATH,
};
pub use render::{render_image, write_png, Format, MapReport, TextRenderer};
pub use stats::MapStats;
pub use types::{
    decode_packed_id, Colour, Coord, CoordSet, Gate, GateDirection, GateIndex, Grid,
    RoomFeatureMap, Theme, EMPTY_CELL, GRID_SIZE,
};
pub use validation::{validate_snapshot, Diagnostic, Severity, ValidationResult};
