//! Core domain types for underspire.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Coord` - A bounds-checked grid position and the packed ID codec
//! - `Grid` - The raw 20x20 room matrix
//! - `CoordSet` / `RoomFeatureMap` - Per-feature coordinate collections
//! - `Gate` / `GateIndex` - Two-cell connectors
//! - `Colour` / `Theme` - Rendering colours

mod colour;
mod coord;
mod features;
mod gate;
mod grid;
mod theme;

pub use colour::Colour;
pub use coord::{
    decode_packed_id, decode_packed_str, packed_text, Coord, CoordKey, CELL_COUNT, GRID_SIZE,
};
pub use features::{CoordSet, RoomFeatureMap};
pub use gate::{gate_id_order, Gate, GateDirection, GateIndex, GateRejection};
pub use grid::{integral_value, Grid, EMPTY_CELL};
pub use theme::Theme;
