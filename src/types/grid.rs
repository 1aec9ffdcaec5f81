//! The raw 20x20 room grid.

use serde::Serialize;
use serde_json::Value;

use crate::error::{MapError, Result};

use super::coord::{Coord, GRID_SIZE};

/// Raw cell value marking a void (non-room) cell.
pub const EMPTY_CELL: i64 = 15;

/// Fixed-size matrix of raw room values (row-major: `cells[row][col]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Grid {
    cells: [[i64; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// A grid with every cell set to `value`.
    pub fn filled(value: i64) -> Self {
        Self {
            cells: [[value; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Build a grid from the document's `Map` value.
    ///
    /// The value must be an array of 20 rows, each an array of 20 integers.
    pub fn from_value(value: &Value) -> Result<Self> {
        let rows = value.as_array().ok_or_else(|| malformed("Map is not an array"))?;
        if rows.len() != GRID_SIZE {
            return Err(malformed(format!(
                "Map has {} rows, expected {}",
                rows.len(),
                GRID_SIZE
            )));
        }

        let mut grid = Grid::filled(EMPTY_CELL);
        for (r, row) in rows.iter().enumerate() {
            let row = row
                .as_array()
                .ok_or_else(|| malformed(format!("Map row {} is not an array", r)))?;
            if row.len() != GRID_SIZE {
                return Err(malformed(format!(
                    "Map row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    GRID_SIZE
                )));
            }
            for (c, cell) in row.iter().enumerate() {
                grid.cells[r][c] = integral_value(cell).ok_or_else(|| {
                    malformed(format!("Map cell ({}, {}) is not an integer: {}", r, c, cell))
                })?;
            }
        }

        Ok(grid)
    }

    /// Raw value at a coordinate.
    pub fn get(&self, coord: Coord) -> i64 {
        self.cells[coord.row()][coord.col()]
    }

    /// Whether the cell holds a room (anything but the empty sentinel).
    pub fn is_room(&self, coord: Coord) -> bool {
        self.get(coord) != EMPTY_CELL
    }

    /// Iterate over all cells with their coordinates, row-major.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord, i64)> + '_ {
        Coord::all().map(move |c| (c, self.get(c)))
    }
}

/// An integer, or a float with no fractional part (`15.0`).
pub fn integral_value(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
            .map(|f| f as i64)
    })
}

fn malformed(message: impl Into<String>) -> MapError {
    MapError::parse(
        message,
        Some("Map must be a 20x20 matrix of integers (15 marks an empty cell)"),
    )
}
