//! Two-cell gate connectors.
//!
//! A gate is anchored on a base cell and extends one cell up (vertical) or
//! one cell right (horizontal). Gates are registered whole or not at all.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use super::coord::Coord;

/// Orientation of a gate's cell pair, from the input's direction flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GateDirection {
    /// Flag `0`: the base cell and the cell one row above.
    Vertical,
    /// Flag `1`: the base cell and the cell one column to the right.
    Horizontal,
}

impl GateDirection {
    /// Map a raw direction flag. Only exactly `0` or `1` is recognised.
    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(GateDirection::Vertical),
            1 => Some(GateDirection::Horizontal),
            _ => None,
        }
    }

    fn step(self) -> (i64, i64) {
        match self {
            GateDirection::Vertical => (-1, 0),
            GateDirection::Horizontal => (0, 1),
        }
    }
}

/// A validated gate owning exactly two adjacent cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gate {
    pub id: String,
    pub direction: GateDirection,
    pub cells: [Coord; 2],
}

impl Gate {
    /// Derive the gate's cell pair, or `None` if the second cell is off the grid.
    pub fn resolve(id: impl Into<String>, base: Coord, direction: GateDirection) -> Option<Self> {
        let (d_row, d_col) = direction.step();
        let partner = base.offset(d_row, d_col)?;
        Some(Self {
            id: id.into(),
            direction,
            cells: [base, partner],
        })
    }
}

/// Why a gate entry was not registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateRejection {
    /// The overlapping cell is already owned by the named gate.
    Overlap { cell: Coord, owner: String },
}

/// Cell-to-gate lookup built from all registered gates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateIndex {
    gates: BTreeMap<String, Gate>,
    cells: BTreeMap<Coord, String>,
}

impl GateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a gate. Both of its cells must be free; otherwise nothing is
    /// registered.
    ///
    /// A gate that overlaps an earlier one is dropped entirely, so it is
    /// missing from [`GateIndex::len`] as well as from the cell lookup. The
    /// gate count is therefore the number of non-overlapping gates, not the
    /// number of gate entries that resolved to two cells.
    pub fn register(&mut self, gate: Gate) -> Result<(), GateRejection> {
        for cell in gate.cells {
            if let Some(owner) = self.cells.get(&cell) {
                return Err(GateRejection::Overlap {
                    cell,
                    owner: owner.clone(),
                });
            }
        }
        for cell in gate.cells {
            self.cells.insert(cell, gate.id.clone());
        }
        self.gates.insert(gate.id.clone(), gate);
        Ok(())
    }

    /// ID of the gate owning a cell.
    pub fn gate_at(&self, coord: Coord) -> Option<&str> {
        self.cells.get(&coord).map(|s| s.as_str())
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Look up a gate by ID.
    pub fn get(&self, id: &str) -> Option<&Gate> {
        self.gates.get(id)
    }

    /// Number of distinct gates (not cells).
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Gates in resolution order.
    pub fn gates(&self) -> Vec<&Gate> {
        let mut gates: Vec<&Gate> = self.gates.values().collect();
        gates.sort_by(|a, b| gate_id_order(&a.id, &b.id));
        gates
    }
}

/// Ordering for gate IDs: numeric IDs ascending, then the rest lexicographically.
pub fn gate_id_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
