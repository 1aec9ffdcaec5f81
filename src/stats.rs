//! Summary counts for a snapshot.

use std::fmt;

use serde::Serialize;

use crate::parser::MapSnapshot;

/// Aggregate counts shown above the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MapStats {
    /// Cells whose raw value is not the empty sentinel.
    pub total_rooms: usize,
    /// Room cells that are in the completed set.
    pub completed: usize,
    /// `total_rooms - completed`.
    pub remaining: usize,
    pub treasure: usize,
    pub collected_treasure: usize,
    pub boss: usize,
    /// Distinct gates, not gate cells.
    pub gates: usize,
}

impl MapStats {
    /// Count rooms and features.
    ///
    /// Completion is counted by scanning the grid, so completed IDs that land
    /// on void cells never inflate the total.
    pub fn compute(snapshot: &MapSnapshot) -> Self {
        let grid = snapshot.grid();
        let (total_rooms, completed) = grid
            .iter_cells()
            .filter(|&(coord, _)| grid.is_room(coord))
            .fold((0, 0), |(total, done), (coord, _)| {
                let done = done + usize::from(snapshot.completed().contains(coord));
                (total + 1, done)
            });

        Self {
            total_rooms,
            completed,
            remaining: total_rooms - completed,
            treasure: snapshot.treasure().len(),
            collected_treasure: snapshot.collected_treasure().len(),
            boss: snapshot.boss().len(),
            gates: snapshot.gates().len(),
        }
    }
}

impl fmt::Display for MapStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Completed: {} | Treasure: {} (collected: {}) | Bosses: {} | Gates: {}",
            self.completed, self.treasure, self.collected_treasure, self.boss, self.gates
        )?;
        write!(f, "Rooms left to open: {} of {}", self.remaining, self.total_rooms)
    }
}
