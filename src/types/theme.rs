//! Colour theme for rendered maps.

use serde::{Deserialize, Serialize};

use super::colour::Colour;
use crate::classify::CellCategory;

/// Fill and highlight colours used by the text and PNG renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub gate: Colour,
    pub treasure: Colour,
    pub boss: Colour,
    pub completed: Colour,
    pub room: Colour,
    pub empty: Colour,
    /// Border for the current position.
    pub current: Colour,
    /// Border for a collected treasure room.
    pub collected_treasure: Colour,
    /// Border for a completed gate, treasure or boss room.
    pub special_completed: Colour,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            gate: Colour::rgb(0xFF, 0x45, 0x00),
            treasure: Colour::rgb(0xFF, 0xD7, 0x00),
            boss: Colour::rgb(0x32, 0xCD, 0x32),
            completed: Colour::rgb(0x87, 0xCE, 0xFA),
            room: Colour::rgb(0xFF, 0xFF, 0xFF),
            empty: Colour::rgb(0x2A, 0x2A, 0x2A),
            current: Colour::rgb(0x00, 0xBF, 0xFF),
            collected_treasure: Colour::rgb(0x00, 0xBF, 0xFF),
            special_completed: Colour::rgb(0xFF, 0xA5, 0x00),
        }
    }
}

impl Theme {
    /// Fill colour for a cell category.
    pub fn fill(&self, category: CellCategory) -> Colour {
        match category {
            CellCategory::Gate => self.gate,
            CellCategory::Treasure => self.treasure,
            CellCategory::Boss => self.boss,
            CellCategory::Completed => self.completed,
            CellCategory::Room => self.room,
            CellCategory::Empty => self.empty,
        }
    }
}
