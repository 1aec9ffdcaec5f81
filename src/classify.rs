//! Per-cell classification.
//!
//! Every grid cell gets exactly one primary [`CellCategory`], picked by
//! precedence (gate, treasure, boss, empty, completed, room), plus
//! independent [`CellModifiers`].

use serde::Serialize;

use crate::parser::MapSnapshot;
use crate::types::Coord;

/// Primary visual category of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellCategory {
    Gate,
    Treasure,
    Boss,
    Empty,
    Completed,
    Room,
}

impl CellCategory {
    /// All categories, in precedence order.
    pub const ALL: [CellCategory; 6] = [
        CellCategory::Gate,
        CellCategory::Treasure,
        CellCategory::Boss,
        CellCategory::Empty,
        CellCategory::Completed,
        CellCategory::Room,
    ];

    /// Gate, treasure and boss cells are special rooms.
    pub fn is_special(self) -> bool {
        matches!(
            self,
            CellCategory::Gate | CellCategory::Treasure | CellCategory::Boss
        )
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            CellCategory::Gate => "gate",
            CellCategory::Treasure => "treasure",
            CellCategory::Boss => "boss",
            CellCategory::Empty => "empty",
            CellCategory::Completed => "completed",
            CellCategory::Room => "room",
        }
    }
}

/// Highlights layered on top of the primary category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CellModifiers {
    /// The player is here.
    pub is_current: bool,
    /// A gate, treasure or boss room that has been completed.
    pub special_completed: bool,
    /// A treasure room whose item has been collected.
    pub collected_treasure: bool,
}

/// The rendering decision for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedCell {
    pub coord: Coord,
    /// Raw grid value, passed through for display.
    pub raw: i64,
    pub category: CellCategory,
    /// Gate, treasure or boss ID shown in the cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub modifiers: CellModifiers,
}

/// Classify a single cell.
pub fn classify_cell(snapshot: &MapSnapshot, coord: Coord) -> ClassifiedCell {
    let (category, label) = if let Some(gate) = snapshot.gates().gate_at(coord) {
        (CellCategory::Gate, Some(gate.to_string()))
    } else if let Some(treasure) = snapshot.treasure().get(coord) {
        (CellCategory::Treasure, Some(treasure.to_string()))
    } else if let Some(boss) = snapshot.boss().get(coord) {
        (CellCategory::Boss, Some(boss.to_string()))
    } else if !snapshot.grid().is_room(coord) {
        (CellCategory::Empty, None)
    } else if snapshot.completed().contains(coord) {
        (CellCategory::Completed, None)
    } else {
        (CellCategory::Room, None)
    };

    let modifiers = CellModifiers {
        is_current: snapshot.current() == Some(coord),
        special_completed: category.is_special() && snapshot.completed().contains(coord),
        collected_treasure: snapshot.collected_treasure().contains(coord),
    };

    ClassifiedCell {
        coord,
        raw: snapshot.grid().get(coord),
        category,
        label,
        modifiers,
    }
}

/// Classify every cell of the grid, row-major.
pub fn classify_grid(snapshot: &MapSnapshot) -> Vec<ClassifiedCell> {
    Coord::all().map(|coord| classify_cell(snapshot, coord)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::snapshot::testing::{document, grid_with_rooms};
    use crate::parser::{parse_snapshot, DEFAULT_DATA_PATH};
    use crate::types::CELL_COUNT;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn c(row: i64, col: i64) -> Coord {
        Coord::new(row, col).unwrap()
    }

    fn snapshot(rooms: &[(usize, usize)], fields: Value) -> MapSnapshot {
        parse_snapshot(&document(grid_with_rooms(rooms), fields), DEFAULT_DATA_PATH).unwrap()
    }

    #[test]
    fn test_every_cell_gets_one_category() {
        let snap = snapshot(
            &[(1, 1), (2, 2), (3, 3)],
            json!({
                "Completed": ["0202"],
                "TreasureRoomInfo": { "0303": "T" },
                "Gates": { "1": { "Node": "0505", "Dir": 1 } }
            }),
        );

        let cells = classify_grid(&snap);
        assert_eq!(cells.len(), CELL_COUNT);
        assert_eq!(cells[0].coord, c(0, 0));
        assert_eq!(cells[CELL_COUNT - 1].coord, c(19, 19));
    }

    #[test]
    fn test_plain_categories() {
        let snap = snapshot(&[(1, 1), (2, 2)], json!({ "Completed": ["0202"] }));

        assert_eq!(classify_cell(&snap, c(0, 0)).category, CellCategory::Empty);
        assert_eq!(classify_cell(&snap, c(1, 1)).category, CellCategory::Room);
        assert_eq!(classify_cell(&snap, c(2, 2)).category, CellCategory::Completed);
        assert_eq!(classify_cell(&snap, c(1, 1)).raw, 1);
        assert_eq!(classify_cell(&snap, c(0, 0)).raw, 15);
    }

    #[test]
    fn test_completed_void_cell_stays_empty() {
        let snap = snapshot(&[], json!({ "Completed": ["0404"] }));
        assert_eq!(classify_cell(&snap, c(4, 4)).category, CellCategory::Empty);
    }

    #[test]
    fn test_gate_beats_treasure_beats_boss() {
        let snap = snapshot(
            &[(5, 5), (5, 6), (7, 7)],
            json!({
                "TreasureRoomInfo": { "0505": "T1", "0707": "T2" },
                "BossRoomInfo": { "0505": "B1", "0707": "B2", "0808": "B3" },
                "Gates": { "4": { "Node": "0505", "Dir": 1 } }
            }),
        );

        let gate = classify_cell(&snap, c(5, 5));
        assert_eq!(gate.category, CellCategory::Gate);
        assert_eq!(gate.label.as_deref(), Some("4"));
        assert_eq!(classify_cell(&snap, c(5, 6)).label.as_deref(), Some("4"));

        let treasure = classify_cell(&snap, c(7, 7));
        assert_eq!(treasure.category, CellCategory::Treasure);
        assert_eq!(treasure.label.as_deref(), Some("T2"));

        // boss on a void cell still shows as a boss
        let boss = classify_cell(&snap, c(8, 8));
        assert_eq!(boss.category, CellCategory::Boss);
        assert_eq!(boss.label.as_deref(), Some("B3"));
    }

    #[test]
    fn test_completed_treasure_keeps_overlay() {
        let snap = snapshot(
            &[(3, 3)],
            json!({
                "Completed": ["0303"],
                "TreasureRoomInfo": { "0303": "T" }
            }),
        );

        let cell = classify_cell(&snap, c(3, 3));
        assert_eq!(cell.category, CellCategory::Treasure);
        assert!(cell.modifiers.special_completed);
    }

    #[test]
    fn test_completed_plain_room_is_not_special() {
        let snap = snapshot(&[(3, 3)], json!({ "Completed": ["0303"] }));
        assert!(!classify_cell(&snap, c(3, 3)).modifiers.special_completed);
    }

    #[test]
    fn test_modifiers_are_independent() {
        let snap = snapshot(
            &[(6, 6)],
            json!({
                "Completed": ["0606"],
                "TreasureRoomInfo": { "0606": "T" },
                "Collected": ["0606"],
                "CurrentNode": 606
            }),
        );

        let cell = classify_cell(&snap, c(6, 6));
        assert_eq!(
            cell.modifiers,
            CellModifiers {
                is_current: true,
                special_completed: true,
                collected_treasure: true,
            }
        );
    }

    #[test]
    fn test_current_on_empty_cell() {
        let snap = snapshot(&[], json!({ "CurrentNode": "0000" }));
        let cell = classify_cell(&snap, c(0, 0));
        assert_eq!(cell.category, CellCategory::Empty);
        assert!(cell.modifiers.is_current);
    }

    #[test]
    fn test_serialized_cell() {
        let snap = snapshot(&[(0, 1)], json!({ "BossRoomInfo": { "0001": "Ogre" } }));
        let json = serde_json::to_value(classify_cell(&snap, c(0, 1))).unwrap();
        assert_eq!(
            json,
            json!({
                "coord": { "row": 0, "col": 1 },
                "raw": 1,
                "category": "boss",
                "label": "Ogre",
                "modifiers": {
                    "is_current": false,
                    "special_completed": false,
                    "collected_treasure": false
                }
            })
        );
    }
}
