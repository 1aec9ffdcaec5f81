//! Feature extraction.
//!
//! Turns a [`RawMapData`] section into a [`MapSnapshot`]: the grid plus one
//! coordinate collection per feature layer. Only a missing or malformed `Map`
//! fails; every other bad entry is dropped on its own and noted in the
//! snapshot's skipped-entry list.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map as JsonObject, Value};

use crate::error::{MapError, Result};
use crate::types::{
    decode_packed_id, decode_packed_str, gate_id_order, integral_value, packed_text, Coord,
    CoordSet, Gate, GateDirection, GateIndex, GateRejection, Grid, RoomFeatureMap,
};

use super::document::{RawMapData, DEFAULT_DATA_PATH};

/// Input field a skipped entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SnapshotField {
    Completed,
    TreasureRoomInfo,
    BossRoomInfo,
    Gates,
    Collected,
    CurrentNode,
}

impl SnapshotField {
    /// Field name as it appears in the document.
    pub fn name(self) -> &'static str {
        match self {
            SnapshotField::Completed => "Completed",
            SnapshotField::TreasureRoomInfo => "TreasureRoomInfo",
            SnapshotField::BossRoomInfo => "BossRoomInfo",
            SnapshotField::Gates => "Gates",
            SnapshotField::Collected => "Collected",
            SnapshotField::CurrentNode => "CurrentNode",
        }
    }
}

impl fmt::Display for SnapshotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why an entry was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The room ID does not decode to a grid coordinate.
    InvalidPackedId,
    /// The gate's `Dir` is not 0 or 1.
    InvalidDirection,
    /// The gate's second cell is off the grid.
    GateOutOfBounds,
    /// The gate shares a cell with an earlier gate.
    GateOverlap { cell: Coord, owner: String },
    /// The entry (or the whole field) has the wrong JSON shape.
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidPackedId => write!(f, "room ID is not on the 20x20 grid"),
            SkipReason::InvalidDirection => write!(f, "Dir must be 0 or 1"),
            SkipReason::GateOutOfBounds => write!(f, "gate extends past the grid edge"),
            SkipReason::GateOverlap { cell, owner } => {
                write!(f, "cell {} already belongs to gate {}", cell, owner)
            }
            SkipReason::Malformed(detail) => write!(f, "{}", detail),
        }
    }
}

impl Serialize for SkipReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An input entry that was dropped during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub field: SnapshotField,
    /// The entry as it appeared in the input (ID, key or raw JSON).
    pub entry: String,
    pub reason: SkipReason,
}

/// Decoded map state: the grid and every feature layer.
///
/// Built fresh from an input document and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct MapSnapshot {
    grid: Grid,
    completed: CoordSet,
    treasure: RoomFeatureMap,
    boss: RoomFeatureMap,
    gates: GateIndex,
    collected: CoordSet,
    collected_treasure: CoordSet,
    current: Option<Coord>,
    skipped: Vec<SkippedEntry>,
}

impl MapSnapshot {
    /// Extract all feature layers from a raw map section.
    pub fn from_raw(raw: &RawMapData) -> Result<Self> {
        let map = raw.map.as_ref().ok_or_else(|| {
            MapError::parse(
                "Map is missing from the map data",
                Some("The snapshot must include a 20x20 Map matrix"),
            )
        })?;
        let grid = Grid::from_value(map)?;

        let mut skipped = Vec::new();

        let completed = extract_coord_list(raw.completed.as_ref(), SnapshotField::Completed, &mut skipped);
        let treasure =
            extract_room_map(raw.treasure_room_info.as_ref(), SnapshotField::TreasureRoomInfo, &mut skipped);
        let boss = extract_room_map(raw.boss_room_info.as_ref(), SnapshotField::BossRoomInfo, &mut skipped);
        let gates = extract_gates(raw.gates.as_ref(), &mut skipped);
        let collected = extract_coord_list(raw.collected.as_ref(), SnapshotField::Collected, &mut skipped);
        let current = extract_current(raw.current_node.as_ref(), &mut skipped);

        // A collected marker only counts as treasure if the treasure entry decoded
        let collected_treasure = collected.intersection(&treasure.coords());

        Ok(Self {
            grid,
            completed,
            treasure,
            boss,
            gates,
            collected,
            collected_treasure,
            current,
            skipped,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn completed(&self) -> &CoordSet {
        &self.completed
    }

    pub fn treasure(&self) -> &RoomFeatureMap {
        &self.treasure
    }

    pub fn boss(&self) -> &RoomFeatureMap {
        &self.boss
    }

    pub fn gates(&self) -> &GateIndex {
        &self.gates
    }

    /// Every collected item location, treasure or not.
    pub fn collected(&self) -> &CoordSet {
        &self.collected
    }

    /// Collected items that sit on a known treasure room.
    pub fn collected_treasure(&self) -> &CoordSet {
        &self.collected_treasure
    }

    pub fn current(&self) -> Option<Coord> {
        self.current
    }

    /// Entries dropped during extraction, in input order per field.
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }
}

/// Parse a snapshot from a decoded JSON document.
///
/// `data_path` is a JSON pointer to the map section.
pub fn parse_snapshot(root: &Value, data_path: &str) -> Result<MapSnapshot> {
    let raw = RawMapData::locate(root, data_path)?;
    MapSnapshot::from_raw(&raw)
}

/// Parse a snapshot from JSON text using the default data path.
pub fn parse_snapshot_str(source: &str) -> Result<MapSnapshot> {
    let root: Value = serde_json::from_str(source)?;
    parse_snapshot(&root, DEFAULT_DATA_PATH)
}

fn skip(skipped: &mut Vec<SkippedEntry>, field: SnapshotField, entry: impl Into<String>, reason: SkipReason) {
    skipped.push(SkippedEntry {
        field,
        entry: entry.into(),
        reason,
    });
}

fn entry_text(value: &Value) -> String {
    packed_text(value).unwrap_or_else(|| value.to_string())
}

/// Display text for an opaque label value.
fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn extract_coord_list(value: Option<&Value>, field: SnapshotField, skipped: &mut Vec<SkippedEntry>) -> CoordSet {
    let mut set = CoordSet::new();

    let Some(value) = value else {
        return set;
    };
    let Some(items) = value.as_array() else {
        skip(skipped, field, value.to_string(), SkipReason::Malformed("expected a list of room IDs".to_string()));
        return set;
    };

    for item in items {
        match decode_packed_id(item) {
            Some(coord) => {
                set.insert(coord);
            }
            None => skip(skipped, field, entry_text(item), SkipReason::InvalidPackedId),
        }
    }

    set
}

fn extract_room_map(value: Option<&Value>, field: SnapshotField, skipped: &mut Vec<SkippedEntry>) -> RoomFeatureMap {
    let mut rooms = RoomFeatureMap::new();

    let Some(value) = value else {
        return rooms;
    };
    let Some(entries) = value.as_object() else {
        skip(skipped, field, value.to_string(), SkipReason::Malformed("expected a mapping of room ID to label".to_string()));
        return rooms;
    };

    for (key, label) in entries {
        match decode_packed_str(key) {
            Some(coord) => rooms.insert(coord, label_text(label)),
            None => skip(skipped, field, key.clone(), SkipReason::InvalidPackedId),
        }
    }

    rooms
}

fn extract_gates(value: Option<&Value>, skipped: &mut Vec<SkippedEntry>) -> GateIndex {
    let mut index = GateIndex::new();

    let Some(value) = value else {
        return index;
    };
    let Some(entries) = value.as_object() else {
        skip(
            skipped,
            SnapshotField::Gates,
            value.to_string(),
            SkipReason::Malformed("expected a mapping of gate ID to { Node, Dir }".to_string()),
        );
        return index;
    };

    let mut ids: Vec<&String> = entries.keys().collect();
    ids.sort_by(|a, b| gate_id_order(a, b));

    for id in ids {
        let Some(entry) = entries.get(id.as_str()) else {
            continue;
        };
        match resolve_gate(id, entry) {
            Ok(gate) => {
                if let Err(GateRejection::Overlap { cell, owner }) = index.register(gate) {
                    skip(skipped, SnapshotField::Gates, id.clone(), SkipReason::GateOverlap { cell, owner });
                }
            }
            Err(reason) => skip(skipped, SnapshotField::Gates, id.clone(), reason),
        }
    }

    index
}

fn resolve_gate(id: &str, entry: &Value) -> std::result::Result<Gate, SkipReason> {
    let fields: &JsonObject<String, Value> = entry
        .as_object()
        .ok_or_else(|| SkipReason::Malformed("gate entry is not an object".to_string()))?;

    let base = fields
        .get("Node")
        .and_then(decode_packed_id)
        .ok_or(SkipReason::InvalidPackedId)?;

    let direction = fields
        .get("Dir")
        .and_then(integral_value)
        .and_then(GateDirection::from_flag)
        .ok_or(SkipReason::InvalidDirection)?;

    Gate::resolve(id, base, direction).ok_or(SkipReason::GateOutOfBounds)
}

fn extract_current(value: Option<&Value>, skipped: &mut Vec<SkippedEntry>) -> Option<Coord> {
    let value = value?;
    let coord = decode_packed_id(value);
    if coord.is_none() {
        skip(skipped, SnapshotField::CurrentNode, entry_text(value), SkipReason::InvalidPackedId);
    }
    coord
}

#[cfg(test)]
pub(crate) mod testing {
    use serde_json::{json, Value};

    use crate::types::{EMPTY_CELL, GRID_SIZE};

    /// A 20x20 grid with rooms (raw value 1) at the given cells.
    pub fn grid_with_rooms(rooms: &[(usize, usize)]) -> Value {
        let mut rows = vec![vec![EMPTY_CELL; GRID_SIZE]; GRID_SIZE];
        for &(r, c) in rooms {
            rows[r][c] = 1;
        }
        json!(rows)
    }

    /// Wrap map data fields in a full game state response.
    pub fn document(map: Value, mut fields: Value) -> Value {
        fields["Map"] = map;
        json!({ "result": { "Info": { "UnderspireData": fields } } })
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{document, grid_with_rooms};
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn c(row: i64, col: i64) -> Coord {
        Coord::new(row, col).unwrap()
    }

    fn parse(fields: Value) -> MapSnapshot {
        parse_snapshot(&document(grid_with_rooms(&[(1, 1)]), fields), DEFAULT_DATA_PATH).unwrap()
    }

    #[test]
    fn test_minimal_document() {
        let snapshot = parse(json!({ "CurrentNode": "0101" }));

        assert_eq!(snapshot.current(), Some(c(1, 1)));
        assert!(snapshot.completed().is_empty());
        assert!(snapshot.treasure().is_empty());
        assert!(snapshot.gates().is_empty());
        assert!(snapshot.skipped().is_empty());
    }

    #[test]
    fn test_missing_map_fails() {
        let doc = json!({ "result": { "Info": { "UnderspireData": { "Completed": ["0101"] } } } });
        let err = parse_snapshot(&doc, DEFAULT_DATA_PATH).unwrap_err();
        assert!(err.to_string().contains("Map is missing"));
    }

    #[test]
    fn test_missing_section_fails() {
        let err = parse_snapshot(&json!({ "result": {} }), DEFAULT_DATA_PATH).unwrap_err();
        assert!(matches!(err, MapError::Parse { .. }));
    }

    #[test]
    fn test_invalid_json_text_fails() {
        let err = parse_snapshot_str("{ not json").unwrap_err();
        assert!(matches!(err, MapError::Json { .. }));
    }

    #[test]
    fn test_bad_entries_are_dropped_individually() {
        let snapshot = parse(json!({
            "Completed": ["0101", "2000", 305, "zz"],
            "Collected": ["0202", null]
        }));

        assert_eq!(snapshot.completed().iter().collect::<Vec<_>>(), vec![c(1, 1), c(3, 5)]);
        assert_eq!(snapshot.collected().len(), 1);

        let skipped: Vec<(SnapshotField, &str)> = snapshot
            .skipped()
            .iter()
            .map(|s| (s.field, s.entry.as_str()))
            .collect();
        assert_eq!(
            skipped,
            vec![
                (SnapshotField::Completed, "2000"),
                (SnapshotField::Completed, "zz"),
                (SnapshotField::Collected, "null"),
            ]
        );
    }

    #[test]
    fn test_room_maps_keep_labels() {
        let snapshot = parse(json!({
            "TreasureRoomInfo": { "0505": "T1", "0606": 42, "9999": "lost" },
            "BossRoomInfo": { "1010": "Lich" }
        }));

        assert_eq!(snapshot.treasure().get(c(5, 5)), Some("T1"));
        assert_eq!(snapshot.treasure().get(c(6, 6)), Some("42"));
        assert_eq!(snapshot.treasure().len(), 2);
        assert_eq!(snapshot.boss().get(c(10, 10)), Some("Lich"));
        assert_eq!(snapshot.skipped().len(), 1);
        assert_eq!(snapshot.skipped()[0].reason, SkipReason::InvalidPackedId);
    }

    #[test]
    fn test_collected_treasure_requires_decoded_treasure_room() {
        let snapshot = parse(json!({
            "TreasureRoomInfo": { "0505": "T1", "a006": "T2" },
            "Collected": ["0505", "a006", "0707"]
        }));

        // "a006" never decodes, so nothing is collected treasure there
        assert_eq!(snapshot.collected().len(), 2);
        assert_eq!(snapshot.collected_treasure().iter().collect::<Vec<_>>(), vec![c(5, 5)]);
    }

    #[test]
    fn test_gates_resolve_both_cells() {
        let snapshot = parse(json!({
            "Gates": {
                "1": { "Node": "0505", "Dir": 0 },
                "2": { "Node": "0808", "Dir": 1 }
            }
        }));

        let gates = snapshot.gates();
        assert_eq!(gates.len(), 2);
        assert_eq!(gates.gate_at(c(5, 5)), Some("1"));
        assert_eq!(gates.gate_at(c(4, 5)), Some("1"));
        assert_eq!(gates.gate_at(c(8, 8)), Some("2"));
        assert_eq!(gates.gate_at(c(8, 9)), Some("2"));
        assert_eq!(gates.get("2").map(|g| g.cells), Some([c(8, 8), c(8, 9)]));
    }

    #[test]
    fn test_invalid_gates_are_dropped_whole() {
        let snapshot = parse(json!({
            "Gates": {
                "1": { "Node": "0005", "Dir": 0 },
                "2": { "Node": "0519", "Dir": 1 },
                "3": { "Node": "0505", "Dir": 2 },
                "4": { "Node": "0505", "Dir": "1" },
                "5": { "Node": "bad", "Dir": 1 },
                "6": "0505",
                "7": { "Node": 303, "Dir": 1.0 }
            }
        }));

        let gates = snapshot.gates();
        assert_eq!(gates.len(), 1);
        assert_eq!(Coord::all().filter(|&cell| gates.contains(cell)).count(), 2);
        assert!(gates.contains(c(3, 3)) && gates.contains(c(3, 4)));
        // one-sided gates never leave a cell behind
        assert!(!gates.contains(c(0, 5)));
        assert!(!gates.contains(c(5, 19)));

        let reasons: Vec<SkipReason> = snapshot.skipped().iter().map(|s| s.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::GateOutOfBounds,
                SkipReason::GateOutOfBounds,
                SkipReason::InvalidDirection,
                SkipReason::InvalidDirection,
                SkipReason::InvalidPackedId,
                SkipReason::Malformed("gate entry is not an object".to_string()),
            ]
        );
    }

    #[test]
    fn test_one_bad_gate_among_ten() {
        let mut gates = serde_json::Map::new();
        for i in 0..10 {
            gates.insert(i.to_string(), json!({ "Node": format!("{:02}00", i + 1), "Dir": 1 }));
        }
        gates.insert("10".to_string(), json!({ "Node": "0119", "Dir": 1 }));

        let snapshot = parse(json!({ "Gates": gates.clone() }));
        assert_eq!(snapshot.gates().len(), 10);

        gates.insert("3".to_string(), json!({ "Node": "0400", "Dir": 7 }));
        let snapshot = parse(json!({ "Gates": gates }));
        assert_eq!(snapshot.gates().len(), 9);
    }

    #[test]
    fn test_overlapping_gate_is_skipped() {
        let snapshot = parse(json!({
            "Gates": {
                "10": { "Node": "0303", "Dir": 0 },
                "2": { "Node": "0302", "Dir": 1 }
            }
        }));

        // "2" sorts before "10", so it owns (3,3) first
        assert_eq!(snapshot.gates().gate_at(c(3, 3)), Some("2"));
        assert!(snapshot.gates().get("10").is_none());
        assert_eq!(
            snapshot.skipped()[0].reason,
            SkipReason::GateOverlap {
                cell: c(3, 3),
                owner: "2".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_field_shapes_become_empty() {
        let snapshot = parse(json!({
            "Completed": "0101",
            "TreasureRoomInfo": ["0505"],
            "Gates": 3
        }));

        assert!(snapshot.completed().is_empty());
        assert!(snapshot.treasure().is_empty());
        assert!(snapshot.gates().is_empty());
        assert_eq!(snapshot.skipped().len(), 3);
    }

    #[test]
    fn test_invalid_current_node_is_absent() {
        let snapshot = parse(json!({ "CurrentNode": "2020" }));
        assert_eq!(snapshot.current(), None);
        assert_eq!(snapshot.skipped()[0].field, SnapshotField::CurrentNode);

        let snapshot = parse(json!({ "CurrentNode": null }));
        assert_eq!(snapshot.current(), None);
        assert!(snapshot.skipped().is_empty());
    }

    #[test]
    fn test_custom_data_path() {
        let doc = json!({ "state": { "Map": grid_with_rooms(&[]) } });
        let snapshot = parse_snapshot(&doc, "/state").unwrap();
        assert!(!snapshot.grid().is_room(c(0, 0)));
    }
}
