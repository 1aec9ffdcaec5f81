//! Raw snapshot document schema.
//!
//! The game state response nests the map section a few levels deep
//! (`result.Info.UnderspireData` by default). Only `Map` is mandatory; every
//! other field is kept as a raw JSON value so malformed entries can be skipped
//! one at a time during extraction.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{MapError, Result};

/// JSON pointer to the map section in a game state response.
pub const DEFAULT_DATA_PATH: &str = "/result/Info/UnderspireData";

/// The map section of a snapshot, before extraction.
///
/// Missing or `null` fields deserialize to `None` and are treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawMapData {
    /// 20x20 matrix of raw room values.
    #[serde(default)]
    pub map: Option<Value>,

    /// List of completed room IDs.
    #[serde(default)]
    pub completed: Option<Value>,

    /// Mapping of room ID to treasure label.
    #[serde(default)]
    pub treasure_room_info: Option<Value>,

    /// Mapping of room ID to boss label.
    #[serde(default)]
    pub boss_room_info: Option<Value>,

    /// Mapping of gate ID to `{ Node, Dir }`.
    #[serde(default)]
    pub gates: Option<Value>,

    /// List of collected item locations.
    #[serde(default)]
    pub collected: Option<Value>,

    /// The player's current room ID.
    #[serde(default)]
    pub current_node: Option<Value>,
}

impl RawMapData {
    /// Find and decode the map section of a document.
    pub fn locate(root: &Value, data_path: &str) -> Result<Self> {
        let data = root.pointer(data_path).ok_or_else(|| MapError::Parse {
            message: format!("No map data at '{}'", display_path(data_path)),
            help: Some("Expected a game state response containing result.Info.UnderspireData".to_string()),
        })?;

        if !data.is_object() {
            return Err(MapError::Parse {
                message: format!("Map data at '{}' is not an object", display_path(data_path)),
                help: None,
            });
        }

        Self::deserialize(data).map_err(|e| MapError::Parse {
            message: format!("Invalid map data: {}", e),
            help: None,
        })
    }
}

fn display_path(data_path: &str) -> &str {
    if data_path.is_empty() {
        "/"
    } else {
        data_path
    }
}
