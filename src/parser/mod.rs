//! Snapshot parsing.
//!
//! A snapshot is the JSON game state response. Parsing happens in two steps:
//! locate the map section (a JSON pointer, `/result/Info/UnderspireData` by
//! default) and extract the feature layers from it.
//!
//! # Usage
//!
//! ```ignore
//! use underspire_map::parser::parse_snapshot_str;
//!
//! let source = std::fs::read_to_string("state.json")?;
//! let snapshot = parse_snapshot_str(&source)?;
//!
//! println!("Current room: {:?}", snapshot.current());
//! ```

mod document;
pub(crate) mod snapshot;

pub use document::{RawMapData, DEFAULT_DATA_PATH};
pub use snapshot::{
    parse_snapshot, parse_snapshot_str, MapSnapshot, SkipReason, SkippedEntry, SnapshotField,
};
