//! Snapshot loading: read an input, enforce the size cap, and parse.
//!
//! Reading is the only I/O step; parsing itself is pure.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use serde_json::Value;

use crate::config::Config;
use crate::discovery::Input;
use crate::error::{MapError, Result};
use crate::parser::{parse_snapshot, MapSnapshot};

/// Read an input's text, rejecting anything over `max_bytes`.
pub fn read_input(input: &Input, max_bytes: u64) -> Result<String> {
    match input {
        Input::File(path) => {
            let size = fs::metadata(path)
                .map_err(|e| io_error(path.clone(), format!("Failed to read file: {}", e)))?
                .len();
            if size > max_bytes {
                return Err(too_large(path.clone(), max_bytes));
            }
            fs::read_to_string(path)
                .map_err(|e| io_error(path.clone(), format!("Failed to read file: {}", e)))
        }
        Input::Stdin => read_limited(io::stdin().lock(), max_bytes, PathBuf::from("<stdin>")),
    }
}

/// Read at most `max_bytes` from a reader.
fn read_limited(reader: impl Read, max_bytes: u64, path: PathBuf) -> Result<String> {
    let mut buf = String::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_string(&mut buf)
        .map_err(|e| io_error(path.clone(), format!("Failed to read input: {}", e)))?;

    if buf.len() as u64 > max_bytes {
        return Err(too_large(path, max_bytes));
    }
    Ok(buf)
}

/// Parse snapshot text with the configured data path.
pub fn parse_source(source: &str, config: &Config) -> Result<MapSnapshot> {
    let root: Value = serde_json::from_str(source)?;
    parse_snapshot(&root, &config.data_path)
}

/// Read and parse one snapshot.
pub fn load_snapshot(input: &Input, config: &Config) -> Result<MapSnapshot> {
    let source = read_input(input, config.max_input_bytes)?;
    parse_source(&source, config)
}

fn io_error(path: PathBuf, message: String) -> MapError {
    MapError::Io { path, message }
}

fn too_large(path: PathBuf, max_bytes: u64) -> MapError {
    io_error(
        path,
        format!("File too large (max {:.1} MB)", max_bytes as f64 / (1024.0 * 1024.0)),
    )
}
