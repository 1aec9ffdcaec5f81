//! Project configuration (`underspire.yaml`).
//!
//! Every field is optional. Command-line flags override config values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::output::ColourMode;
use crate::parser::DEFAULT_DATA_PATH;
use crate::render::MAX_CELL_SIZE;
use crate::types::Theme;

/// The name of the config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "underspire.yaml";

/// Default cap on input document size (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 5 * 1024 * 1024;

/// Configuration loaded from underspire.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON pointer to the map section of a snapshot.
    pub data_path: String,

    /// Largest input document accepted, in bytes.
    pub max_input_bytes: u64,

    /// Output directory for JSON and PNG renders.
    pub output: PathBuf,

    /// Pixel size of one grid cell in PNG output.
    pub cell_size: u32,

    /// When to colour terminal output.
    pub colour: ColourMode,

    /// Patterns to exclude when scanning directories for snapshots.
    pub excludes: Vec<String>,

    /// Colour overrides.
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            output: PathBuf::from("out"),
            cell_size: 24,
            colour: ColourMode::Auto,
            excludes: vec![],
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MapError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(content).map_err(|e| MapError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;

        config.check()?;
        Ok(config)
    }

    /// Load an explicit config file, or `underspire.yaml` from `dir` if it
    /// exists, or the defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn check(&self) -> Result<()> {
        if !self.data_path.is_empty() && !self.data_path.starts_with('/') {
            return Err(MapError::Config {
                message: format!("data_path '{}' is not a JSON pointer", self.data_path),
                help: Some("Use a pointer such as /result/Info/UnderspireData".to_string()),
            });
        }
        if !(1..=MAX_CELL_SIZE).contains(&self.cell_size) {
            return Err(MapError::Config {
                message: format!("cell_size must be between 1 and {}", MAX_CELL_SIZE),
                help: None,
            });
        }
        Ok(())
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }

    /// Render the config as YAML for `underspire init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| MapError::Config {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }
}

/// Simple glob matching: `*.ext`, `dir/*`, `**/dir/*`, or a plain substring.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
        }
        return path.contains(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", prefix)) || path.contains(&format!("/{}/", prefix));
    }

    path.contains(pattern)
}
