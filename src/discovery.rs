//! Input discovery.
//!
//! Expands command-line paths into snapshot inputs: `-` is stdin, files are
//! taken as-is, and directories are walked recursively for `*.json` files.

use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{MapError, Result};
use crate::output::display_path;

/// One snapshot source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Parse a command-line argument (`-` means stdin).
    pub fn from_arg(path: &Path) -> Self {
        if path == Path::new("-") {
            Input::Stdin
        } else {
            Input::File(path.to_path_buf())
        }
    }

    /// Base name for derived output files.
    pub fn stem(&self) -> String {
        match self {
            Input::Stdin => "stdin".to_string(),
            Input::File(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "snapshot".to_string()),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => write!(f, "<stdin>"),
            Input::File(path) => write!(f, "{}", display_path(path)),
        }
    }
}

/// Expand paths into inputs, preserving argument order.
pub fn collect_inputs(paths: &[PathBuf], config: &Config) -> Result<Vec<Input>> {
    let mut inputs = Vec::new();

    for path in paths {
        match Input::from_arg(path) {
            Input::Stdin => inputs.push(Input::Stdin),
            Input::File(path) if path.is_dir() => {
                inputs.extend(scan_directory(&path, config).into_iter().map(Input::File));
            }
            Input::File(path) if path.is_file() => inputs.push(Input::File(path)),
            Input::File(path) => {
                return Err(MapError::Io {
                    message: "No such file or directory".to_string(),
                    path,
                })
            }
        }
    }

    Ok(inputs)
}

/// Recursively find snapshot files under a directory, sorted by path.
pub fn scan_directory(root: &Path, config: &Config) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_snapshot_file(p) && !config.is_excluded(p))
        .collect();

    files.sort();
    files
}

/// Snapshots are `.json` files.
pub fn is_snapshot_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_input_from_arg() {
        assert_eq!(Input::from_arg(Path::new("-")), Input::Stdin);
        assert_eq!(
            Input::from_arg(Path::new("state.json")),
            Input::File(PathBuf::from("state.json"))
        );
    }

    #[test]
    fn test_stem() {
        assert_eq!(Input::Stdin.stem(), "stdin");
        assert_eq!(Input::File(PathBuf::from("maps/day-3.json")).stem(), "day-3");
    }

    #[test]
    fn test_is_snapshot_file() {
        assert!(is_snapshot_file(Path::new("a.json")));
        assert!(is_snapshot_file(Path::new("a.JSON")));
        assert!(!is_snapshot_file(Path::new("a.yaml")));
        assert!(!is_snapshot_file(Path::new("json")));
    }

    #[test]
    fn test_scan_directory_recursive_and_sorted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("week1")).unwrap();
        fs::create_dir_all(dir.path().join("archive")).unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("week1/c.json"), "{}").unwrap();
        fs::write(dir.path().join("archive/old.json"), "{}").unwrap();

        let config = Config {
            excludes: vec!["**/archive/*".to_string()],
            ..Default::default()
        };
        let files = scan_directory(dir.path(), &config);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();

        assert_eq!(names, vec!["a.json", "b.json", "week1/c.json"]);
    }

    #[test]
    fn test_collect_inputs_missing_path() {
        let err = collect_inputs(&[PathBuf::from("/nonexistent/state.json")], &Config::default())
            .unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
    }

    #[test]
    fn test_collect_inputs_mixed() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("one.json");
        fs::write(&file, "{}").unwrap();

        let inputs = collect_inputs(&[PathBuf::from("-"), file.clone()], &Config::default()).unwrap();
        assert_eq!(inputs, vec![Input::Stdin, Input::File(file)]);
    }
}
