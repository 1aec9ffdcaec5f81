use miette::Diagnostic;
use thiserror::Error;

/// Main error type for underspire operations
#[derive(Error, Diagnostic, Debug)]
pub enum MapError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(underspire::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid JSON: {message}")]
    #[diagnostic(code(underspire::json))]
    Json {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(underspire::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(underspire::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(underspire::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl MapError {
    /// Shorthand for a structural parse failure.
    pub fn parse(message: impl Into<String>, help: Option<&str>) -> Self {
        MapError::Parse {
            message: message.into(),
            help: help.map(str::to_string),
        }
    }
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        MapError::Json {
            message: err.to_string(),
            help: Some("Paste or load the full game state response".to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
