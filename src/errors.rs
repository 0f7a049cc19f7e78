// ABOUTME: Error types for the revealkit application
// ABOUTME: Provides structured error handling for config, content, watch and serving stages

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Last reload failed: {0}")]
    ReloadError(String),

    #[error("Plugin {0} is not supported")]
    UnknownPlugin(String),

    #[error("Error in config '{key}': {message}")]
    InvalidOption { key: String, message: String },

    #[error("Invalid metadata block in {path}: {message}")]
    MetadataError { path: String, message: String },

    #[error("Unsupported preset name: {0}")]
    UnsupportedPreset(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Watch error: {0}")]
    WatchError(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

impl SlideError {
    /// Map a file source error, turning not-found into a path error.
    pub fn from_source(err: std::io::Error, path: &str) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            SlideError::PathNotFoundError(PathBuf::from(path))
        } else {
            SlideError::FileReadError(err)
        }
    }
}

impl From<notify::Error> for SlideError {
    fn from(err: notify::Error) -> Self {
        SlideError::WatchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SlideError>;
