//! Error types for the lab application
//!
//! Covers configuration loading, asset loading and scene classification.
//! Runtime systems log these instead of propagating them; the binary
//! surfaces configuration errors through `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or loading the lab scene
#[derive(Error, Debug)]
pub enum LabError {
    /// Config file I/O error
    #[error("Config I/O error at {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config deserialization error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A config value is outside its accepted range
    #[error("Invalid setting `{field}`: {message}")]
    InvalidSetting { field: &'static str, message: String },

    /// The scene asset could not be loaded
    #[error("Failed to load asset {path}: {reason}")]
    AssetLoad { path: String, reason: String },

    /// A named container node was not found in the loaded scene
    #[error("Container node `{name}` not found in the loaded scene")]
    MissingContainer { name: String },
}

/// Result type alias for lab operations
pub type LabResult<T> = Result<T, LabError>;
