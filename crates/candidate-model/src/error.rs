//! Error types for the candidate-model crate.
//!
//! - thiserror for deriving `Display` and `Error`
//! - One enum covering catalog loading and payload decoding
//! - Variants carry enough context to point at the offending input

use thiserror::Error;

/// Errors that can occur while loading category catalogs or decoding
/// endpoint payloads.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Catalog file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON document didn't match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A category name that isn't one of the known filter fields
    #[error("Unknown filter category: {0}")]
    UnknownCategory(String),

    /// A catalog that parsed but breaks a structural rule
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ModelError>;
