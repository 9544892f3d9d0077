//! Error types for the editor core

use doc_model::{ElementId, ElementType};
use thiserror::Error;

/// Editor operation errors
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Element {id} is a {actual:?}, not a text box")]
    NotATextBox { id: ElementId, actual: ElementType },

    #[error("Invalid page number {0} (pages are numbered from 1)")]
    InvalidPage(u32),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Errors reading or writing project snapshots
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Unsupported snapshot schema version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that can occur during configuration operations
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for configuration key: {0}")]
    InvalidValue(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Encode error: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
