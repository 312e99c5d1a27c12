//! Error types for registry operations.
//!
//! Provides a unified error type covering loading (I/O, JSON, YAML),
//! registration conflicts, and descriptor validation failures.

use std::path::PathBuf;

use iam_schema_core::DescriptorError;
use thiserror::Error;

/// Errors that can occur while building or populating a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A table with the same name is already registered.
    #[error("table already registered: {0}")]
    DuplicateTable(String),

    /// A descriptor failed structural validation.
    #[error("invalid table '{table}': {error}")]
    InvalidTable {
        table: String,
        error: DescriptorError,
    },

    /// A package bundle failed validation as a whole.
    #[error("invalid bundle '{}': {error}", path.display())]
    InvalidBundle {
        path: PathBuf,
        error: DescriptorError,
    },

    /// The configuration file declares a format version this crate does not
    /// read.
    #[error("unsupported config version: {0}")]
    UnsupportedConfigVersion(String),

    /// The builder was given no sources.
    #[error("no schema sources configured")]
    NoSourcesAvailable,
}

/// Convenience alias for results with [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;
