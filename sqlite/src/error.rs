//! Error types for SQLite schema operations.
//!
//! Covers database access, unsafe identifiers or defaults in descriptors,
//! and declared column types that do not map back to a descriptor type.

use thiserror::Error;

/// Errors that can occur during SQLite schema operations.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// SQLite database operation failure.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// Table or column name contains invalid characters.
    #[error("invalid identifier '{0}': must contain only alphanumeric characters and underscores")]
    InvalidIdentifier(String),

    /// Default value is not a plain SQL literal.
    #[error("invalid default for {table}.{column}: {value}")]
    InvalidDefault {
        table: String,
        column: String,
        value: String,
    },

    /// Declared column type has no descriptor equivalent.
    #[error("unsupported column type for {table}.{column}: {declared}")]
    UnsupportedType {
        table: String,
        column: String,
        declared: String,
    },

    /// Requested table is not registered.
    #[error("table not found: {0}")]
    TableNotFound(String),
}

/// Convenience alias for results with [`SqliteError`].
pub type Result<T> = std::result::Result<T, SqliteError>;
