//! Table and column descriptor definitions.
//!
//! This module defines the metadata used to describe one relational table:
//! its physical name and its ordered columns with SQL type, length,
//! nullability, key status, default value, and serialization name. The types
//! are designed for serialization with [`serde`] and round-trip through JSON
//! bundles and SQLite DDL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Version of the descriptor contract (semver).
///
/// Embedded in every [`SchemaPackage`](crate::SchemaPackage) to track
/// compatibility across bundle versions.
pub const SCHEMA_CONTRACT_VERSION: &str = "1.0.0";

/// Length value for columns without a size bound.
pub const UNBOUNDED: i32 = -1;

/// SQL type of a column.
///
/// The type determines the value domain of a column and, together with its
/// nullability, the host type a typed record field would use.
///
/// # Examples
///
/// ```
/// use iam_schema_core::DatabaseType;
///
/// assert_eq!(DatabaseType::Varchar.to_string(), "VARCHAR");
/// assert_eq!("bigint".parse::<DatabaseType>().unwrap(), DatabaseType::Int8);
/// assert_eq!(DatabaseType::Varchar.host_type(true), "Option<String>");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DatabaseType {
    /// Bounded character string.
    Varchar,
    /// Unbounded character string.
    Text,
    /// 32-bit signed integer.
    Int4,
    /// 64-bit signed integer.
    Int8,
    /// Boolean.
    Bool,
    /// Point in time (UTC).
    Timestamp,
}

impl DatabaseType {
    /// All supported types, in declaration order.
    pub const ALL: [DatabaseType; 6] = [
        DatabaseType::Varchar,
        DatabaseType::Text,
        DatabaseType::Int4,
        DatabaseType::Int8,
        DatabaseType::Bool,
        DatabaseType::Timestamp,
    ];

    /// Returns the canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            DatabaseType::Varchar => "VARCHAR",
            DatabaseType::Text => "TEXT",
            DatabaseType::Int4 => "INT4",
            DatabaseType::Int8 => "INT8",
            DatabaseType::Bool => "BOOL",
            DatabaseType::Timestamp => "TIMESTAMP",
        }
    }

    /// Returns `true` for types that carry a length bound.
    pub fn is_sized(self) -> bool {
        matches!(self, DatabaseType::Varchar)
    }

    /// Returns `true` for integer types.
    pub fn is_integer(self) -> bool {
        matches!(self, DatabaseType::Int4 | DatabaseType::Int8)
    }

    /// Returns the Rust host type for a field of this type.
    ///
    /// Nullable columns are wrapped in `Option`.
    ///
    /// # Examples
    ///
    /// ```
    /// use iam_schema_core::DatabaseType;
    ///
    /// assert_eq!(DatabaseType::Int8.host_type(false), "i64");
    /// assert_eq!(DatabaseType::Timestamp.host_type(true), "Option<DateTime<Utc>>");
    /// ```
    pub fn host_type(self, nullable: bool) -> &'static str {
        match (self, nullable) {
            (DatabaseType::Varchar | DatabaseType::Text, false) => "String",
            (DatabaseType::Varchar | DatabaseType::Text, true) => "Option<String>",
            (DatabaseType::Int4, false) => "i32",
            (DatabaseType::Int4, true) => "Option<i32>",
            (DatabaseType::Int8, false) => "i64",
            (DatabaseType::Int8, true) => "Option<i64>",
            (DatabaseType::Bool, false) => "bool",
            (DatabaseType::Bool, true) => "Option<bool>",
            (DatabaseType::Timestamp, false) => "DateTime<Utc>",
            (DatabaseType::Timestamp, true) => "Option<DateTime<Utc>>",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a type name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown database type: {0}")]
pub struct UnknownDatabaseType(pub String);

impl FromStr for DatabaseType {
    type Err = UnknownDatabaseType;

    /// Parses a type name case-insensitively, accepting common SQL aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VARCHAR" | "CHARACTER VARYING" => Ok(DatabaseType::Varchar),
            "TEXT" => Ok(DatabaseType::Text),
            "INT4" | "INT" | "INTEGER" | "SMALLINT" => Ok(DatabaseType::Int4),
            "INT8" | "BIGINT" => Ok(DatabaseType::Int8),
            "BOOL" | "BOOLEAN" => Ok(DatabaseType::Bool),
            "TIMESTAMP" | "DATETIME" => Ok(DatabaseType::Timestamp),
            _ => Err(UnknownDatabaseType(s.to_string())),
        }
    }
}

/// Metadata for one column of a table.
///
/// Use the per-type constructors ([`varchar`](ColumnDescriptor::varchar),
/// [`text`](ColumnDescriptor::text), [`int4`](ColumnDescriptor::int4), ...)
/// and chain modifiers such as [`key`](ColumnDescriptor::key) or
/// [`with_default`](ColumnDescriptor::with_default). Columns start out
/// nullable.
///
/// # Examples
///
/// ```
/// use iam_schema_core::{ColumnDescriptor, DatabaseType};
///
/// let id = ColumnDescriptor::varchar("id", 36).key();
/// assert!(id.primary_key);
/// assert!(!id.nullable);
/// assert_eq!(id.length, 36);
///
/// let enabled = ColumnDescriptor::boolean("enabled")
///     .required()
///     .with_default("false");
/// assert_eq!(enabled.database_type, DatabaseType::Bool);
/// assert_eq!(enabled.default_value.as_deref(), Some("false"));
/// assert_eq!(enabled.json_name(), "enabled");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, unique within its table.
    pub name: String,
    /// SQL type of the column.
    pub database_type: DatabaseType,
    /// Length bound, or [`UNBOUNDED`] when not applicable.
    #[serde(default = "unbounded")]
    pub length: i32,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column is part of the primary key.
    #[serde(default)]
    pub primary_key: bool,
    /// Whether the database generates values for this column.
    #[serde(default)]
    pub auto_increment: bool,
    /// SQL default expression, verbatim (e.g. `'local'`, `0`, `false`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Field name used in external representations (defaults to `name`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_name: Option<String>,
}

fn unbounded() -> i32 {
    UNBOUNDED
}

impl ColumnDescriptor {
    /// Creates a nullable column of the given type and length.
    pub fn new(name: &str, database_type: DatabaseType, length: i32) -> Self {
        Self {
            name: name.to_string(),
            database_type,
            length,
            nullable: true,
            primary_key: false,
            auto_increment: false,
            default_value: None,
            json_name: None,
        }
    }

    /// Creates a nullable `VARCHAR(length)` column.
    pub fn varchar(name: &str, length: i32) -> Self {
        Self::new(name, DatabaseType::Varchar, length)
    }

    /// Creates a nullable `TEXT` column.
    pub fn text(name: &str) -> Self {
        Self::new(name, DatabaseType::Text, UNBOUNDED)
    }

    /// Creates a nullable `INT4` column.
    pub fn int4(name: &str) -> Self {
        Self::new(name, DatabaseType::Int4, UNBOUNDED)
    }

    /// Creates a nullable `INT8` column.
    pub fn int8(name: &str) -> Self {
        Self::new(name, DatabaseType::Int8, UNBOUNDED)
    }

    /// Creates a nullable `BOOL` column.
    pub fn boolean(name: &str) -> Self {
        Self::new(name, DatabaseType::Bool, UNBOUNDED)
    }

    /// Creates a nullable `TIMESTAMP` column.
    pub fn timestamp(name: &str) -> Self {
        Self::new(name, DatabaseType::Timestamp, UNBOUNDED)
    }

    /// Marks the column as part of the primary key (implies NOT NULL).
    pub fn key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Marks the column as NOT NULL.
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the SQL default expression.
    pub fn with_default(mut self, default_value: &str) -> Self {
        self.default_value = Some(default_value.to_string());
        self
    }

    /// Overrides the external field name.
    pub fn with_json_name(mut self, json_name: &str) -> Self {
        self.json_name = Some(json_name.to_string());
        self
    }

    /// Returns the external field name, falling back to the column name.
    pub fn json_name(&self) -> &str {
        self.json_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns the Rust host type a typed field for this column would use.
    pub fn host_type(&self) -> &'static str {
        self.database_type.host_type(self.nullable)
    }
}

/// Metadata for one table: its name and ordered columns.
///
/// Column order is physical order and is never rewritten; the positional
/// field tag of a column is its index plus one.
///
/// # Examples
///
/// ```
/// use iam_schema_core::{ColumnDescriptor, TableDescriptor};
///
/// let table = TableDescriptor::new("user_role_mapping")
///     .with_column(ColumnDescriptor::varchar("role_id", 255).key())
///     .with_column(ColumnDescriptor::varchar("user_id", 36).key());
///
/// assert_eq!(table.column_names(), vec!["role_id", "user_id"]);
/// assert!(table.has_composite_key());
/// assert_eq!(table.field_tag("user_id"), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Physical table name.
    pub name: String,
    /// Columns in physical order.
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    /// Creates a table with no columns.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    /// Appends a column.
    pub fn with_column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends a column in place.
    pub fn push_column(&mut self, column: ColumnDescriptor) {
        self.columns.push(column);
    }

    /// Finds a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns all column names in physical order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns the primary-key columns in physical order.
    pub fn primary_key(&self) -> Vec<&ColumnDescriptor> {
        self.columns.iter().filter(|c| c.primary_key).collect()
    }

    /// Returns the primary-key column names in physical order.
    pub fn primary_key_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Returns `true` if more than one column forms the primary key.
    pub fn has_composite_key(&self) -> bool {
        self.columns.iter().filter(|c| c.primary_key).count() > 1
    }

    /// Returns the 1-based positional field tag of a column.
    pub fn field_tag(&self, name: &str) -> Option<u32> {
        self.column_index(name).map(|i| i as u32 + 1)
    }

    /// Finds a column by its external field name.
    pub fn column_by_json_name(&self, json_name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.json_name() == json_name)
    }
}
