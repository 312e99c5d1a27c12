//! Descriptor and package validation.
//!
//! Checks the structural invariants of table descriptors and schema packages
//! (non-empty names, unique columns, consistent lengths, non-nullable keys)
//! before they are registered. Record contents are never validated here.
//!
//! # Examples
//!
//! ```
//! use iam_schema_core::*;
//!
//! let table = TableDescriptor::new("web_origins")
//!     .with_column(ColumnDescriptor::varchar("client_id", 36).key())
//!     .with_column(ColumnDescriptor::varchar("value", 255).key());
//! assert!(validate_table(&table).is_empty());
//!
//! // Invalid: VARCHAR without a length
//! let bad = TableDescriptor::new("web_origins")
//!     .with_column(ColumnDescriptor::varchar("client_id", UNBOUNDED));
//! assert!(!validate_table(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{DatabaseType, SchemaPackage, TableDescriptor, UNBOUNDED};

/// Structural problems found in a descriptor or package.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Package version string is empty.
    #[error("package version cannot be empty")]
    EmptyPackageVersion,
    /// Table name is empty or whitespace-only.
    #[error("table name cannot be empty")]
    EmptyTableName,
    /// Two tables in the same package share a name.
    #[error("duplicate table in package: {0}")]
    DuplicateTable(String),
    /// A table declares no columns.
    #[error("table '{0}' has no columns")]
    NoColumns(String),
    /// A column name is empty or whitespace-only.
    #[error("table '{0}' has a column with an empty name")]
    EmptyColumnName(String),
    /// Two columns in the same table share a name.
    #[error("duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },
    /// Two columns in the same table share an external field name.
    #[error("duplicate JSON name '{json_name}' in table '{table}'")]
    DuplicateJsonName { table: String, json_name: String },
    /// VARCHAR without a positive length, or a length on an unsized type.
    #[error("column '{table}.{column}' of type {database_type} has invalid length {length}")]
    InvalidLength {
        table: String,
        column: String,
        database_type: DatabaseType,
        length: i32,
    },
    /// A primary-key column accepts NULL.
    #[error("primary key column '{table}.{column}' must not be nullable")]
    NullablePrimaryKey { table: String, column: String },
    /// Auto-increment on a non-integer column.
    #[error("auto-increment column '{table}.{column}' must be INT4 or INT8")]
    InvalidAutoIncrement { table: String, column: String },
}

/// Validates a schema package.
///
/// Checks for an empty version string, duplicate table names, and validates
/// each table individually. Stops at the first problem.
///
/// # Examples
///
/// ```
/// use iam_schema_core::*;
///
/// let table = TableDescriptor::new("realm")
///     .with_column(ColumnDescriptor::varchar("id", 36).key());
///
/// let mut package = SchemaPackage::new("1.0.0", "2024-01-01T00:00:00Z");
/// package.tables.push(table.clone());
/// assert!(validate_package(&package).is_empty());
///
/// package.tables.push(table);
/// let errors = validate_package(&package);
/// assert!(errors.iter().any(|e| matches!(e, DescriptorError::DuplicateTable(_))));
/// ```
pub fn validate_package(package: &SchemaPackage) -> Vec<DescriptorError> {
    let mut errors = Vec::new();

    if package.version.trim().is_empty() {
        errors.push(DescriptorError::EmptyPackageVersion);
        return errors;
    }

    let mut seen_tables: HashSet<&str> = HashSet::new();
    for table in &package.tables {
        if !seen_tables.insert(table.name.as_str()) {
            errors.push(DescriptorError::DuplicateTable(table.name.clone()));
            return errors;
        }
        errors.extend(validate_table(table));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

/// Validates one table descriptor.
///
/// Stops at the first problem.
pub fn validate_table(table: &TableDescriptor) -> Vec<DescriptorError> {
    let mut errors = Vec::new();
    let name = table.name.trim();

    if name.is_empty() {
        errors.push(DescriptorError::EmptyTableName);
        return errors;
    }
    if table.columns.is_empty() {
        errors.push(DescriptorError::NoColumns(name.to_string()));
        return errors;
    }

    let mut seen_columns: HashSet<&str> = HashSet::new();
    let mut seen_json: HashSet<&str> = HashSet::new();

    for column in &table.columns {
        let column_name = column.name.trim();
        if column_name.is_empty() {
            errors.push(DescriptorError::EmptyColumnName(name.to_string()));
            return errors;
        }
        if !seen_columns.insert(column_name) {
            errors.push(DescriptorError::DuplicateColumn {
                table: name.to_string(),
                column: column_name.to_string(),
            });
            return errors;
        }
        if !seen_json.insert(column.json_name()) {
            errors.push(DescriptorError::DuplicateJsonName {
                table: name.to_string(),
                json_name: column.json_name().to_string(),
            });
            return errors;
        }

        let length_ok = if column.database_type.is_sized() {
            column.length > 0
        } else {
            column.length == UNBOUNDED
        };
        if !length_ok {
            errors.push(DescriptorError::InvalidLength {
                table: name.to_string(),
                column: column_name.to_string(),
                database_type: column.database_type,
                length: column.length,
            });
            return errors;
        }

        if column.primary_key && column.nullable {
            errors.push(DescriptorError::NullablePrimaryKey {
                table: name.to_string(),
                column: column_name.to_string(),
            });
            return errors;
        }

        if column.auto_increment && !column.database_type.is_integer() {
            errors.push(DescriptorError::InvalidAutoIncrement {
                table: name.to_string(),
                column: column_name.to_string(),
            });
            return errors;
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnDescriptor;

    fn realm() -> TableDescriptor {
        TableDescriptor::new("realm")
            .with_column(ColumnDescriptor::varchar("id", 36).key())
            .with_column(ColumnDescriptor::varchar("name", 255))
    }

    #[test]
    fn test_validate_table_accepts_valid_table() {
        assert!(validate_table(&realm()).is_empty());
    }

    #[test]
    fn test_validate_table_accepts_table_without_key() {
        let table = TableDescriptor::new("databasechangelog")
            .with_column(ColumnDescriptor::varchar("id", 255).required())
            .with_column(ColumnDescriptor::timestamp("dateexecuted").required());
        assert!(validate_table(&table).is_empty());
    }

    #[test]
    fn test_validate_table_rejects_duplicate_column() {
        let table = realm().with_column(ColumnDescriptor::text("name"));
        assert_eq!(
            validate_table(&table),
            vec![DescriptorError::DuplicateColumn {
                table: "realm".into(),
                column: "name".into(),
            }]
        );
    }

    #[test]
    fn test_validate_table_rejects_json_name_clash() {
        let table =
            realm().with_column(ColumnDescriptor::text("display_name").with_json_name("name"));
        assert_eq!(
            validate_table(&table),
            vec![DescriptorError::DuplicateJsonName {
                table: "realm".into(),
                json_name: "name".into(),
            }]
        );
    }

    #[test]
    fn test_validate_table_rejects_bad_lengths() {
        let table = realm().with_column(ColumnDescriptor::new("count", DatabaseType::Int4, 4));
        assert!(matches!(
            validate_table(&table).as_slice(),
            [DescriptorError::InvalidLength { length: 4, .. }]
        ));

        let table = realm().with_column(ColumnDescriptor::varchar("code", 0));
        assert!(matches!(
            validate_table(&table).as_slice(),
            [DescriptorError::InvalidLength { length: 0, .. }]
        ));
    }

    #[test]
    fn test_validate_table_rejects_nullable_key() {
        let mut column = ColumnDescriptor::varchar("id", 36).key();
        column.nullable = true;
        let table = TableDescriptor::new("t").with_column(column);
        assert_eq!(
            validate_table(&table),
            vec![DescriptorError::NullablePrimaryKey {
                table: "t".into(),
                column: "id".into(),
            }]
        );
    }

    #[test]
    fn test_validate_table_rejects_text_auto_increment() {
        let mut column = ColumnDescriptor::text("id");
        column.auto_increment = true;
        let table = TableDescriptor::new("t").with_column(column);
        assert!(matches!(
            validate_table(&table).as_slice(),
            [DescriptorError::InvalidAutoIncrement { .. }]
        ));
    }

    #[test]
    fn test_validate_table_rejects_empty_names() {
        assert_eq!(
            validate_table(&TableDescriptor::new("  ")),
            vec![DescriptorError::EmptyTableName]
        );
        assert_eq!(
            validate_table(&TableDescriptor::new("t")),
            vec![DescriptorError::NoColumns("t".into())]
        );
    }

    #[test]
    fn test_validate_package_rejects_empty_version() {
        let package = SchemaPackage::new(" ", "2024-01-01T00:00:00Z");
        assert_eq!(
            validate_package(&package),
            vec![DescriptorError::EmptyPackageVersion]
        );
    }
}
