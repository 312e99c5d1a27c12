//! Reading table structure back from a live SQLite database.
//!
//! [`inspect_table`] rebuilds a [`TableDescriptor`] from
//! `pragma_table_info`; [`check_schema`] compares every registered table
//! against the database and reports each difference as a [`DriftIssue`].

use std::collections::HashSet;
use std::fmt;

use iam_schema_core::{ColumnDescriptor, TableDescriptor};
use iam_schema_registry::SchemaRegistry;
use rusqlite::Connection;
use tracing::debug;

use crate::error::{Result, SqliteError};
use crate::schema::{column_type_sql, parse_declared_type};

/// One row of `pragma_table_info`.
struct ColumnInfo {
    name: String,
    declared: String,
    not_null: bool,
    default_value: Option<String>,
    /// 1-based position in the primary key, 0 when not a key column.
    key_position: i64,
}

fn table_info(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    let mut stmt = conn.prepare(
        "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1) ORDER BY cid",
    )?;
    let rows = stmt.query_map([table], |row| {
        Ok(ColumnInfo {
            name: row.get(0)?,
            declared: row.get(1)?,
            not_null: row.get::<_, i64>(2)? != 0,
            default_value: row.get(3)?,
            key_position: row.get(4)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn key_names(columns: &[ColumnInfo]) -> Vec<String> {
    let mut keys: Vec<&ColumnInfo> = columns.iter().filter(|c| c.key_position > 0).collect();
    keys.sort_by_key(|c| c.key_position);
    keys.into_iter().map(|c| c.name.clone()).collect()
}

/// Lists user tables in the database, sorted by name.
///
/// SQLite's internal tables (names starting with `sqlite_`) are skipped.
/// The `_` is matched literally, so user tables such as `sqlitex_audit`
/// are listed.
pub fn existing_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
         ORDER BY name",
    )?;
    let names = stmt.query_map([], |row| row.get(0))?;
    Ok(names.collect::<rusqlite::Result<Vec<String>>>()?)
}

/// Rebuilds the descriptor of a table from the database.
///
/// Returns `Ok(None)` if the table does not exist.
///
/// # Errors
///
/// Returns [`SqliteError::UnsupportedType`] for a declared column type that
/// [`parse_declared_type`] does not recognize.
pub fn inspect_table(conn: &Connection, name: &str) -> Result<Option<TableDescriptor>> {
    let columns = table_info(conn, name)?;
    if columns.is_empty() {
        return Ok(None);
    }

    let mut table = TableDescriptor::new(name);
    for info in columns {
        let (database_type, length) =
            parse_declared_type(&info.declared).ok_or_else(|| SqliteError::UnsupportedType {
                table: name.to_string(),
                column: info.name.clone(),
                declared: info.declared.clone(),
            })?;

        let mut column = ColumnDescriptor::new(&info.name, database_type, length);
        column.nullable = !info.not_null;
        column.primary_key = info.key_position > 0;
        column.default_value = info.default_value;
        table.push_column(column);
    }

    debug!(table = name, columns = table.column_count(), "inspected table");
    Ok(Some(table))
}

/// A single difference between the registry and the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriftIssue {
    /// Registered table absent from the database.
    MissingTable(String),
    /// Database table not in the registry.
    UnknownTable(String),
    MissingColumn { table: String, column: String },
    UnexpectedColumn { table: String, column: String },
    TypeMismatch {
        table: String,
        column: String,
        expected: String,
        found: String,
    },
    NullabilityMismatch {
        table: String,
        column: String,
        expected_nullable: bool,
    },
    KeyMismatch {
        table: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
    DefaultMismatch {
        table: String,
        column: String,
        expected: Option<String>,
        found: Option<String>,
    },
}

impl fmt::Display for DriftIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftIssue::MissingTable(table) => write!(f, "missing table {table}"),
            DriftIssue::UnknownTable(table) => write!(f, "unknown table {table}"),
            DriftIssue::MissingColumn { table, column } => {
                write!(f, "missing column {table}.{column}")
            }
            DriftIssue::UnexpectedColumn { table, column } => {
                write!(f, "unexpected column {table}.{column}")
            }
            DriftIssue::TypeMismatch {
                table,
                column,
                expected,
                found,
            } => write!(f, "{table}.{column}: expected type {expected}, found {found}"),
            DriftIssue::NullabilityMismatch {
                table,
                column,
                expected_nullable,
            } => {
                let expected = if *expected_nullable { "NULL" } else { "NOT NULL" };
                write!(f, "{table}.{column}: expected {expected}")
            }
            DriftIssue::KeyMismatch {
                table,
                expected,
                found,
            } => write!(
                f,
                "{table}: expected primary key ({}), found ({})",
                expected.join(", "),
                found.join(", ")
            ),
            DriftIssue::DefaultMismatch {
                table,
                column,
                expected,
                found,
            } => write!(
                f,
                "{table}.{column}: expected default {}, found {}",
                expected.as_deref().unwrap_or("none"),
                found.as_deref().unwrap_or("none")
            ),
        }
    }
}

/// Result of [`check_schema`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDrift {
    pub issues: Vec<DriftIssue>,
}

impl SchemaDrift {
    /// Returns `true` if the database matches the registry.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Compares every registered table with the database.
///
/// Registered tables are checked in registration order, followed by
/// database tables the registry does not know, in name order.
///
/// # Examples
///
/// ```
/// use iam_schema_registry::SchemaRegistry;
/// use iam_schema_sqlite::{check_schema, create_tables, DriftIssue};
/// use rusqlite::Connection;
///
/// let registry = SchemaRegistry::builtin().unwrap();
/// let mut conn = Connection::open_in_memory().unwrap();
///
/// let drift = check_schema(&conn, &registry).unwrap();
/// assert!(drift.issues.contains(&DriftIssue::MissingTable("realm".into())));
///
/// create_tables(&mut conn, &registry).unwrap();
/// assert!(check_schema(&conn, &registry).unwrap().is_clean());
/// ```
pub fn check_schema(conn: &Connection, registry: &SchemaRegistry) -> Result<SchemaDrift> {
    let mut drift = SchemaDrift::default();

    for table in registry.tables() {
        let columns = table_info(conn, &table.name)?;
        if columns.is_empty() {
            drift.issues.push(DriftIssue::MissingTable(table.name.clone()));
            continue;
        }
        compare_table(table, &columns, &mut drift.issues);
    }

    for name in existing_tables(conn)? {
        if !registry.contains(&name) {
            drift.issues.push(DriftIssue::UnknownTable(name));
        }
    }

    debug!(issues = drift.issues.len(), "schema check finished");
    Ok(drift)
}

fn compare_table(table: &TableDescriptor, columns: &[ColumnInfo], issues: &mut Vec<DriftIssue>) {
    let found_names: HashSet<&str> = columns.iter().map(|c| c.name.as_str()).collect();

    for expected in &table.columns {
        if !found_names.contains(expected.name.as_str()) {
            issues.push(DriftIssue::MissingColumn {
                table: table.name.clone(),
                column: expected.name.clone(),
            });
        }
    }

    for info in columns {
        let Some(expected) = table.column(&info.name) else {
            issues.push(DriftIssue::UnexpectedColumn {
                table: table.name.clone(),
                column: info.name.clone(),
            });
            continue;
        };

        if parse_declared_type(&info.declared) != Some((expected.database_type, expected.length)) {
            issues.push(DriftIssue::TypeMismatch {
                table: table.name.clone(),
                column: info.name.clone(),
                expected: column_type_sql(expected),
                found: info.declared.clone(),
            });
        }
        if expected.nullable == info.not_null {
            issues.push(DriftIssue::NullabilityMismatch {
                table: table.name.clone(),
                column: info.name.clone(),
                expected_nullable: expected.nullable,
            });
        }
        if expected.default_value != info.default_value {
            issues.push(DriftIssue::DefaultMismatch {
                table: table.name.clone(),
                column: info.name.clone(),
                expected: expected.default_value.clone(),
                found: info.default_value.clone(),
            });
        }
    }

    let expected_keys: Vec<String> = table
        .primary_key_names()
        .into_iter()
        .map(String::from)
        .collect();
    let found_keys = key_names(columns);
    if expected_keys != found_keys {
        issues.push(DriftIssue::KeyMismatch {
            table: table.name.clone(),
            expected: expected_keys,
            found: found_keys,
        });
    }
}
