//! SQLite surface for IAM table descriptors.
//!
//! Turns the tables of a [`SchemaRegistry`](iam_schema_registry::SchemaRegistry)
//! into SQLite DDL, creates them in a database, and reads a database back
//! to report how it differs from the registry.
//!
//! # Architecture
//!
//! - **`schema`**: DDL generation and the descriptor/declared-type mapping
//! - **`apply`**: transactional table creation
//! - **`inspect`**: `pragma_table_info` read-back and drift detection
//!
//! # Quick start
//!
//! ```no_run
//! use iam_schema_registry::SchemaRegistry;
//! use iam_schema_sqlite::{check_schema, create_tables};
//! use rusqlite::Connection;
//!
//! let registry = SchemaRegistry::builtin().unwrap();
//! let mut conn = Connection::open("iam.db").unwrap();
//!
//! create_tables(&mut conn, &registry).unwrap();
//! for issue in check_schema(&conn, &registry).unwrap().issues {
//!     println!("{issue}");
//! }
//! ```
//!
//! Table and column names must contain only ASCII alphanumerics and
//! underscores; they are always emitted double-quoted.

mod apply;
mod error;
mod inspect;
mod schema;

pub use apply::create_tables;
pub use error::{Result, SqliteError};
pub use inspect::{DriftIssue, SchemaDrift, check_schema, existing_tables, inspect_table};
pub use schema::{
    column_type_sql, fetch_ddl, generate_drop_sql, generate_schema_sql, generate_table_sql,
    parse_declared_type,
};
