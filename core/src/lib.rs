//! Core descriptor types for the IAM database schema.
//!
//! This crate defines the generic metadata and data containers that replace
//! one hand-written binding per table:
//!
//! - [`TableDescriptor`]: a table's physical name and ordered columns.
//! - [`ColumnDescriptor`]: one column's SQL type, length, nullability,
//!   key status, default, and external field name.
//! - [`TableDef`] / [`ColumnDef`]: `const` forms of the above for static
//!   schema catalogs.
//! - [`Record`]: a row whose fields follow a descriptor.
//! - [`Lifecycle`]: no-op hooks (`prepare`, `validate`, `before_save`) a
//!   persistence layer calls around saves.
//! - [`SchemaPackage`]: a versioned bundle of descriptors for export.
//!
//! Validation ([`validate_table`], [`validate_package`]) catches structural
//! descriptor errors such as duplicate columns or nullable keys.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use iam_schema_core::*;
//!
//! let table = TableDescriptor::new("user_role_mapping")
//!     .with_column(ColumnDescriptor::varchar("role_id", 255).key())
//!     .with_column(ColumnDescriptor::varchar("user_id", 36).key());
//! assert!(validate_table(&table).is_empty());
//!
//! let mut row = Record::new(Arc::new(table));
//! row.set("role_id", "admin").unwrap();
//! assert!(row.validate(&Action::Delete).is_ok());
//! assert_eq!(row.table_name(), "user_role_mapping");
//! ```

mod definition;
mod lifecycle;
mod package;
mod record;
mod types;
mod validate;

pub use definition::{ColumnDef, TableDef};
pub use lifecycle::{Action, Lifecycle};
pub use package::SchemaPackage;
pub use record::{Record, RecordError, Value};
pub use types::*;
pub use validate::{DescriptorError, validate_package, validate_table};
