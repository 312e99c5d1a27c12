//! Name-indexed registry of IAM table descriptors.
//!
//! This crate holds the built-in IAM catalog and the infrastructure for
//! assembling a [`SchemaRegistry`] from it and from external sources
//! (directories of per-table JSON files, package bundles, inline
//! descriptors), driven either by the builder or by a YAML
//! [`RegistryConfig`].
//!
//! # Quick start
//!
//! ```
//! use iam_schema_registry::SchemaRegistry;
//!
//! let registry = SchemaRegistry::builtin().unwrap();
//! let table = registry.get_table_info("user_role_mapping").unwrap();
//! assert_eq!(table.primary_key_names(), vec!["role_id", "user_id"]);
//!
//! let mut record = registry.new_record("realm").unwrap();
//! record.set("name", "master").unwrap();
//! ```

mod catalog;
mod config;
mod error;
mod registry;

pub use catalog::{IAM_TABLES, descriptors as builtin_tables};
pub use config::{RegistryConfig, SourceConfig};
pub use error::{RegistryError, Result};
pub use registry::{DuplicatePolicy, RegistryBuilder, RegistrySource, SchemaRegistry};
