//! Schema registry with a builder that accumulates sources.
//!
//! Provides [`SchemaRegistry`] for table lookup by name and
//! [`RegistryBuilder`] for populating one from the built-in catalog,
//! directories of per-table JSON files, package bundles, and inline
//! descriptors.
//!
//! # Loading patterns
//!
//! ```no_run
//! use iam_schema_registry::SchemaRegistry;
//!
//! // Built-in IAM catalog only
//! let registry = SchemaRegistry::builtin().unwrap();
//! assert!(registry.lookup("user_entity").is_some());
//!
//! // Catalog plus local additions, later sources replacing earlier ones
//! let registry = SchemaRegistry::builder()
//!     .with_builtin()
//!     .from_dir("tables/")
//!     .from_bundle("extra.json")
//!     .on_duplicate(iam_schema_registry::DuplicatePolicy::Replace)
//!     .build()
//!     .unwrap();
//! ```
//!
//! A populated registry has no mutating methods reachable through a shared
//! reference; share it with `&SchemaRegistry` or `Arc<SchemaRegistry>`.
//! Registered descriptors cannot be updated or removed:
//!
//! ```compile_fail
//! use iam_schema_core::{ColumnDescriptor, TableDescriptor};
//! use iam_schema_registry::SchemaRegistry;
//!
//! let mut registry = SchemaRegistry::builtin().unwrap();
//! registry.replace(TableDescriptor::new("realm").with_column(ColumnDescriptor::text("x")));
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use iam_schema_core::{Record, SchemaPackage, TableDescriptor, validate_package, validate_table};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::catalog;
use crate::error::{RegistryError, Result};

/// Describes where registered tables came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    /// The built-in IAM catalog.
    Builtin,
    /// A directory of per-table JSON descriptor files.
    Directory(PathBuf),
    /// A single [`SchemaPackage`] JSON file.
    Bundle(PathBuf),
    /// Descriptors passed to [`RegistryBuilder::with_table`].
    Inline,
}

/// What the builder does when two sources provide the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with [`RegistryError::DuplicateTable`].
    #[default]
    Reject,
    /// Keep the first registration position, use the later descriptor.
    ///
    /// Resolved while [`RegistryBuilder::build`] runs; the built registry
    /// offers no way to replace a table.
    Replace,
}

/// Table descriptors indexed by name.
///
/// Lookups are O(1); iteration follows registration order.
///
/// # Examples
///
/// ```
/// use iam_schema_core::{ColumnDescriptor, TableDescriptor};
/// use iam_schema_registry::SchemaRegistry;
///
/// let mut registry = SchemaRegistry::new();
/// registry
///     .register(
///         TableDescriptor::new("user_role_mapping")
///             .with_column(ColumnDescriptor::varchar("role_id", 255).key())
///             .with_column(ColumnDescriptor::varchar("user_id", 36).key()),
///     )
///     .unwrap();
///
/// let table = registry.lookup("user_role_mapping").unwrap();
/// assert_eq!(table.primary_key_names(), vec!["role_id", "user_id"]);
/// assert!(registry.lookup("user_entity").is_none());
/// ```
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    tables: HashMap<String, Arc<TableDescriptor>>,
    order: Vec<String>,
    sources: Vec<RegistrySource>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new [`RegistryBuilder`].
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Creates a registry holding the built-in IAM catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTable`] if the catalog lists a table
    /// twice.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for table in catalog::descriptors() {
            registry.register(table)?;
        }
        registry.sources.push(RegistrySource::Builtin);
        Ok(registry)
    }

    /// Adds a descriptor under its name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTable`] if the name is taken; the
    /// existing entry is left untouched.
    pub fn register(&mut self, table: TableDescriptor) -> Result<()> {
        if self.tables.contains_key(&table.name) {
            return Err(RegistryError::DuplicateTable(table.name));
        }
        debug!(table = %table.name, columns = table.column_count(), "registered table");
        self.order.push(table.name.clone());
        self.tables.insert(table.name.clone(), Arc::new(table));
        Ok(())
    }

    /// Adds a descriptor, replacing any entry with the same name in place.
    ///
    /// Returns the replaced descriptor, if any.
    pub(crate) fn replace(&mut self, table: TableDescriptor) -> Option<Arc<TableDescriptor>> {
        let name = table.name.clone();
        let previous = self.tables.insert(name.clone(), Arc::new(table));
        if previous.is_none() {
            self.order.push(name);
        }
        previous
    }

    /// Looks up a table by name.
    pub fn lookup(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.get(name).map(Arc::as_ref)
    }

    /// Looks up a table by name, returning a shared handle.
    pub fn get_table_info(&self, name: &str) -> Option<Arc<TableDescriptor>> {
        self.tables.get(name).cloned()
    }

    /// Returns `true` if a table with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Returns the number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if no tables are registered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns an iterator over table names in registration order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Returns an iterator over descriptors in registration order.
    pub fn tables(&self) -> impl Iterator<Item = &TableDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.tables.get(name).map(Arc::as_ref))
    }

    /// Returns the sources this registry was populated from.
    pub fn sources(&self) -> &[RegistrySource] {
        &self.sources
    }

    /// Creates an empty record for a registered table.
    pub fn new_record(&self, name: &str) -> Option<Record> {
        self.get_table_info(name).map(Record::new)
    }

    /// SHA-256 hex digest of all descriptors, independent of registration
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::JsonError`] if a descriptor cannot be
    /// serialized.
    pub fn fingerprint(&self) -> Result<String> {
        let mut tables: Vec<&TableDescriptor> = self.tables.values().map(Arc::as_ref).collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));

        let mut hasher = Sha256::new();
        for table in tables {
            hasher.update(serde_json::to_vec(table)?);
            hasher.update(b"\n");
        }
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Exports every table, in registration order, as a [`SchemaPackage`].
    ///
    /// # Errors
    ///
    /// Fails like [`fingerprint`](Self::fingerprint).
    pub fn to_package(&self, version: &str, generated_at: &str) -> Result<SchemaPackage> {
        let mut package = SchemaPackage::new(version, generated_at);
        package.tables = self.tables().cloned().collect();
        package.fingerprint = Some(self.fingerprint()?);
        Ok(package)
    }
}

/// Builder for populating a [`SchemaRegistry`] from several sources.
///
/// Sources are read in the order they are added and all of them contribute.
/// Every table is validated with [`validate_table`] before registration;
/// include/exclude filters are applied first.
///
/// # Example
///
/// ```
/// use iam_schema_core::{ColumnDescriptor, TableDescriptor};
/// use iam_schema_registry::SchemaRegistry;
///
/// let registry = SchemaRegistry::builder()
///     .with_builtin()
///     .exclude(["databasechangelog", "databasechangeloglock"])
///     .with_table(
///         TableDescriptor::new("audit_note")
///             .with_column(ColumnDescriptor::varchar("id", 36).key())
///             .with_column(ColumnDescriptor::text("note")),
///     )
///     .build()
///     .unwrap();
///
/// assert!(registry.contains("audit_note"));
/// assert!(registry.contains("realm"));
/// assert!(!registry.contains("databasechangelog"));
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    sources: Vec<RegistrySource>,
    inline: Vec<TableDescriptor>,
    include: Vec<String>,
    exclude: Vec<String>,
    on_duplicate: DuplicatePolicy,
}

impl RegistryBuilder {
    /// Creates a builder with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the built-in IAM catalog as a source.
    pub fn with_builtin(mut self) -> Self {
        self.sources.push(RegistrySource::Builtin);
        self
    }

    /// Adds a directory of `*.json` table descriptor files as a source.
    pub fn from_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(RegistrySource::Directory(path.into()));
        self
    }

    /// Adds a [`SchemaPackage`] JSON file as a source.
    pub fn from_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(RegistrySource::Bundle(path.into()));
        self
    }

    /// Adds a single descriptor.
    pub fn with_table(mut self, table: TableDescriptor) -> Self {
        if !self.sources.contains(&RegistrySource::Inline) {
            self.sources.push(RegistrySource::Inline);
        }
        self.inline.push(table);
        self
    }

    /// Restricts registration to the named tables (empty = all).
    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(names.into_iter().map(Into::into));
        self
    }

    /// Skips the named tables.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets how duplicate table names across sources are handled.
    pub fn on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }

    fn is_selected(&self, name: &str) -> bool {
        is_selected(&self.include, &self.exclude, name)
    }

    /// Reads every source in order and registers the selected tables.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoSourcesAvailable`] without sources, the
    /// loader's I/O or JSON error for unreadable sources,
    /// [`RegistryError::InvalidTable`] for descriptors failing validation,
    /// and [`RegistryError::DuplicateTable`] under
    /// [`DuplicatePolicy::Reject`].
    pub fn build(mut self) -> Result<SchemaRegistry> {
        if self.sources.is_empty() {
            return Err(RegistryError::NoSourcesAvailable);
        }

        let mut registry = SchemaRegistry::new();
        let mut inline = std::mem::take(&mut self.inline);

        for source in &self.sources {
            let tables = match source {
                RegistrySource::Builtin => catalog::descriptors(),
                RegistrySource::Directory(path) => load_dir(path)?,
                RegistrySource::Bundle(path) => load_bundle(path)?,
                RegistrySource::Inline => std::mem::take(&mut inline),
            };
            debug!(?source, tables = tables.len(), "loaded schema source");

            for table in tables {
                if !self.is_selected(&table.name) {
                    continue;
                }
                if let Some(error) = validate_table(&table).into_iter().next() {
                    return Err(RegistryError::InvalidTable {
                        table: table.name,
                        error,
                    });
                }
                match self.on_duplicate {
                    DuplicatePolicy::Reject => registry.register(table)?,
                    DuplicatePolicy::Replace => {
                        let name = table.name.clone();
                        if registry.replace(table).is_some() {
                            warn!(table = %name, ?source, "table replaced by later source");
                        }
                    }
                }
            }
        }

        for name in &self.include {
            if !registry.contains(name) {
                warn!(table = %name, "included table not found in any source");
            }
        }

        registry.sources = self.sources;
        info!(tables = registry.len(), "schema registry populated");
        Ok(registry)
    }
}

/// Include/exclude filtering shared by the builder and
/// [`RegistryConfig`](crate::RegistryConfig). Exclusions always win; an empty
/// include list keeps everything else.
pub(crate) fn is_selected(include: &[String], exclude: &[String], name: &str) -> bool {
    if exclude.iter().any(|n| n == name) {
        return false;
    }
    include.is_empty() || include.iter().any(|n| n == name)
}

/// Reads every `*.json` file in `path` as a [`TableDescriptor`], in file
/// name order.
fn load_dir(path: &Path) -> Result<Vec<TableDescriptor>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let file_path = entry?.path();
        if file_path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(file_path);
        }
    }
    files.sort();

    let mut tables = Vec::with_capacity(files.len());
    for file_path in files {
        let file = std::fs::File::open(&file_path)?;
        let reader = std::io::BufReader::new(file);
        let table: TableDescriptor = serde_json::from_reader(reader)?;
        tables.push(table);
    }
    Ok(tables)
}

/// Reads a [`SchemaPackage`] and checks it with [`validate_package`].
fn load_bundle(path: &Path) -> Result<Vec<TableDescriptor>> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let package: SchemaPackage = serde_json::from_reader(reader)?;

    if let Some(error) = validate_package(&package).into_iter().next() {
        return Err(RegistryError::InvalidBundle {
            path: path.to_path_buf(),
            error,
        });
    }
    Ok(package.tables)
}
