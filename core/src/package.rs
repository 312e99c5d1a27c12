use serde::{Deserialize, Serialize};

use crate::TableDescriptor;

/// Serializable bundle of table descriptors.
///
/// A package groups multiple [`TableDescriptor`] values with version
/// metadata, making it suitable for exporting a registry to a single JSON
/// file and loading it back elsewhere.
///
/// # Examples
///
/// ```
/// use iam_schema_core::*;
///
/// let mut package = SchemaPackage::new("1.0.0", "2024-01-15T10:30:00Z");
/// package.name = Some("iam".into());
/// package.tables.push(
///     TableDescriptor::new("realm").with_column(ColumnDescriptor::varchar("id", 36).key()),
/// );
///
/// assert_eq!(package.table_count(), 1);
/// assert_eq!(package.version, "1.0.0");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaPackage {
    /// Descriptor contract version (populated from
    /// [`SCHEMA_CONTRACT_VERSION`](crate::SCHEMA_CONTRACT_VERSION)).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Package format version (semver string).
    pub version: String,
    /// Optional package name.
    pub name: Option<String>,
    /// Optional package description.
    pub description: Option<String>,
    /// ISO-8601 timestamp for package creation.
    pub generated_at: String,
    /// Optional SHA-256 fingerprint of the packaged descriptors.
    #[serde(default)]
    pub fingerprint: Option<String>,
    /// Table descriptors included in this package.
    pub tables: Vec<TableDescriptor>,
}

impl SchemaPackage {
    /// Creates a package with required fields.
    pub fn new(version: impl Into<String>, generated_at: impl Into<String>) -> Self {
        Self {
            schema_version: Some(crate::SCHEMA_CONTRACT_VERSION.to_string()),
            version: version.into(),
            name: None,
            description: None,
            generated_at: generated_at.into(),
            fingerprint: None,
            tables: Vec::new(),
        }
    }

    /// Returns the number of tables in this package.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}
