//! YAML configuration for assembling a registry.
//!
//! Describes which schema sources feed a [`SchemaRegistry`], which tables
//! are kept, and how name clashes between sources are handled.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! builtin: true
//! sources:
//!   - dir: tables/
//!   - bundle: extra.json
//! include: []
//! exclude:
//!   - databasechangelog
//! on_duplicate: replace
//! ```
//!
//! [`SchemaRegistry`]: crate::SchemaRegistry

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::registry::{self, DuplicatePolicy, RegistryBuilder};

/// Major configuration version this crate reads.
const SUPPORTED_MAJOR_VERSION: &str = "1";

fn default_version() -> String {
    "1.0".to_string()
}

fn default_builtin() -> bool {
    true
}

/// One external source of table descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceConfig {
    /// Directory of per-table `*.json` files.
    Dir(PathBuf),
    /// Package bundle JSON file.
    Bundle(PathBuf),
}

/// Top-level registry configuration.
///
/// # Examples
///
/// ```
/// use iam_schema_registry::{DuplicatePolicy, RegistryConfig};
///
/// let config: RegistryConfig = serde_yaml::from_str("exclude: [databasechangelog]").unwrap();
/// assert!(config.builtin);
/// assert_eq!(config.on_duplicate, DuplicatePolicy::Reject);
/// assert!(!config.is_selected("databasechangelog"));
///
/// let registry = config.builder().build().unwrap();
/// assert!(registry.contains("realm"));
/// assert!(!registry.contains("databasechangelog"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Configuration format version (e.g., `"1.0"`); only `1.x` is read.
    #[serde(default = "default_version")]
    pub version: String,
    /// Whether the built-in IAM catalog is loaded first.
    #[serde(default = "default_builtin")]
    pub builtin: bool,
    /// Extra sources, read in order after the catalog.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    /// Tables to keep (empty = all).
    #[serde(default)]
    pub include: Vec<String>,
    /// Tables to skip.
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            builtin: true,
            sources: Vec::new(),
            include: Vec::new(),
            exclude: Vec::new(),
            on_duplicate: DuplicatePolicy::default(),
        }
    }
}

impl RegistryConfig {
    /// Loads configuration from a YAML file.
    ///
    /// Relative source paths are resolved against the directory holding the
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::RegistryError::IoError) if the file cannot
    /// be read, [`YamlError`](crate::RegistryError::YamlError) if parsing
    /// fails, or
    /// [`UnsupportedConfigVersion`](crate::RegistryError::UnsupportedConfigVersion)
    /// for a `version` other than `1.x`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let mut config: RegistryConfig = serde_yaml::from_reader(reader)?;
        config.check_version()?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        debug!(path = %path.display(), sources = config.sources.len(), "loaded registry config");
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::RegistryError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::RegistryError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    fn check_version(&self) -> Result<()> {
        let major = self.version.trim().split('.').next().unwrap_or_default();
        if major != SUPPORTED_MAJOR_VERSION {
            return Err(RegistryError::UnsupportedConfigVersion(self.version.clone()));
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        for source in &mut self.sources {
            let path = match source {
                SourceConfig::Dir(path) | SourceConfig::Bundle(path) => path,
            };
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Returns `true` if `table` passes the include/exclude filters.
    ///
    /// Exclusions always win; an empty include list keeps everything else.
    pub fn is_selected(&self, table: &str) -> bool {
        registry::is_selected(&self.include, &self.exclude, table)
    }

    /// Creates a [`RegistryBuilder`] with this configuration's sources and
    /// filters.
    pub fn builder(&self) -> RegistryBuilder {
        let mut builder = RegistryBuilder::new();
        if self.builtin {
            builder = builder.with_builtin();
        }
        for source in &self.sources {
            builder = match source {
                SourceConfig::Dir(path) => builder.from_dir(path.clone()),
                SourceConfig::Bundle(path) => builder.from_bundle(path.clone()),
            };
        }
        builder
            .include(self.include.iter().cloned())
            .exclude(self.exclude.iter().cloned())
            .on_duplicate(self.on_duplicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
builtin: false
sources:
  - dir: tables
  - bundle: /opt/schemas/extra.json
include:
  - realm
  - user_entity
exclude:
  - user_entity
on_duplicate: replace
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: RegistryConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.version, "1.0");
        assert!(!config.builtin);
        assert_eq!(
            config.sources,
            vec![
                SourceConfig::Dir(PathBuf::from("tables")),
                SourceConfig::Bundle(PathBuf::from("/opt/schemas/extra.json")),
            ]
        );
        assert_eq!(config.include, vec!["realm", "user_entity"]);
        assert_eq!(config.on_duplicate, DuplicatePolicy::Replace);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: RegistryConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_exclusion_beats_inclusion() {
        let config: RegistryConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert!(config.is_selected("realm"));
        assert!(!config.is_selected("user_entity"));
        assert!(!config.is_selected("client"));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.yml");
        std::fs::write(&path, sample_yaml()).unwrap();

        let config = RegistryConfig::load(&path).unwrap();
        assert_eq!(config.sources[0], SourceConfig::Dir(dir.path().join("tables")));
        assert_eq!(
            config.sources[1],
            SourceConfig::Bundle(PathBuf::from("/opt/schemas/extra.json"))
        );
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.yml");

        let original = RegistryConfig {
            exclude: vec!["databasechangelog".into()],
            on_duplicate: DuplicatePolicy::Replace,
            ..RegistryConfig::default()
        };
        original.save(&path).unwrap();

        assert_eq!(RegistryConfig::load(&path).unwrap(), original);
    }

    #[test]
    fn test_load_checks_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.yml");

        std::fs::write(&path, "version: \"1.3\"\n").unwrap();
        assert_eq!(RegistryConfig::load(&path).unwrap().version, "1.3");

        std::fs::write(&path, "version: \"2.0\"\nexclude: [realm]\n").unwrap();
        assert!(matches!(
            RegistryConfig::load(&path),
            Err(RegistryError::UnsupportedConfigVersion(ref v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_builder_without_sources_fails() {
        let config = RegistryConfig {
            builtin: false,
            ..RegistryConfig::default()
        };
        assert!(matches!(
            config.builder().build(),
            Err(crate::RegistryError::NoSourcesAvailable)
        ));
    }
}
