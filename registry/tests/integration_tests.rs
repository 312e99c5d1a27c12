use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use iam_schema_core::{
    Action, ColumnDescriptor, DatabaseType, Lifecycle, SchemaPackage, TableDescriptor,
};
use iam_schema_registry::{
    DuplicatePolicy, IAM_TABLES, RegistryConfig, RegistryError, RegistrySource, SchemaRegistry,
    SourceConfig,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn audit_table(name: &str) -> TableDescriptor {
    TableDescriptor::new(name)
        .with_column(ColumnDescriptor::varchar("id", 36).key())
        .with_column(ColumnDescriptor::text("note"))
        .with_column(ColumnDescriptor::timestamp("created_at").required())
}

fn write_table(dir: &Path, table: &TableDescriptor) {
    let path = dir.join(format!("{}.json", table.name));
    let mut f = std::fs::File::create(path).unwrap();
    serde_json::to_writer_pretty(&mut f, table).unwrap();
    f.flush().unwrap();
}

fn write_bundle(path: &Path, tables: Vec<TableDescriptor>) {
    let mut package = SchemaPackage::new("0.1.0", "2024-01-15T10:30:00Z");
    package.tables = tables;
    let f = std::fs::File::create(path).unwrap();
    serde_json::to_writer_pretty(f, &package).unwrap();
}

// ---------------------------------------------------------------------------
// Built-in catalog
// ---------------------------------------------------------------------------

#[test]
fn test_builtin_registry_covers_catalog() {
    let registry = SchemaRegistry::builtin().unwrap();
    assert_eq!(registry.len(), IAM_TABLES.len());
    assert_eq!(registry.sources(), &[RegistrySource::Builtin]);

    let names: Vec<&str> = registry.table_names().collect();
    let expected: Vec<&str> = IAM_TABLES.iter().map(|t| t.name).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_user_role_mapping_descriptor() {
    let registry = SchemaRegistry::builtin().unwrap();
    let table = registry.get_table_info("user_role_mapping").unwrap();

    assert_eq!(table.name, "user_role_mapping");
    assert_eq!(table.column_count(), 2);

    let role_id = &table.columns[0];
    assert_eq!(role_id.name, "role_id");
    assert_eq!(role_id.database_type, DatabaseType::Varchar);
    assert_eq!(role_id.length, 255);
    assert!(role_id.primary_key && !role_id.nullable);

    let user_id = &table.columns[1];
    assert_eq!(user_id.name, "user_id");
    assert_eq!(user_id.length, 36);
    assert!(user_id.primary_key && !user_id.nullable);
}

#[test]
fn test_client_scope_client_default_scope() {
    let registry = SchemaRegistry::builtin().unwrap();
    let table = registry.lookup("client_scope_client").unwrap();
    let column = table.column("default_scope").unwrap();

    assert_eq!(column.database_type, DatabaseType::Bool);
    assert!(!column.nullable);
    assert!(!column.primary_key);
    assert_eq!(column.default_value.as_deref(), Some("false"));
    assert_eq!(table.primary_key_names(), vec!["client_id", "scope_id"]);
}

#[test]
fn test_changelog_has_no_primary_key() {
    let registry = SchemaRegistry::builtin().unwrap();
    let table = registry.lookup("databasechangelog").unwrap();
    assert!(table.primary_key().is_empty());
    assert_eq!(
        table.column("dateexecuted").unwrap().database_type,
        DatabaseType::Timestamp
    );
}

#[test]
fn test_lookup_unknown_and_empty_names() {
    let registry = SchemaRegistry::builtin().unwrap();
    assert!(registry.lookup("").is_none());
    assert!(registry.lookup("USER_ENTITY").is_none());
    assert!(registry.get_table_info("no_such_table").is_none());
}

#[test]
fn test_shared_registry_across_threads() {
    let registry = Arc::new(SchemaRegistry::builtin().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry
                    .table_names()
                    .filter(|name| registry.lookup(name).is_some())
                    .count()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), registry.len());
    }
}

// ---------------------------------------------------------------------------
// Records and hooks
// ---------------------------------------------------------------------------

#[test]
fn test_record_hooks_are_noops() {
    let registry = SchemaRegistry::builtin().unwrap();
    let mut record = registry.new_record("user_role_mapping").unwrap();
    record.set("role_id", "admin").unwrap();
    record.set("user_id", "u-1").unwrap();
    let before = record.clone();

    assert_eq!(record.table_name(), "user_role_mapping");
    record.prepare();
    for action in Action::KNOWN {
        assert!(record.validate(&action).is_ok());
    }
    assert!(record.before_save().is_ok());
    assert_eq!(record, before);
}

#[test]
fn test_record_json_round_trip_through_registry() {
    let registry = SchemaRegistry::builtin().unwrap();
    let mut record = registry.new_record("client_scope_client").unwrap();
    record.set("client_id", "c-1").unwrap();
    record.set("scope_id", "s-1").unwrap();
    record.set("default_scope", true).unwrap();

    let json = record.to_json();
    let table = registry.get_table_info("client_scope_client").unwrap();
    let parsed = iam_schema_core::Record::from_json(table, &json).unwrap();
    assert_eq!(parsed, record);
}

// ---------------------------------------------------------------------------
// External sources
// ---------------------------------------------------------------------------

#[test]
fn test_directory_and_bundle_sources() {
    let dir = tempfile::tempdir().unwrap();
    let tables_dir = dir.path().join("tables");
    std::fs::create_dir_all(&tables_dir).unwrap();
    write_table(&tables_dir, &audit_table("audit_note"));
    std::fs::write(tables_dir.join("README.txt"), "ignored").unwrap();

    let bundle = dir.path().join("bundle.json");
    write_bundle(&bundle, vec![audit_table("audit_trail")]);

    let registry = SchemaRegistry::builder()
        .with_builtin()
        .from_dir(&tables_dir)
        .from_bundle(&bundle)
        .build()
        .unwrap();

    assert_eq!(registry.len(), IAM_TABLES.len() + 2);
    assert!(registry.contains("audit_note"));
    assert!(registry.contains("audit_trail"));
    assert_eq!(registry.sources().len(), 3);
}

#[test]
fn test_duplicate_across_sources() {
    let dir = tempfile::tempdir().unwrap();
    let realm = TableDescriptor::new("realm")
        .with_column(ColumnDescriptor::varchar("id", 36).key())
        .with_column(ColumnDescriptor::varchar("display_name", 255));
    write_table(dir.path(), &realm);

    let err = SchemaRegistry::builder()
        .with_builtin()
        .from_dir(dir.path())
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateTable(ref name) if name == "realm"));

    let registry = SchemaRegistry::builder()
        .with_builtin()
        .from_dir(dir.path())
        .on_duplicate(DuplicatePolicy::Replace)
        .build()
        .unwrap();
    assert_eq!(registry.lookup("realm"), Some(&realm));
    assert_eq!(registry.len(), IAM_TABLES.len());
}

#[test]
fn test_invalid_descriptor_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let broken =
        TableDescriptor::new("broken").with_column(ColumnDescriptor::varchar("id", 0).key());
    write_table(dir.path(), &broken);

    let err = SchemaRegistry::builder().from_dir(dir.path()).build().unwrap_err();
    assert!(matches!(err, RegistryError::InvalidTable { ref table, .. } if table == "broken"));
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SchemaRegistry::builder()
        .from_dir(dir.path().join("missing"))
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::IoError(_)));
}

#[test]
fn test_malformed_bundle_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("bundle.json");
    std::fs::write(&bundle, "{ not json").unwrap();

    let err = SchemaRegistry::builder().from_bundle(&bundle).build().unwrap_err();
    assert!(matches!(err, RegistryError::JsonError(_)));
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn test_export_package_reloads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("iam.json");

    let registry = SchemaRegistry::builtin().unwrap();
    let package = registry.to_package("1.2.0", "2024-01-15T10:30:00Z").unwrap();
    assert_eq!(package.table_count(), registry.len());
    let f = std::fs::File::create(&bundle).unwrap();
    serde_json::to_writer_pretty(f, &package).unwrap();

    let reloaded = SchemaRegistry::builder().from_bundle(&bundle).build().unwrap();
    assert_eq!(reloaded.fingerprint().unwrap(), registry.fingerprint().unwrap());
    assert_eq!(
        reloaded.table_names().collect::<Vec<_>>(),
        registry.table_names().collect::<Vec<_>>()
    );
}

#[test]
fn test_fingerprint_tracks_content() {
    let base = SchemaRegistry::builtin().unwrap();
    let extended = SchemaRegistry::builder()
        .with_builtin()
        .with_table(audit_table("audit_note"))
        .build()
        .unwrap();
    let fingerprint = base.fingerprint().unwrap();
    assert_ne!(fingerprint, extended.fingerprint().unwrap());
    assert_eq!(fingerprint, SchemaRegistry::builtin().unwrap().fingerprint().unwrap());
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_config_drives_builder() {
    let dir = tempfile::tempdir().unwrap();
    let tables_dir = dir.path().join("tables");
    std::fs::create_dir_all(&tables_dir).unwrap();
    write_table(&tables_dir, &audit_table("audit_note"));

    let config_path = dir.path().join("registry.yml");
    std::fs::write(
        &config_path,
        "version: \"1.0\"\nsources:\n  - dir: tables\n\
         exclude:\n  - databasechangelog\n  - databasechangeloglock\n",
    )
    .unwrap();

    let config = RegistryConfig::load(&config_path).unwrap();
    assert_eq!(config.sources, vec![SourceConfig::Dir(tables_dir.clone())]);

    let registry = config.builder().build().unwrap();
    assert!(registry.contains("audit_note"));
    assert!(!registry.contains("databasechangelog"));
    assert_eq!(registry.len(), IAM_TABLES.len() - 1);
}
