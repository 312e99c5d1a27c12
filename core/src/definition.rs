//! Compile-time table definitions.
//!
//! [`TableDef`] and [`ColumnDef`] mirror [`TableDescriptor`] and
//! [`ColumnDescriptor`] with `&'static str` fields and `const fn`
//! constructors, so a whole schema can be written as a `static` data table
//! and turned into owned descriptors when a registry is populated.
//!
//! ```
//! use iam_schema_core::{ColumnDef, TableDef};
//!
//! static WEB_ORIGINS: TableDef = TableDef {
//!     name: "web_origins",
//!     columns: &[
//!         ColumnDef::varchar("client_id", 36).key(),
//!         ColumnDef::varchar("value", 255).key(),
//!     ],
//! };
//!
//! let table = WEB_ORIGINS.to_descriptor();
//! assert_eq!(table.primary_key_names(), vec!["client_id", "value"]);
//! ```

use crate::types::{ColumnDescriptor, DatabaseType, TableDescriptor, UNBOUNDED};

/// Static definition of a table.
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

/// Static definition of a column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub database_type: DatabaseType,
    pub length: i32,
    pub nullable: bool,
    pub primary_key: bool,
    pub default_value: Option<&'static str>,
    pub json_name: Option<&'static str>,
}

impl ColumnDef {
    const fn new(name: &'static str, database_type: DatabaseType, length: i32) -> Self {
        Self {
            name,
            database_type,
            length,
            nullable: true,
            primary_key: false,
            default_value: None,
            json_name: None,
        }
    }

    pub const fn varchar(name: &'static str, length: i32) -> Self {
        Self::new(name, DatabaseType::Varchar, length)
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, DatabaseType::Text, UNBOUNDED)
    }

    pub const fn int4(name: &'static str) -> Self {
        Self::new(name, DatabaseType::Int4, UNBOUNDED)
    }

    pub const fn int8(name: &'static str) -> Self {
        Self::new(name, DatabaseType::Int8, UNBOUNDED)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, DatabaseType::Bool, UNBOUNDED)
    }

    pub const fn timestamp(name: &'static str) -> Self {
        Self::new(name, DatabaseType::Timestamp, UNBOUNDED)
    }

    /// Primary-key column (implies NOT NULL).
    pub const fn key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub const fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub const fn default(mut self, default_value: &'static str) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub const fn json(mut self, json_name: &'static str) -> Self {
        self.json_name = Some(json_name);
        self
    }

    /// Converts into an owned [`ColumnDescriptor`].
    pub fn to_descriptor(&self) -> ColumnDescriptor {
        ColumnDescriptor {
            name: self.name.to_string(),
            database_type: self.database_type,
            length: self.length,
            nullable: self.nullable,
            primary_key: self.primary_key,
            auto_increment: false,
            default_value: self.default_value.map(String::from),
            json_name: self.json_name.map(String::from),
        }
    }
}

impl TableDef {
    /// Converts into an owned [`TableDescriptor`], keeping column order.
    pub fn to_descriptor(&self) -> TableDescriptor {
        TableDescriptor {
            name: self.name.to_string(),
            columns: self.columns.iter().map(ColumnDef::to_descriptor).collect(),
        }
    }
}

impl From<&TableDef> for TableDescriptor {
    fn from(def: &TableDef) -> Self {
        def.to_descriptor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE: TableDef = TableDef {
        name: "migration_model",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("version", 36),
            ColumnDef::int8("update_time").required().default("0"),
        ],
    };

    #[test]
    fn test_static_definition_converts() {
        let table = SAMPLE.to_descriptor();
        assert_eq!(table.name, "migration_model");
        assert_eq!(table.column_names(), vec!["id", "version", "update_time"]);

        let update_time = table.column("update_time").unwrap();
        assert_eq!(update_time.database_type, DatabaseType::Int8);
        assert_eq!(update_time.length, UNBOUNDED);
        assert!(!update_time.nullable);
        assert_eq!(update_time.default_value.as_deref(), Some("0"));
        assert!(!update_time.auto_increment);
    }

    #[test]
    fn test_static_and_builder_forms_agree() {
        let built = TableDescriptor::new("migration_model")
            .with_column(ColumnDescriptor::varchar("id", 36).key())
            .with_column(ColumnDescriptor::varchar("version", 36))
            .with_column(ColumnDescriptor::int8("update_time").required().with_default("0"));
        assert_eq!(TableDescriptor::from(&SAMPLE), built);
    }
}
