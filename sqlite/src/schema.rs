//! SQL generation from table descriptors.
//!
//! Every registered table becomes one `CREATE TABLE IF NOT EXISTS`
//! statement with its columns in descriptor order and a table-level
//! `PRIMARY KEY` clause when the table has key columns. Identifiers are
//! checked and double-quoted; defaults must be plain literals.
//!
//! # Type mapping
//!
//! | Descriptor type | Declared SQLite type |
//! |-----------------|----------------------|
//! | `VARCHAR`       | `VARCHAR(n)`         |
//! | `TEXT`          | `TEXT`               |
//! | `INT4`          | `INTEGER`            |
//! | `INT8`          | `BIGINT`             |
//! | `BOOL`          | `BOOLEAN`            |
//! | `TIMESTAMP`     | `TIMESTAMP`          |

use iam_schema_core::{ColumnDescriptor, DatabaseType, TableDescriptor, UNBOUNDED};
use iam_schema_registry::SchemaRegistry;

use crate::error::{Result, SqliteError};

/// Validates that an identifier contains only ASCII alphanumerics and
/// underscores.
pub(crate) fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SqliteError::InvalidIdentifier(name.to_string()));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SqliteError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

fn quote(name: &str) -> String {
    format!("\"{name}\"")
}

/// Returns `true` for integers, single-quoted strings, and the keywords
/// `TRUE`, `FALSE`, `NULL` and `CURRENT_TIMESTAMP`.
fn is_literal(value: &str) -> bool {
    if value.parse::<i64>().is_ok() {
        return true;
    }
    if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
        return !inner.replace("''", "").contains('\'');
    }
    matches!(
        value.to_ascii_uppercase().as_str(),
        "TRUE" | "FALSE" | "NULL" | "CURRENT_TIMESTAMP"
    )
}

/// Returns the declared SQLite type for a column.
///
/// # Examples
///
/// ```
/// use iam_schema_core::ColumnDescriptor;
/// use iam_schema_sqlite::column_type_sql;
///
/// assert_eq!(column_type_sql(&ColumnDescriptor::varchar("id", 36)), "VARCHAR(36)");
/// assert_eq!(column_type_sql(&ColumnDescriptor::int8("created_date")), "BIGINT");
/// ```
pub fn column_type_sql(column: &ColumnDescriptor) -> String {
    match column.database_type {
        DatabaseType::Varchar => format!("VARCHAR({})", column.length),
        DatabaseType::Text => "TEXT".to_string(),
        DatabaseType::Int4 => "INTEGER".to_string(),
        DatabaseType::Int8 => "BIGINT".to_string(),
        DatabaseType::Bool => "BOOLEAN".to_string(),
        DatabaseType::Timestamp => "TIMESTAMP".to_string(),
    }
}

/// Parses a declared column type back into a type and length.
///
/// Accepts the aliases [`DatabaseType`] parses, with an optional
/// parenthesized length. The length is kept for `VARCHAR` only; other types
/// get [`UNBOUNDED`]. Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use iam_schema_core::DatabaseType;
/// use iam_schema_sqlite::parse_declared_type;
///
/// assert_eq!(parse_declared_type("varchar(255)"), Some((DatabaseType::Varchar, 255)));
/// assert_eq!(parse_declared_type("INTEGER"), Some((DatabaseType::Int4, -1)));
/// assert_eq!(parse_declared_type("BLOB"), None);
/// ```
pub fn parse_declared_type(declared: &str) -> Option<(DatabaseType, i32)> {
    let declared = declared.trim();
    let (base, length) = match declared.split_once('(') {
        Some((base, rest)) => {
            let length = rest.strip_suffix(')')?.trim().parse::<i32>().ok()?;
            (base.trim(), Some(length))
        }
        None => (declared, None),
    };

    let database_type = base.parse::<DatabaseType>().ok()?;
    let length = match (database_type.is_sized(), length) {
        (true, Some(length)) => length,
        _ => UNBOUNDED,
    };
    Some((database_type, length))
}

/// Generates the `CREATE TABLE` statement for one table.
///
/// # Errors
///
/// Returns [`SqliteError::InvalidIdentifier`] for unsafe table or column
/// names and [`SqliteError::InvalidDefault`] for defaults that are not
/// plain literals.
///
/// # Examples
///
/// ```
/// use iam_schema_core::{ColumnDescriptor, TableDescriptor};
/// use iam_schema_sqlite::generate_table_sql;
///
/// let table = TableDescriptor::new("user_role_mapping")
///     .with_column(ColumnDescriptor::varchar("role_id", 255).key())
///     .with_column(ColumnDescriptor::varchar("user_id", 36).key());
///
/// let sql = generate_table_sql(&table).unwrap();
/// assert!(sql.contains(r#""role_id" VARCHAR(255) NOT NULL"#));
/// assert!(sql.contains(r#"PRIMARY KEY ("role_id", "user_id")"#));
/// ```
pub fn generate_table_sql(table: &TableDescriptor) -> Result<String> {
    validate_identifier(&table.name)?;

    let mut lines = Vec::with_capacity(table.column_count() + 1);
    for column in &table.columns {
        validate_identifier(&column.name)?;

        let mut line = format!("    {} {}", quote(&column.name), column_type_sql(column));
        if !column.nullable {
            line.push_str(" NOT NULL");
        }
        if let Some(value) = &column.default_value {
            if !is_literal(value) {
                return Err(SqliteError::InvalidDefault {
                    table: table.name.clone(),
                    column: column.name.clone(),
                    value: value.clone(),
                });
            }
            line.push_str(" DEFAULT ");
            line.push_str(value);
        }
        lines.push(line);
    }

    let keys = table.primary_key_names();
    if !keys.is_empty() {
        let keys: Vec<String> = keys.into_iter().map(quote).collect();
        lines.push(format!("    PRIMARY KEY ({})", keys.join(", ")));
    }

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n);\n",
        quote(&table.name),
        lines.join(",\n")
    ))
}

/// Generates the schema for every registered table, in registration order.
///
/// # Errors
///
/// Fails on the first table [`generate_table_sql`] rejects.
pub fn generate_schema_sql(registry: &SchemaRegistry) -> Result<String> {
    let mut sql = String::new();
    for table in registry.tables() {
        sql.push_str(&generate_table_sql(table)?);
        sql.push('\n');
    }
    Ok(sql)
}

/// Generates SQL to drop every registered table, in reverse registration
/// order.
///
/// # Errors
///
/// Returns [`SqliteError::InvalidIdentifier`] for an unsafe table name.
pub fn generate_drop_sql(registry: &SchemaRegistry) -> Result<String> {
    let names: Vec<&str> = registry.table_names().collect();
    let mut sql = String::new();
    for name in names.into_iter().rev() {
        validate_identifier(name)?;
        sql.push_str(&format!("DROP TABLE IF EXISTS {};\n", quote(name)));
    }
    Ok(sql)
}

/// Returns the DDL for one registered table.
///
/// # Errors
///
/// Returns [`SqliteError::TableNotFound`] if the name is not registered.
pub fn fetch_ddl(registry: &SchemaRegistry, name: &str) -> Result<String> {
    let table = registry
        .lookup(name)
        .ok_or_else(|| SqliteError::TableNotFound(name.to_string()))?;
    generate_table_sql(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authentication_flow() -> TableDescriptor {
        TableDescriptor::new("authentication_flow")
            .with_column(ColumnDescriptor::varchar("id", 36).key())
            .with_column(ColumnDescriptor::varchar("alias", 255))
            .with_column(
                ColumnDescriptor::varchar("provider_id", 36)
                    .required()
                    .with_default("'basic-flow'"),
            )
            .with_column(ColumnDescriptor::boolean("top_level").required().with_default("false"))
    }

    #[test]
    fn test_valid_identifier() {
        assert!(validate_identifier("user_entity").is_ok());
        assert!(validate_identifier("Table2").is_ok());
        assert!(validate_identifier("_").is_ok());
    }

    #[test]
    fn test_invalid_identifier() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("drop;--").is_err());
        assert!(validate_identifier("user entity").is_err());
        assert!(validate_identifier("a\"b").is_err());
        assert!(validate_identifier("tâble").is_err());
    }

    #[test]
    fn test_literals() {
        for value in [
            "0",
            "-42",
            "'local'",
            "' '",
            "'it''s'",
            "false",
            "TRUE",
            "null",
            "CURRENT_TIMESTAMP",
        ] {
            assert!(is_literal(value), "{value}");
        }
        for value in ["", "'", "'a'b'", "1; DROP TABLE realm", "now()", "1.5e"] {
            assert!(!is_literal(value), "{value}");
        }
    }

    #[test]
    fn test_table_sql_layout() {
        let sql = generate_table_sql(&authentication_flow()).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS \"authentication_flow\" (\n\
             \x20   \"id\" VARCHAR(36) NOT NULL,\n\
             \x20   \"alias\" VARCHAR(255),\n\
             \x20   \"provider_id\" VARCHAR(36) NOT NULL DEFAULT 'basic-flow',\n\
             \x20   \"top_level\" BOOLEAN NOT NULL DEFAULT false,\n\
             \x20   PRIMARY KEY (\"id\")\n\
             );\n"
        );
    }

    #[test]
    fn test_table_without_key_has_no_key_clause() {
        let table = TableDescriptor::new("databasechangelog")
            .with_column(ColumnDescriptor::varchar("id", 255).required())
            .with_column(ColumnDescriptor::timestamp("dateexecuted").required());
        let sql = generate_table_sql(&table).unwrap();
        assert!(!sql.contains("PRIMARY KEY"));
        assert!(sql.contains("\"dateexecuted\" TIMESTAMP NOT NULL"));
    }

    #[test]
    fn test_rejects_unsafe_default() {
        let table = TableDescriptor::new("realm").with_column(
            ColumnDescriptor::varchar("name", 255).with_default("'x'); DROP TABLE realm; --"),
        );
        assert!(matches!(
            generate_table_sql(&table),
            Err(SqliteError::InvalidDefault { ref column, .. }) if column == "name"
        ));
    }

    #[test]
    fn test_rejects_unsafe_column_name() {
        let table = TableDescriptor::new("realm").with_column(ColumnDescriptor::text("na me"));
        assert!(matches!(
            generate_table_sql(&table),
            Err(SqliteError::InvalidIdentifier(ref name)) if name == "na me"
        ));
    }

    #[test]
    fn test_every_type_round_trips_through_declared_sql() {
        for column in [
            ColumnDescriptor::varchar("a", 2550),
            ColumnDescriptor::text("b"),
            ColumnDescriptor::int4("c"),
            ColumnDescriptor::int8("d"),
            ColumnDescriptor::boolean("e"),
            ColumnDescriptor::timestamp("f"),
        ] {
            let declared = column_type_sql(&column);
            assert_eq!(
                parse_declared_type(&declared),
                Some((column.database_type, column.length)),
                "{declared}"
            );
        }
    }

    #[test]
    fn test_parse_declared_aliases() {
        assert_eq!(
            parse_declared_type("character varying(36)"),
            Some((DatabaseType::Varchar, 36))
        );
        assert_eq!(parse_declared_type("INT(11)"), Some((DatabaseType::Int4, UNBOUNDED)));
        assert_eq!(parse_declared_type("DATETIME"), Some((DatabaseType::Timestamp, UNBOUNDED)));
        assert_eq!(parse_declared_type("VARCHAR"), Some((DatabaseType::Varchar, UNBOUNDED)));
        assert_eq!(parse_declared_type("VARCHAR(abc)"), None);
        assert_eq!(parse_declared_type(""), None);
        assert_eq!(parse_declared_type("REAL"), None);
    }

    #[test]
    fn test_builtin_schema_executes() {
        let registry = SchemaRegistry::builtin().unwrap();
        let sql = generate_schema_sql(&registry).unwrap();
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(&sql).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count as usize, registry.len());

        conn.execute_batch(&generate_drop_sql(&registry).unwrap()).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_drop_sql_reverses_registration_order() {
        let mut registry = SchemaRegistry::new();
        registry.register(authentication_flow()).unwrap();
        let realm =
            TableDescriptor::new("realm").with_column(ColumnDescriptor::varchar("id", 36).key());
        registry.register(realm).unwrap();
        assert_eq!(
            generate_drop_sql(&registry).unwrap(),
            "DROP TABLE IF EXISTS \"realm\";\nDROP TABLE IF EXISTS \"authentication_flow\";\n"
        );
    }

    #[test]
    fn test_fetch_ddl() {
        let registry = SchemaRegistry::builtin().unwrap();
        let sql = fetch_ddl(&registry, "client_scope_client").unwrap();
        assert!(sql.contains("\"default_scope\" BOOLEAN NOT NULL DEFAULT false"));
        assert!(matches!(
            fetch_ddl(&registry, "missing"),
            Err(SqliteError::TableNotFound(ref name)) if name == "missing"
        ));
    }
}
