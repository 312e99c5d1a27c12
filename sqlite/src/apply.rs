//! Creating registered tables in a SQLite database.

use iam_schema_registry::SchemaRegistry;
use rusqlite::Connection;
use tracing::info;

use crate::error::Result;
use crate::schema::generate_schema_sql;

/// Creates every registered table that does not exist yet.
///
/// Uses `CREATE TABLE IF NOT EXISTS`, so existing tables are left as they
/// are; run [`check_schema`](crate::check_schema) to find drift. All
/// statements run in one transaction: either every table is created or
/// none is.
///
/// Returns the number of tables created.
pub fn create_tables(conn: &mut Connection, registry: &SchemaRegistry) -> Result<usize> {
    let sql = generate_schema_sql(registry)?;
    let before = crate::existing_tables(conn)?.len();

    let tx = conn.transaction()?;
    tx.execute_batch(&sql)?;
    tx.commit()?;

    let created = crate::existing_tables(conn)?.len().saturating_sub(before);
    info!(created, registered = registry.len(), "created tables");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iam_schema_core::{ColumnDescriptor, TableDescriptor};

    #[test]
    fn test_create_tables_is_idempotent() {
        let registry = SchemaRegistry::builtin().unwrap();
        let mut conn = Connection::open_in_memory().unwrap();

        assert_eq!(create_tables(&mut conn, &registry).unwrap(), registry.len());
        assert_eq!(create_tables(&mut conn, &registry).unwrap(), 0);
    }

    fn keyed(name: &str) -> TableDescriptor {
        TableDescriptor::new(name).with_column(ColumnDescriptor::varchar("id", 36).key())
    }

    #[test]
    fn test_created_count_includes_sqlite_prefixed_names() {
        let mut registry = SchemaRegistry::new();
        registry.register(keyed("sqlitex_audit")).unwrap();
        let mut conn = Connection::open_in_memory().unwrap();

        assert_eq!(create_tables(&mut conn, &registry).unwrap(), 1);
        assert_eq!(crate::existing_tables(&conn).unwrap(), vec!["sqlitex_audit"]);
    }

    #[test]
    fn test_failed_statement_rolls_back() {
        let mut registry = SchemaRegistry::new();
        registry.register(keyed("realm")).unwrap();
        registry.register(keyed("client")).unwrap();

        let mut conn = Connection::open_in_memory().unwrap();
        // An index named "client" makes the second CREATE TABLE fail.
        conn.execute_batch("CREATE TABLE other (x TEXT); CREATE INDEX client ON other (x);")
            .unwrap();

        assert!(create_tables(&mut conn, &registry).is_err());
        assert_eq!(crate::existing_tables(&conn).unwrap(), vec!["other"]);
    }
}
