//! DDL generation and execution for the four-table schema.
//!
//! Every run starts from a clean slate: tables are dropped in reverse
//! dependency order and recreated in forward order before any load.

use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use super::tables::ALL_TABLES;
use super::types::{ColumnType, TableSchema};
use crate::error::LoadError;

/// Open (or create) the target database with bulk-insert friendly pragmas
pub fn open_database(path: &Path) -> Result<Connection, LoadError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA cache_size = -64000;",
    )?;
    Ok(conn)
}

/// Open an existing database read-only, for the query path. Unlike
/// [`open_database`], a path that does not exist is an error rather than a
/// freshly created empty database.
pub fn open_database_readonly(path: &Path) -> Result<Connection, LoadError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    Ok(conn)
}

/// Drop and recreate all tables in dependency order
pub fn create_schema(conn: &Connection) -> Result<(), LoadError> {
    for table in ALL_TABLES.iter().rev() {
        conn.execute_batch(&format!("DROP TABLE IF EXISTS {};", table.name))?;
    }

    for table in ALL_TABLES {
        conn.execute(&generate_create_table(table), [])?;
        for index_sql in generate_indexes(table) {
            conn.execute(&index_sql, [])?;
        }
    }

    Ok(())
}

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let sql_type = match col.col_type {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
        };

        let pk = if col.name == "id" { " PRIMARY KEY" } else { "" };
        let null_constraint = if !col.nullable && col.name != "id" {
            " NOT NULL"
        } else {
            ""
        };

        columns.push(format!(
            "    {} {}{}{}",
            col.name, sql_type, pk, null_constraint
        ));
    }

    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate index statements: declared unique indexes plus one per FK column
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    let mut statements: Vec<String> = schema
        .indexes
        .iter()
        .map(|index| {
            format!(
                "CREATE UNIQUE INDEX idx_{}_{} ON {}({})",
                schema.name,
                index.suffix,
                schema.name,
                index.targets.join(", ")
            )
        })
        .collect();

    statements.extend(schema.foreign_keys.iter().map(|fk| {
        format!(
            "CREATE INDEX idx_{}_{} ON {}({})",
            schema.name, fk.column, schema.name, fk.column
        )
    }));

    statements
}
