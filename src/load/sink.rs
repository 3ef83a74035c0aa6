//! The persistence sink: duplicate-ignoring batch inserts and point id
//! lookups against the open transaction. Ids are never returned by an
//! insert; callers always resolve them with `lookup_id` afterwards.

use rusqlite::Transaction;

use crate::error::LoadError;
use crate::schema::types::TableSchema;

/// A value bound into a SQL statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Text(String),
}

impl SqlValue {
    fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::Integer)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::Text)
    }
}

impl From<&Option<String>> for SqlValue {
    fn from(value: &Option<String>) -> Self {
        value
            .as_deref()
            .map_or(SqlValue::Null, |s| SqlValue::Text(s.to_string()))
    }
}

pub struct Sink<'a> {
    tx: &'a Transaction<'a>,
}

impl<'a> Sink<'a> {
    pub fn new(tx: &'a Transaction<'a>) -> Self {
        Self { tx }
    }

    /// Insert rows, silently skipping any that violate a uniqueness
    /// constraint
    pub fn insert_ignore_batch(
        &self,
        table: &TableSchema,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> Result<(), LoadError> {
        if rows.is_empty() {
            return Ok(());
        }

        let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
        let sql = format!(
            "INSERT OR IGNORE INTO {} ({}) VALUES ({})",
            table.name,
            columns.join(", "),
            placeholders.join(", ")
        );

        let mut stmt = self.tx.prepare_cached(&sql)?;
        for row in rows {
            for (idx, value) in row.iter().enumerate() {
                value.bind_to(idx + 1, &mut stmt)?;
            }
            stmt.raw_execute()?;
        }

        Ok(())
    }

    /// Point lookup of a surrogate id by exact column match. Uses `IS`
    /// comparison so an absent (NULL) component still matches its row.
    pub fn lookup_id(
        &self,
        table: &TableSchema,
        matches: &[(&str, SqlValue)],
    ) -> Result<Option<i64>, LoadError> {
        let clause: Vec<String> = matches
            .iter()
            .map(|(col, _)| format!("{} IS ?", col))
            .collect();
        let sql = format!(
            "SELECT id FROM {} WHERE {} LIMIT 1",
            table.name,
            clause.join(" AND ")
        );

        let mut stmt = self.tx.prepare_cached(&sql)?;
        for (idx, (_, value)) in matches.iter().enumerate() {
            value.bind_to(idx + 1, &mut stmt)?;
        }

        let mut rows = stmt.raw_query();
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }
}
