//! The downstream query surface: one join across all four tables, ordered
//! by year then category name.

use rusqlite::Connection;
use serde::Serialize;

use crate::error::LoadError;

const REPORT_SQL: &str = "\
SELECT p.year, c.name, r.first_name, r.last_name, a.motivation, a.share
FROM award a
JOIN prize p ON a.prize_id = p.id
JOIN category c ON p.category_id = c.id
JOIN recipient r ON a.recipient_id = r.id
ORDER BY p.year, c.name";

/// One row of the joined award report
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub year: Option<i64>,
    pub category: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub motivation: Option<String>,
    pub share: Option<i64>,
}

impl ReportRow {
    /// Display name for the recipient, or a placeholder when the feed had
    /// no name at all
    pub fn recipient_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => "(unnamed)".to_string(),
        }
    }
}

pub fn award_report(conn: &Connection, limit: Option<u32>) -> Result<Vec<ReportRow>, LoadError> {
    let sql = match limit {
        Some(n) => format!("{} LIMIT {}", REPORT_SQL, n),
        None => REPORT_SQL.to_string(),
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(ReportRow {
            year: row.get(0)?,
            category: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            motivation: row.get(4)?,
            share: row.get(5)?,
        })
    })?;

    let collected = rows.collect::<Result<Vec<_>, rusqlite::Error>>()?;
    Ok(collected)
}
