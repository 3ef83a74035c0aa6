//! Builds the award junction rows. Pure: resolution failures drop the
//! record and bump a counter, the single batch insert happens in the
//! orchestrator.

use std::collections::HashMap;

use super::resolve::{NameKey, PrizeKey};
use super::sink::SqlValue;
use crate::flatten::IngestionRecord;

pub struct JunctionOutcome {
    /// Rows for `award` in (motivation, share, prize_id, recipient_id) order
    pub rows: Vec<Vec<SqlValue>>,
    /// Laureate-bearing records whose prize or recipient failed to resolve
    pub dropped: u64,
}

/// Emit one award row per record whose prize and recipient both resolve.
/// Prize-only records never produce an award and are not counted as drops.
pub fn build_awards(
    records: &[IngestionRecord],
    prize_ids: &HashMap<PrizeKey, i64>,
    recipient_ids: &HashMap<NameKey, i64>,
) -> JunctionOutcome {
    let mut rows = Vec::new();
    let mut dropped = 0;

    for record in records.iter().filter(|r| r.has_recipient()) {
        let resolved = match (record.year, record.category.as_ref()) {
            (Some(year), Some(category)) => prize_ids
                .get(&(year, category.clone()))
                .zip(recipient_ids.get(&record.name_key())),
            _ => None,
        };

        match resolved {
            Some((&prize_id, &recipient_id)) => rows.push(vec![
                SqlValue::from(&record.motivation),
                SqlValue::from(record.share),
                SqlValue::from(prize_id),
                SqlValue::from(recipient_id),
            ]),
            None => dropped += 1,
        }
    }

    JunctionOutcome { rows, dropped }
}
