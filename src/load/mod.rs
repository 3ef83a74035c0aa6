//! The normalization pipeline: flatten the parsed feed, resolve entities
//! and prizes to surrogate ids, then link awards, all inside one
//! transaction on the target database.

pub mod junction;
pub mod resolve;
pub mod sink;

pub use sink::{Sink, SqlValue};

use rusqlite::Connection;
use serde_json::Value;

use crate::error::LoadError;
use crate::flatten::flatten_feed;
use crate::schema::tables::AWARD;
use crate::ui::{Phase, Ui};
use junction::build_awards;
use resolve::{resolve_categories, resolve_prizes, resolve_recipients};

/// Row counts and drop counters from one load run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    pub records: u64,
    pub prize_only_records: u64,
    pub categories: u64,
    pub recipients: u64,
    pub prizes: u64,
    pub awards: u64,
    /// Laureate-bearing records that failed prize or recipient resolution
    pub dropped_awards: u64,
}

/// Run the full normalization pass over a parsed feed document.
///
/// The stages run strictly in sequence with no retries: flatten, resolve
/// categories and recipients, resolve prizes, build and insert the award
/// rows. A failure at any stage aborts the run and rolls the transaction
/// back; resolution gaps only drop the affected records.
pub fn load_feed(
    conn: &mut Connection,
    doc: &Value,
    ui: &mut impl Ui,
) -> Result<LoadStats, LoadError> {
    ui.set_phase(Phase::Flattening);
    let records = flatten_feed(doc)?;

    let mut stats = LoadStats {
        records: records.len() as u64,
        prize_only_records: records.iter().filter(|r| !r.has_recipient()).count() as u64,
        ..LoadStats::default()
    };
    ui.log(format!(
        "{} flattened records ({} prize-only)",
        stats.records, stats.prize_only_records
    ));

    let tx = conn.transaction()?;
    {
        let sink = Sink::new(&tx);

        ui.set_phase(Phase::Resolving);
        let category_ids = resolve_categories(&sink, &records, ui)?;
        let recipient_ids = resolve_recipients(&sink, &records, ui)?;
        let prize_ids = resolve_prizes(&sink, &records, &category_ids, ui)?;
        stats.categories = category_ids.len() as u64;
        stats.recipients = recipient_ids.len() as u64;
        stats.prizes = prize_ids.len() as u64;

        ui.set_phase(Phase::Linking);
        let outcome = build_awards(&records, &prize_ids, &recipient_ids);
        // The largest write of the run, submitted as one batch
        sink.insert_ignore_batch(
            &AWARD,
            &["motivation", "share", "prize_id", "recipient_id"],
            &outcome.rows,
        )?;
        stats.awards = outcome.rows.len() as u64;
        stats.dropped_awards = outcome.dropped;

        if outcome.dropped > 0 {
            ui.log(format!(
                "{} records dropped during junction resolution",
                outcome.dropped
            ));
        }
    }
    tx.commit()?;

    ui.set_phase(Phase::Complete);
    Ok(stats)
}
