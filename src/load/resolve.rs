//! Entity and prize resolution: derive the distinct categories, recipients
//! and (year, category) prizes from the flattened records, insert them
//! duplicate-ignoring, and build the id lookup maps.
//!
//! The two-phase shape is deliberate: the batch insert reports nothing back
//! for rows that already existed, so every id is fetched with a point
//! lookup afterwards. A key that still fails to resolve is left out of its
//! map and the records referencing it are dropped downstream, never a hard
//! error.

use std::collections::{BTreeSet, HashMap};

use super::sink::{Sink, SqlValue};
use crate::error::LoadError;
use crate::flatten::IngestionRecord;
use crate::schema::tables::{CATEGORY, PRIZE, RECIPIENT};
use crate::ui::Ui;

/// Natural identity of a recipient: the name pair as observed in the feed
pub type NameKey = (Option<String>, Option<String>);

/// Identity of a prize before id resolution: (year, category name)
pub type PrizeKey = (i64, String);

/// Resolve category names to surrogate ids
pub fn resolve_categories(
    sink: &Sink,
    records: &[IngestionRecord],
    ui: &mut impl Ui,
) -> Result<HashMap<String, i64>, LoadError> {
    let names: BTreeSet<&str> = records.iter().filter_map(|r| r.category.as_deref()).collect();

    let rows: Vec<Vec<SqlValue>> = names.iter().map(|n| vec![SqlValue::from(*n)]).collect();
    sink.insert_ignore_batch(&CATEGORY, &["name"], &rows)?;

    let mut ids = HashMap::new();
    for name in names {
        match sink.lookup_id(&CATEGORY, &[("name", SqlValue::from(name))])? {
            Some(id) => {
                ids.insert(name.to_string(), id);
            }
            None => ui.log(format!("category {:?} did not resolve; skipping", name)),
        }
    }

    Ok(ids)
}

/// Resolve recipient name pairs to surrogate ids. Only records that carry a
/// laureate contribute; the pair may be partially or fully absent.
pub fn resolve_recipients(
    sink: &Sink,
    records: &[IngestionRecord],
    ui: &mut impl Ui,
) -> Result<HashMap<NameKey, i64>, LoadError> {
    let keys: BTreeSet<NameKey> = records
        .iter()
        .filter(|r| r.has_recipient())
        .map(|r| r.name_key())
        .collect();

    let rows: Vec<Vec<SqlValue>> = keys
        .iter()
        .map(|(first, last)| vec![SqlValue::from(first), SqlValue::from(last)])
        .collect();
    sink.insert_ignore_batch(&RECIPIENT, &["first_name", "last_name"], &rows)?;

    let mut ids = HashMap::new();
    for key in keys {
        let matches = [
            ("first_name", SqlValue::from(&key.0)),
            ("last_name", SqlValue::from(&key.1)),
        ];
        match sink.lookup_id(&RECIPIENT, &matches)? {
            Some(id) => {
                ids.insert(key, id);
            }
            None => ui.log(format!("recipient {:?} did not resolve; skipping", key)),
        }
    }

    Ok(ids)
}

/// Resolve (year, category) pairs to prize ids. The returned map is keyed
/// by category *name* so the junction builder can resolve straight from the
/// flattened records.
pub fn resolve_prizes(
    sink: &Sink,
    records: &[IngestionRecord],
    category_ids: &HashMap<String, i64>,
    ui: &mut impl Ui,
) -> Result<HashMap<PrizeKey, i64>, LoadError> {
    let pairs: BTreeSet<PrizeKey> = records
        .iter()
        .filter_map(|r| match (r.year, r.category.as_ref()) {
            (Some(year), Some(category)) => Some((year, category.clone())),
            _ => None,
        })
        .collect();

    let mut resolvable: Vec<(i64, String, i64)> = Vec::with_capacity(pairs.len());
    for (year, category) in pairs {
        match category_ids.get(&category) {
            Some(&category_id) => resolvable.push((year, category, category_id)),
            None => ui.log(format!(
                "prize ({}, {:?}) references an unresolved category; skipping",
                year, category
            )),
        }
    }

    let rows: Vec<Vec<SqlValue>> = resolvable
        .iter()
        .map(|(year, _, category_id)| vec![SqlValue::from(*year), SqlValue::from(*category_id)])
        .collect();
    sink.insert_ignore_batch(&PRIZE, &["year", "category_id"], &rows)?;

    let mut ids = HashMap::new();
    for (year, category, category_id) in resolvable {
        let matches = [
            ("year", SqlValue::from(year)),
            ("category_id", SqlValue::from(category_id)),
        ];
        match sink.lookup_id(&PRIZE, &matches)? {
            Some(id) => {
                ids.insert((year, category), id);
            }
            None => ui.log(format!(
                "prize ({}, {:?}) did not resolve; skipping",
                year, category
            )),
        }
    }

    Ok(ids)
}
