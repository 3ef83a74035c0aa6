//! Flattens the nested feed document into one denormalized record per
//! (prize, laureate) pair, ready for entity resolution.
//!
//! Every leaf scalar in the feed arrives as a string or is absent, so all
//! numeric parsing happens here. A field that is not a plain run of decimal
//! digits becomes absent, never zero and never an error.

use serde_json::Value;

use crate::error::LoadError;

/// Longest motivation text kept on a record; matches the award table bound.
pub const MOTIVATION_MAX_CHARS: usize = 500;

/// One row per laureate of a prize, or a single prize-only row (all
/// recipient fields absent) when a prize lists no laureates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionRecord {
    pub year: Option<i64>,
    pub category: Option<String>,
    /// The feed's own laureate identifier. Gates whether this record carries
    /// a recipient at all; recipient identity is the name pair, see
    /// [`name_key`](Self::name_key).
    pub recipient_key: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub motivation: Option<String>,
    pub share: Option<i64>,
}

impl IngestionRecord {
    /// Whether the feed listed a laureate on this row.
    pub fn has_recipient(&self) -> bool {
        self.recipient_key.is_some()
    }

    /// Identity key for the recipient table: the name pair as observed.
    pub fn name_key(&self) -> (Option<String>, Option<String>) {
        (self.first_name.clone(), self.last_name.clone())
    }
}

/// Walk the parsed feed document and produce the flat record sequence,
/// order-preserving, in one pass.
pub fn flatten_feed(doc: &Value) -> Result<Vec<IngestionRecord>, LoadError> {
    let prizes = doc
        .get("prizes")
        .and_then(Value::as_array)
        .ok_or(LoadError::MalformedFeed)?;

    let mut records = Vec::with_capacity(prizes.len());

    for prize in prizes {
        let year = digits_only(prize.get("year"));
        let category = text(prize.get("category"));
        let laureates = prize.get("laureates").and_then(Value::as_array);

        match laureates {
            Some(laureates) if !laureates.is_empty() => {
                for laureate in laureates {
                    records.push(IngestionRecord {
                        year,
                        category: category.clone(),
                        recipient_key: text(laureate.get("id")),
                        first_name: text(laureate.get("firstname")),
                        last_name: text(laureate.get("surname")),
                        motivation: text(laureate.get("motivation"))
                            .map(|m| clip(m, MOTIVATION_MAX_CHARS)),
                        share: digits_only(laureate.get("share")),
                    });
                }
            }
            // Prizes with no laureates still produce one prize-only record
            _ => records.push(IngestionRecord {
                year,
                category,
                recipient_key: None,
                first_name: None,
                last_name: None,
                motivation: None,
                share: None,
            }),
        }
    }

    Ok(records)
}

/// Parse a scalar only if it is a string made entirely of decimal digits
fn digits_only(value: Option<&Value>) -> Option<i64> {
    let s = value?.as_str()?;
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn text(value: Option<&Value>) -> Option<String> {
    value?.as_str().map(str::to_string)
}

/// Truncate to at most `max_chars` characters, char-boundary safe
fn clip(mut s: String, max_chars: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max_chars) {
        s.truncate(idx);
    }
    s
}
