use thiserror::Error;

/// Errors that abort a load run.
///
/// A reference that fails to resolve during a lookup phase is deliberately
/// not represented here: it is non-fatal, the affected records are dropped
/// and counted in [`LoadStats`](crate::load::LoadStats).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The HTTP fetch failed or returned a non-parseable body.
    #[error("prize feed unavailable: {0}")]
    FeedUnavailable(String),

    /// The parsed document has no top-level "prizes" array.
    #[error("feed document is missing the top-level \"prizes\" array")]
    MalformedFeed,

    /// A batch insert or lookup itself failed, outside the tolerated
    /// uniqueness-violation case.
    #[error("persistence failure")]
    Persistence(#[from] rusqlite::Error),
}

impl LoadError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        LoadError::FeedUnavailable(err.to_string())
    }
}
