pub mod cache;
pub mod client;

pub use cache::CacheManager;
pub use client::{FeedClient, FEED_URL};

use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::ui::{Phase, Ui};

/// Download the feed into the cache unless a copy is already present.
/// Returns the path of the cached document.
pub fn ensure_feed_cached(
    custom_dir: Option<PathBuf>,
    force: bool,
    ui: &mut impl Ui,
) -> Result<PathBuf> {
    ui.set_phase(Phase::Checking);
    let cache = CacheManager::new(custom_dir)?;
    let path = cache.feed_path();

    if cache.is_cached() && !force {
        ui.log(format!("Using cached feed at {:?}", path));
        return Ok(path);
    }

    ui.set_phase(Phase::Downloading);
    let client = FeedClient::new()?;
    client.download_to(&path, ui)?;
    ui.log(format!("Fetched {} to {:?}", FEED_URL, path));

    Ok(path)
}

/// Read and parse a previously fetched feed file.
pub fn read_feed_file(path: &Path) -> Result<Value, LoadError> {
    let text = fs::read_to_string(path).map_err(LoadError::unavailable)?;
    serde_json::from_str(&text).map_err(LoadError::unavailable)
}
