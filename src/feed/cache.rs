use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const FEED_FILE: &str = "prize.json";

/// Keeps one fetched copy of the feed between runs.
pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(custom_dir: Option<PathBuf>) -> Result<Self> {
        let cache_dir = match custom_dir {
            Some(dir) => dir,
            None => {
                let proj_dirs = ProjectDirs::from("", "", "nobel-to-sqlite")
                    .context("Could not determine cache directory")?;
                proj_dirs.cache_dir().to_path_buf()
            }
        };

        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

        Ok(Self { cache_dir })
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path the fetched feed document is stored at
    pub fn feed_path(&self) -> PathBuf {
        self.cache_dir.join(FEED_FILE)
    }

    /// Check if a fetched feed is already present
    pub fn is_cached(&self) -> bool {
        self.feed_path().exists()
    }
}
