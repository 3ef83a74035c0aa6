use reqwest::blocking::Client;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::LoadError;
use crate::ui::Ui;

/// The public prize feed, one JSON document covering every year.
pub const FEED_URL: &str = "https://api.nobelprize.org/v1/prize.json";

pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn new() -> Result<Self, LoadError> {
        let client = Client::builder()
            .user_agent("nobel-to-sqlite")
            .build()
            .map_err(LoadError::unavailable)?;
        Ok(Self { client })
    }

    /// Stream the feed document to the given path
    pub fn download_to(&self, dest: &Path, ui: &mut impl Ui) -> Result<(), LoadError> {
        let response = self
            .client
            .get(FEED_URL)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(LoadError::unavailable)?;

        let total_size = response.content_length().unwrap_or(0);

        let mut file = std::fs::File::create(dest).map_err(LoadError::unavailable)?;

        let mut downloaded: u64 = 0;
        let mut buffer = [0u8; 8192];
        let mut reader = response;

        loop {
            let bytes_read = reader.read(&mut buffer).map_err(LoadError::unavailable)?;

            if bytes_read == 0 {
                break;
            }

            file.write_all(&buffer[..bytes_read])
                .map_err(LoadError::unavailable)?;

            downloaded += bytes_read as u64;
            ui.set_progress(downloaded, total_size, format_bytes(downloaded, total_size));
        }

        ui.clear_progress();
        ui.log("Download complete");
        Ok(())
    }
}

/// Format bytes as human-readable string
fn format_bytes(current: u64, total: u64) -> String {
    fn fmt(bytes: u64) -> String {
        if bytes >= 1_000_000_000 {
            format!("{:.1} GB", bytes as f64 / 1_000_000_000.0)
        } else if bytes >= 1_000_000 {
            format!("{:.1} MB", bytes as f64 / 1_000_000.0)
        } else if bytes >= 1_000 {
            format!("{:.1} KB", bytes as f64 / 1_000.0)
        } else {
            format!("{} B", bytes)
        }
    }
    format!("{} / {}", fmt(current), fmt(total))
}
