use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nobel-to-sqlite")]
#[command(version, about = "Load the Nobel Prize feed into a normalized SQLite database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the feed (if needed) and load it into SQLite
    Sync {
        /// Output SQLite database path
        output_db: PathBuf,

        /// Force re-download even if cached
        #[arg(short, long)]
        force: bool,

        /// Custom cache directory
        #[arg(short, long)]
        cache_dir: Option<PathBuf>,
    },

    /// Download the latest feed JSON into the cache
    Fetch {
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force re-download even if cached
        #[arg(short, long)]
        force: bool,
    },

    /// Load a previously fetched feed file into SQLite
    Load {
        /// Path to a fetched prize.json document
        input_json: PathBuf,

        /// Output SQLite database path
        output_db: PathBuf,
    },

    /// Print the joined award report from a loaded database
    Query {
        /// SQLite database path
        db: PathBuf,

        /// Print at most this many rows
        #[arg(short, long)]
        limit: Option<u32>,

        /// Emit JSON instead of columns
        #[arg(short, long)]
        json: bool,
    },

    /// List the tables in dependency order
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
