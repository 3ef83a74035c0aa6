use anyhow::Result;
use nobel_to_sqlite::{
    cli::{Cli, Commands},
    feed::{ensure_feed_cached, read_feed_file},
    load::{load_feed, LoadStats},
    query::award_report,
    schema::{create_schema, open_database, open_database_readonly, table_names},
    ui::ConsoleUi,
};
use serde_json::Value;
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Sync {
            output_db,
            force,
            cache_dir,
        } => {
            let start = Instant::now();
            let mut ui = ConsoleUi::new();

            // Fetch feed if needed
            let feed_path = ensure_feed_cached(cache_dir, force, &mut ui)?;
            let doc = read_feed_file(&feed_path)?;

            let stats = load_into(&output_db, &doc, &mut ui)?;
            print_summary(&output_db, &stats, start.elapsed().as_secs_f64());
        }

        Commands::Fetch { output, force } => {
            let mut ui = ConsoleUi::new();
            let path = ensure_feed_cached(output, force, &mut ui)?;
            println!("Feed downloaded to {:?}", path);
        }

        Commands::Load {
            input_json,
            output_db,
        } => {
            let start = Instant::now();
            let mut ui = ConsoleUi::new();

            let doc = read_feed_file(&input_json)?;
            let stats = load_into(&output_db, &doc, &mut ui)?;
            print_summary(&output_db, &stats, start.elapsed().as_secs_f64());
        }

        Commands::Query { db, limit, json } => {
            let conn = open_database_readonly(&db)?;
            let rows = award_report(&conn, limit)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    let year = row
                        .year
                        .map_or_else(|| "----".to_string(), |y| y.to_string());
                    let share = row
                        .share
                        .map_or_else(|| "-".to_string(), |s| s.to_string());
                    println!(
                        "{:>4}  {:<12}  {:<32}  1/{}  {}",
                        year,
                        row.category,
                        row.recipient_name(),
                        share,
                        row.motivation.as_deref().unwrap_or("")
                    );
                }
            }
        }

        Commands::ListTables => {
            println!("Tables in dependency order:\n");
            for name in table_names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

/// Recreate the schema and run the load against the given database path
fn load_into(output_db: &Path, doc: &Value, ui: &mut ConsoleUi) -> Result<LoadStats> {
    let mut conn = open_database(output_db)?;
    create_schema(&conn)?;
    let stats = load_feed(&mut conn, doc, ui)?;
    Ok(stats)
}

fn print_summary(output_db: &Path, stats: &LoadStats, elapsed: f64) {
    println!(
        "\nCreated {:?} ({} categories, {} recipients, {} prizes, {} awards) in {:.1}s",
        output_db, stats.categories, stats.recipients, stats.prizes, stats.awards, elapsed
    );
    if stats.dropped_awards > 0 {
        println!(
            "{} records could not be resolved and were dropped",
            stats.dropped_awards
        );
    }
}
