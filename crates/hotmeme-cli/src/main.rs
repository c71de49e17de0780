//! hotmeme - a terminal view of the trending-meme board.
//!
//! Shows the ranked hot list, the latest chart values and the snapshot age.
//! Works offline from bundled snapshots; `--refresh` pulls the latest bundle.

use std::io;
use std::path::Path;

use anyhow::{bail, Result};
use chrono::Local;
use serde_json::json;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hotmeme_core::board::{CHART_DATA_KEY, HOT_LIST_KEY, UPDATE_INFO_KEY};
use hotmeme_core::{Config, MemeBoard};

// ============================================================================
// Constants
// ============================================================================

/// Log file name prefix inside the log directory
const LOG_FILE: &str = "hotmeme.log";

/// Width the meme name column is padded to
const NAME_COLUMN_WIDTH: usize = 24;

const USAGE: &str = "\
Usage: hotmeme [--refresh [URL] | --export FILE | --help]

  (no args)        show the trending list from cached or bundled data
  --refresh [URL]  fetch the latest bundle (URL defaults to config/HOTMEME_API_URL)
  --export FILE    write all current data as JSON under the data directory";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Show,
    Refresh(Option<String>),
    Export(String),
    Help,
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args.get(1).map(String::as_str) {
        None => Ok(Command::Show),
        Some("--refresh") => Ok(Command::Refresh(args.get(2).cloned())),
        Some("--export") => match args.get(2) {
            Some(file) => Ok(Command::Export(file.clone())),
            None => bail!("--export needs a file name"),
        },
        Some("--help") | Some("-h") => Ok(Command::Help),
        Some(other) => bail!("Unknown argument: {}\n\n{}", other, USAGE),
    }
}

/// Initialize the tracing subscriber for logging.
/// Logs go to stderr and, when `log_dir` is usable, to a daily file.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_dir.filter(|dir| std::fs::create_dir_all(dir).is_ok()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    let command = parse_args(&args)?;
    if command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut config = Config::load()?;
    config.apply_env();

    let log_dir = config.log_dir().ok();
    let _guard = init_tracing(log_dir.as_deref());
    info!("hotmeme starting");

    let mut board = MemeBoard::open(&config)?;
    board.init_all().await;

    match command {
        Command::Show | Command::Help => {}
        Command::Refresh(url) => {
            let Some(url) = url.or_else(|| config.api_url.clone()) else {
                bail!("No URL given and no api_url configured");
            };
            let updated = board.load_latest(&url).await?;
            eprintln!("Updated: {}", updated.join(", "));
        }
        Command::Export(file) => {
            let manager = board.manager();
            let document = json!({
                HOT_LIST_KEY: manager.get(HOT_LIST_KEY),
                CHART_DATA_KEY: manager.get(CHART_DATA_KEY),
                UPDATE_INFO_KEY: manager.get(UPDATE_INFO_KEY),
            });
            if !board.export_to_file(&file, &document).await {
                bail!("Failed to export to {}", file);
            }
            eprintln!("Exported to {}", board.manager().files().root().join(&file).display());
            return Ok(());
        }
    }

    render(&mut board).await;
    info!("hotmeme done");
    Ok(())
}

/// Pad or cut `s` to `width` characters.
fn fit(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count > width {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    } else {
        format!("{}{}", s, " ".repeat(width - count))
    }
}

async fn render(board: &mut MemeBoard) {
    let update = board.update_info(false).await;
    let now = Local::now().naive_local();
    println!(
        "Trending memes (updated {}, {})",
        update.last_update,
        update.age_display(now)
    );
    println!();

    let hot_list = board.hot_list(false).await;
    if hot_list.is_empty() {
        println!("  No trending data available");
    }
    for (rank, item) in hot_list.iter().enumerate() {
        println!(
            "{:>2}. {} {:>8} {:>7}  [{}]",
            rank + 1,
            fit(&item.name, NAME_COLUMN_WIDTH),
            item.heat_display,
            item.trend_display(),
            item.source_display()
        );
        if !item.description.is_empty() {
            println!("    {}", item.description);
        }
    }

    let chart = board.chart_data(false).await;
    if chart.is_empty() {
        return;
    }
    println!();
    match (chart.dates.first(), chart.latest_date()) {
        (Some(first), Some(last)) => println!("Heat trend ({} - {})", first, last),
        _ => println!("Heat trend"),
    }
    for series in chart.ranked() {
        let latest = series
            .latest()
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".to_string());
        let change = series
            .latest_change()
            .map(|d| format!("{:+.1}", d))
            .unwrap_or_default();
        println!("  {} {:>6} {:>7}", fit(&series.name, NAME_COLUMN_WIDTH), latest, change);
    }
}
