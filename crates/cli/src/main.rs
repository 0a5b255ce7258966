//! CLI entry point for stock-chart.
//!
//! Subcommands:
//!   - `fetch`: Download quotes for a ticker and date range, write one SVG per tab
//!   - `render`: Chart a CSV file already on disk
//!   - `tickers`: List the selectable ticker symbols

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stock_chart_core::models::chart::LoadOutcome;
use stock_chart_core::models::query::{parse_query_date, QuoteQuery, SELECTABLE_YEARS, TICKERS};
use stock_chart_core::models::settings::{ChartGeometry, Settings};
use stock_chart_core::render::{render_svg, MessageView};
use stock_chart_core::StockCharts;

// ---------------------------------------------------------------------------
// CLI argument structs
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "stock-chart",
    version,
    about = "Fetch historical stock prices and chart Open/High/Low/Close/Volume",
    propagate_version = true
)]
struct Cli {
    /// JSON settings file (missing keys fall back to defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download quotes and write the charts
    Fetch(FetchArgs),
    /// Chart a local CSV file
    Render(RenderArgs),
    /// List selectable ticker symbols
    Tickers,
}

#[derive(Parser)]
struct FetchArgs {
    /// Ticker symbol, e.g. AAPL
    #[arg(long)]
    ticker: String,

    /// Start date as M/D/YYYY
    #[arg(long, default_value = "1/1/2019")]
    start: String,

    /// End date as M/D/YYYY
    #[arg(long, default_value = "1/1/2019")]
    end: String,

    /// Directory the SVG files are written to
    #[arg(long, default_value = "charts")]
    out: PathBuf,
}

#[derive(Parser)]
struct RenderArgs {
    /// CSV file with a header line and Date,Open,High,Low,Close,Volume rows
    csv: PathBuf,

    /// Chart title (defaults to the file name)
    #[arg(long)]
    title: Option<String>,

    /// Directory the SVG files are written to
    #[arg(long, default_value = "charts")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("Cannot load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Tickers => {
            for t in TICKERS {
                println!("{:<6} {}", t.symbol, t.name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fetch(args) => {
            let start = picker_date(&args.start)?;
            let end = picker_date(&args.end)?;
            let query = QuoteQuery::new(&args.ticker, start, end)?;
            let title = query.title();

            let charts = StockCharts::new(settings)?;
            let outcome = charts.load(query).await;
            write_outcome(&charts.settings().geometry, &outcome, &title, &args.out)
        }
        Commands::Render(args) => {
            let title = args.title.unwrap_or_else(|| {
                args.csv
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "chart".to_string())
            });

            let charts = StockCharts::new(settings)?;
            let outcome = charts.load_local(&args.csv, &title).await;
            write_outcome(&charts.settings().geometry, &outcome, &title, &args.out)
        }
    }
}

/// Parse a date the way the pickers offer them: a real calendar day in one
/// of the selectable years.
fn picker_date(s: &str) -> Result<NaiveDate> {
    let date = parse_query_date(s)?;
    if !SELECTABLE_YEARS.contains(&date.year()) {
        bail!(
            "Year {} is outside the selectable range {}..={}",
            date.year(),
            SELECTABLE_YEARS.start(),
            SELECTABLE_YEARS.end()
        );
    }
    Ok(date)
}

/// Write one SVG per tab, or a single message SVG when loading failed.
fn write_outcome(
    geometry: &ChartGeometry,
    outcome: &LoadOutcome,
    title: &str,
    out: &Path,
) -> Result<ExitCode> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("Cannot create output directory {}", out.display()))?;

    match outcome {
        Ok(set) => {
            if set.dropped_rows > 0 {
                tracing::warn!("{} malformed rows were skipped", set.dropped_rows);
            }
            for tab in &set.tabs {
                let svg = render_svg(tab, geometry, &format!("{} - {}", set.title, tab.title()))?;
                let path = out.join(format!("{}.svg", tab.title().to_lowercase()));
                std::fs::write(&path, svg)
                    .with_context(|| format!("Cannot write {}", path.display()))?;
                println!("{}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            if let Some(reason) = failure.reason() {
                tracing::warn!("{failure}: {reason}");
            }
            let svg = render_svg(&MessageView::from(failure), geometry, title)?;
            let path = out.join("message.svg");
            std::fs::write(&path, svg)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            println!("{failure}");
            Ok(ExitCode::FAILURE)
        }
    }
}
