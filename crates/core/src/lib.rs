pub mod errors;
pub mod models;
pub mod providers;
pub mod render;
pub mod services;

use std::path::Path;
use tokio::sync::Mutex;
use tracing::{info, warn};

use errors::CoreError;
use models::chart::{LoadFailure, LoadOutcome};
use models::query::QuoteQuery;
use models::settings::Settings;
use providers::traits::QuoteSource;
use providers::wsj::WsjCsvSource;
use services::chart_service::ChartService;
use services::series_parser::SeriesParser;

/// Main entry point for the Stock Chart core library.
/// Holds the settings and the quote source, and runs the
/// fetch → parse → build pipeline for one query at a time.
#[must_use]
pub struct StockCharts {
    settings: Settings,
    source: Box<dyn QuoteSource>,
    /// Held for the duration of a load; every load shares one download path.
    load_lock: Mutex<()>,
}

impl std::fmt::Debug for StockCharts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockCharts")
            .field("source", &self.source.name())
            .field("download_path", &self.settings.download_path)
            .finish()
    }
}

impl StockCharts {
    /// Create an instance backed by the WSJ CSV download.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let source = WsjCsvSource::from_settings(&settings)?;
        Ok(Self::build(settings, Box::new(source)))
    }

    /// Create an instance with a custom quote source.
    pub fn with_source(settings: Settings, source: Box<dyn QuoteSource>) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(settings, source))
    }

    fn build(settings: Settings, source: Box<dyn QuoteSource>) -> Self {
        Self {
            settings,
            source,
            load_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Download, parse and build the charts for one query.
    ///
    /// Overlapping calls are serialized. A failed download is reported as
    /// `LoadFailure::NoFile` without reading whatever the download path
    /// held before.
    pub async fn load(&self, query: QuoteQuery) -> LoadOutcome {
        let _guard = self.load_lock.lock().await;
        let path = self.settings.download_path.as_path();

        info!(source = self.source.name(), query = %query.title(), "Loading quotes");
        if let Err(e) = self.source.download(&query, path).await {
            warn!(error = %e, "Download failed");
            return Err(LoadFailure::NoFile {
                reason: e.to_string(),
            });
        }

        Self::parse_and_build(path, query.title())
    }

    /// Parse and build the charts from a CSV already on disk.
    pub async fn load_local(&self, path: impl AsRef<Path>, title: &str) -> LoadOutcome {
        let _guard = self.load_lock.lock().await;
        Self::parse_and_build(path.as_ref(), title.to_string())
    }

    fn parse_and_build(path: &Path, title: String) -> LoadOutcome {
        let table = SeriesParser::parse_file(path).map_err(|e| match e {
            CoreError::FileIO(reason) => LoadFailure::NoFile { reason },
            other => LoadFailure::ParseError {
                reason: other.to_string(),
            },
        })?;
        ChartService::build(title, &table)
    }
}
