use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::quote::{Column, Series};

/// Vertical extent of one chart: `top >= bottom >= 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub top: f64,
    pub bottom: f64,
}

impl ValueRange {
    /// Share of the raw span added above the maximum and below the minimum.
    pub const PADDING_RATIO: f64 = 0.05;

    /// Pad `[min, max]` by [`Self::PADDING_RATIO`] of its span, clamping the
    /// bottom at zero. An all-negative input collapses to `0..0`.
    pub fn padded(min: f64, max: f64) -> Self {
        let margin = (max - min) * Self::PADDING_RATIO;
        let bottom = (min - margin).max(0.0);
        Self {
            top: (max + margin).max(bottom),
            bottom,
        }
    }

    pub fn span(&self) -> f64 {
        self.top - self.bottom
    }

    /// `true` when every value was identical and the range collapsed to a point.
    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }
}

/// Ranges for one download: the four price columns share `price`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRanges {
    pub price: ValueRange,
    pub volume: ValueRange,
}

impl QuoteRanges {
    pub fn for_column(&self, column: Column) -> ValueRange {
        if column.is_price() {
            self.price
        } else {
            self.volume
        }
    }
}

/// A pixel position on the chart canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One tab: a series plotted against its range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTab {
    pub series: Series,
    pub range: ValueRange,
}

impl ChartTab {
    pub fn title(&self) -> &'static str {
        self.series.column().label()
    }
}

/// Everything the display layer needs for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    /// Window title, e.g. "AAPL 1/1/2019 to 3/1/2019".
    pub title: String,
    pub tabs: Vec<ChartTab>,
    /// Malformed lines skipped while parsing.
    pub dropped_rows: usize,
}

impl ChartSet {
    pub fn tab(&self, column: Column) -> Option<&ChartTab> {
        self.tabs.iter().find(|t| t.series.column() == column)
    }
}

/// Why a query produced no charts. `Display` is the text shown in place of
/// the tabs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    #[error("Load file failed")]
    NoFile { reason: String },

    #[error("No data available")]
    NoData,

    #[error("Malformed data")]
    ParseError { reason: String },
}

impl LoadFailure {
    /// Underlying cause, when there is one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            LoadFailure::NoFile { reason } | LoadFailure::ParseError { reason } => Some(reason),
            LoadFailure::NoData => None,
        }
    }
}

/// Result of one fetch-parse-build cycle.
pub type LoadOutcome = Result<ChartSet, LoadFailure>;
