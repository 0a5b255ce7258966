use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Minimum number of comma-separated fields a data row must carry.
pub const FIELD_COUNT: usize = 6;

/// One numeric column of the downloaded quote file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Column {
    /// The four price columns that share one value range.
    pub const PRICES: [Column; 4] = [Column::Open, Column::High, Column::Low, Column::Close];

    /// Order in which the chart tabs are presented.
    pub const TAB_ORDER: [Column; 5] = [
        Column::Close,
        Column::Open,
        Column::High,
        Column::Low,
        Column::Volume,
    ];

    /// Tab label, e.g. "Close".
    pub fn label(&self) -> &'static str {
        match self {
            Column::Open => "Open",
            Column::High => "High",
            Column::Low => "Low",
            Column::Close => "Close",
            Column::Volume => "Volume",
        }
    }

    pub fn is_price(&self) -> bool {
        !matches!(self, Column::Volume)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single CSV data line: `Date,Open,High,Low,Close,Volume`.
///
/// Fields are kept as the (trimmed) text found in the file so labels show
/// exactly what the source reported. Numbers are parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl RawRow {
    /// Build a row from the first six fields. Extra fields are ignored;
    /// fewer than six yields `None`.
    pub fn from_fields<I, S>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut it = fields.into_iter().map(|f| f.as_ref().trim().to_string());
        Some(Self {
            date: it.next()?,
            open: it.next()?,
            high: it.next()?,
            low: it.next()?,
            close: it.next()?,
            volume: it.next()?,
        })
    }

    /// Raw text of a numeric column.
    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::Open => &self.open,
            Column::High => &self.high,
            Column::Low => &self.low,
            Column::Close => &self.close,
            Column::Volume => &self.volume,
        }
    }
}

/// Parse one numeric cell. `row` is the zero-based data row index.
pub fn parse_value(raw: &str, column: Column, row: usize) -> Result<f64, CoreError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoreError::InvalidNumber {
            column: column.label().to_string(),
            row,
            value: raw.to_string(),
        })
}

/// A (date, value) pair of one series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: String,
    pub value: String,
}

/// Ordered (date, value) pairs for one column, in file order
/// (most recent first for the usual download).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    column: Column,
    points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(column: Column, points: Vec<SeriesPoint>) -> Self {
        Self { column, points }
    }

    pub fn column(&self) -> Column {
        self.column
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Numeric values in series order. Fails on the first unparseable cell.
    pub fn values(&self) -> Result<Vec<f64>, CoreError> {
        self.points
            .iter()
            .enumerate()
            .map(|(row, p)| parse_value(&p.value, self.column, row))
            .collect()
    }
}

/// All valid rows of one download, plus how many malformed rows were dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteTable {
    rows: Vec<RawRow>,
    dropped: usize,
}

impl QuoteTable {
    pub fn new(rows: Vec<RawRow>, dropped: usize) -> Self {
        Self { rows, dropped }
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of lines discarded for having fewer than [`FIELD_COUNT`] fields.
    pub fn dropped_rows(&self) -> usize {
        self.dropped
    }

    /// Project one column into a (date, value) series.
    pub fn series(&self, column: Column) -> Series {
        let points = self
            .rows
            .iter()
            .map(|r| SeriesPoint {
                date: r.date.clone(),
                value: r.field(column).to_string(),
            })
            .collect();
        Series::new(column, points)
    }

    /// Parsed values of one column across every row.
    pub fn column_values(&self, column: Column) -> Result<Vec<f64>, CoreError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, r)| parse_value(r.field(column), column, row))
            .collect()
    }
}
