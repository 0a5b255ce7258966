use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::errors::CoreError;

/// A selectable security: ticker symbol plus display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerInfo {
    pub symbol: &'static str,
    pub name: &'static str,
}

/// Securities offered for selection.
pub const TICKERS: [TickerInfo; 16] = [
    TickerInfo { symbol: "A", name: "Agilent Technologies" },
    TickerInfo { symbol: "AAPL", name: "Apple Inc." },
    TickerInfo { symbol: "BRK.A", name: "Berkshire Hathaway" },
    TickerInfo { symbol: "C", name: "Citigroup" },
    TickerInfo { symbol: "GOOG", name: "Alphabet Inc." },
    TickerInfo { symbol: "HOG", name: "Harley-Davidson Inc." },
    TickerInfo { symbol: "HPQ", name: "Hewlett-Packard" },
    TickerInfo { symbol: "INTC", name: "Intel" },
    TickerInfo { symbol: "KO", name: "The Coca-Cola Company" },
    TickerInfo { symbol: "LUV", name: "Southwest Airlines" },
    TickerInfo { symbol: "MMM", name: "3M" },
    TickerInfo { symbol: "MSFT", name: "Microsoft" },
    TickerInfo { symbol: "T", name: "AT&T" },
    TickerInfo { symbol: "TGT", name: "Target Corporation" },
    TickerInfo { symbol: "TXN", name: "Texas Instruments" },
    TickerInfo { symbol: "WMT", name: "Walmart" },
];

/// Years offered by the date pickers.
pub const SELECTABLE_YEARS: RangeInclusive<i32> = 2008..=2019;

/// Look up a ticker by symbol (case-insensitive).
pub fn find_ticker(symbol: &str) -> Option<&'static TickerInfo> {
    let upper = symbol.trim().to_uppercase();
    TICKERS.iter().find(|t| t.symbol == upper)
}

/// Number of days in a month, or `None` for an invalid year/month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

/// `M/D/YYYY` without zero padding, e.g. `1/2/2019`.
pub fn format_query_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Parse `M/D/YYYY` (zero padding optional).
pub fn parse_query_date(s: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(s.trim(), "%m/%d/%Y").map_err(|e| {
        CoreError::ValidationError(format!("Invalid date '{s}' (expected M/D/YYYY): {e}"))
    })
}

/// An immutable request for one ticker over a date range.
///
/// Built once when the user submits and passed by value into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteQuery {
    ticker: String,
    start: NaiveDate,
    end: NaiveDate,
}

impl QuoteQuery {
    /// Build a query for a ticker from [`TICKERS`].
    pub fn new(ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        let info = find_ticker(ticker).ok_or_else(|| CoreError::UnknownTicker(ticker.to_string()))?;
        Ok(Self::unchecked(info.symbol, start, end))
    }

    /// Build a query for any symbol. The date order is not checked either.
    pub fn unchecked(ticker: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            ticker: ticker.into().trim().to_uppercase(),
            start,
            end,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Chart window title, e.g. "AAPL 1/1/2019 to 3/1/2019".
    pub fn title(&self) -> String {
        format!(
            "{} {} to {}",
            self.ticker,
            format_query_date(self.start),
            format_query_date(self.end)
        )
    }
}
