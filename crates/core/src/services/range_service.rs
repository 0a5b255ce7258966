use crate::errors::CoreError;
use crate::models::chart::{QuoteRanges, ValueRange};
use crate::models::quote::{Column, QuoteTable};

/// Padded range of a set of values, or `None` when there are none.
pub fn padded_range<I>(values: I) -> Option<ValueRange>
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values.into_iter().fold(None, |acc: Option<(f64, f64)>, v| {
        Some(match acc {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        })
    })?;
    Some(ValueRange::padded(min, max))
}

/// Compute the shared price range (over open, high, low and close) and the
/// separate volume range for a table.
///
/// An empty table yields zero-height ranges at 0.
pub fn compute_ranges(table: &QuoteTable) -> Result<QuoteRanges, CoreError> {
    let mut prices = Vec::with_capacity(table.len() * Column::PRICES.len());
    for column in Column::PRICES {
        prices.extend(table.column_values(column)?);
    }
    let volumes = table.column_values(Column::Volume)?;

    Ok(QuoteRanges {
        price: padded_range(prices).unwrap_or_default(),
        volume: padded_range(volumes).unwrap_or_default(),
    })
}
