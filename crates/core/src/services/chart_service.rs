use tracing::info;

use crate::models::chart::{ChartSet, ChartTab, LoadFailure, LoadOutcome};
use crate::models::quote::{Column, QuoteTable};
use crate::services::range_service::compute_ranges;

/// Turns a parsed quote table into the chart set shown to the user.
///
/// The core computes every range; the display layer only picks between the
/// tabs and the failure message.
pub struct ChartService;

impl ChartService {
    /// Build the five tabs (Close, Open, High, Low, Volume) for `table`.
    ///
    /// - Zero rows → `LoadFailure::NoData`.
    /// - Any unparseable number → `LoadFailure::ParseError`.
    pub fn build(title: impl Into<String>, table: &QuoteTable) -> LoadOutcome {
        if table.is_empty() {
            return Err(LoadFailure::NoData);
        }

        let ranges = compute_ranges(table).map_err(|e| LoadFailure::ParseError {
            reason: e.to_string(),
        })?;

        let tabs = Column::TAB_ORDER
            .iter()
            .map(|&column| ChartTab {
                series: table.series(column),
                range: ranges.for_column(column),
            })
            .collect();

        let title = title.into();
        info!(
            title = %title,
            rows = table.len(),
            price_top = ranges.price.top,
            price_bottom = ranges.price.bottom,
            "Chart set ready"
        );

        Ok(ChartSet {
            title,
            tabs,
            dropped_rows: table.dropped_rows(),
        })
    }
}
