// ═══════════════════════════════════════════════════════════════════
// Model Tests: QuoteQuery, ticker catalogue, Settings, ranges
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::collections::HashSet;

use stock_chart_core::errors::CoreError;
use stock_chart_core::models::chart::{ChartSet, ChartTab, ValueRange};
use stock_chart_core::models::query::{
    days_in_month, find_ticker, format_query_date, parse_query_date, QuoteQuery,
    SELECTABLE_YEARS, TICKERS,
};
use stock_chart_core::models::quote::{Column, QuoteTable, RawRow};
use stock_chart_core::models::settings::{ChartGeometry, Rgb, Settings};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Ticker catalogue
// ═══════════════════════════════════════════════════════════════════

mod tickers {
    use super::*;

    #[test]
    fn catalogue_has_sixteen_unique_symbols() {
        let symbols: HashSet<_> = TICKERS.iter().map(|t| t.symbol).collect();
        assert_eq!(TICKERS.len(), 16);
        assert_eq!(symbols.len(), 16);
    }

    #[test]
    fn find_is_case_insensitive() {
        let t = find_ticker("brk.a").unwrap();
        assert_eq!(t.symbol, "BRK.A");
        assert_eq!(t.name, "Berkshire Hathaway");
    }

    #[test]
    fn find_unknown_symbol() {
        assert!(find_ticker("TSLA").is_none());
    }

    #[test]
    fn first_entry_is_default_selection() {
        assert_eq!(TICKERS[0].symbol, "A");
        assert_eq!(TICKERS[0].name, "Agilent Technologies");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Dates
// ═══════════════════════════════════════════════════════════════════

mod dates {
    use super::*;

    #[test]
    fn format_has_no_zero_padding() {
        assert_eq!(format_query_date(d(2019, 1, 2)), "1/2/2019");
        assert_eq!(format_query_date(d(2018, 12, 31)), "12/31/2018");
    }

    #[test]
    fn parse_accepts_padded_and_unpadded() {
        assert_eq!(parse_query_date("1/2/2019").unwrap(), d(2019, 1, 2));
        assert_eq!(parse_query_date("01/02/2019").unwrap(), d(2019, 1, 2));
    }

    #[test]
    fn parse_rejects_impossible_day() {
        let err = parse_query_date("2/30/2019").unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn days_in_month_follows_calendar() {
        assert_eq!(days_in_month(2012, 2), Some(29));
        assert_eq!(days_in_month(2019, 4), Some(30));
        assert_eq!(days_in_month(2019, 0), None);
    }

    #[test]
    fn selectable_years() {
        assert_eq!(*SELECTABLE_YEARS.start(), 2008);
        assert_eq!(*SELECTABLE_YEARS.end(), 2019);
    }
}

// ═══════════════════════════════════════════════════════════════════
// QuoteQuery
// ═══════════════════════════════════════════════════════════════════

mod quote_query {
    use super::*;

    #[test]
    fn new_normalizes_symbol() {
        let q = QuoteQuery::new("aapl", d(2019, 1, 1), d(2019, 3, 1)).unwrap();
        assert_eq!(q.ticker(), "AAPL");
        assert_eq!(q.start(), d(2019, 1, 1));
        assert_eq!(q.end(), d(2019, 3, 1));
    }

    #[test]
    fn new_rejects_unlisted_symbol() {
        let err = QuoteQuery::new("TSLA", d(2019, 1, 1), d(2019, 3, 1)).unwrap_err();
        match err {
            CoreError::UnknownTicker(s) => assert_eq!(s, "TSLA"),
            other => panic!("Expected UnknownTicker, got {:?}", other),
        }
    }

    #[test]
    fn unchecked_accepts_anything() {
        let q = QuoteQuery::unchecked(" tsla ", d(2019, 3, 1), d(2019, 1, 1));
        assert_eq!(q.ticker(), "TSLA");
        assert!(q.start() > q.end());
    }

    #[test]
    fn title_matches_window_caption() {
        let q = QuoteQuery::new("MSFT", d(2019, 1, 1), d(2019, 3, 15)).unwrap();
        assert_eq!(q.title(), "MSFT 1/1/2019 to 3/15/2019");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.base_url, "https://quotes.wsj.com");
        assert_eq!(s.num_rows, 90);
        assert_eq!(s.download_path.to_str(), Some("./temp.csv"));
        assert_eq!(s.geometry.width, 1280);
        assert_eq!(s.geometry.height, 720);
        assert_eq!(s.geometry.padding, 50);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn geometry_edges() {
        let g = ChartGeometry::default();
        assert_eq!((g.left(), g.right()), (50, 1230));
        assert_eq!((g.top(), g.bottom()), (50, 670));
        assert_eq!((g.plot_width(), g.plot_height()), (1180, 620));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "num_rows": 30, "geometry": { "width": 800 } }"#).unwrap();

        let s = Settings::load_from_file(&path).unwrap();
        assert_eq!(s.num_rows, 30);
        assert_eq!(s.geometry.width, 800);
        assert_eq!(s.geometry.height, 720);
        assert_eq!(s.base_url, "https://quotes.wsj.com");
    }

    #[test]
    fn invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            Settings::load_from_file(&path),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Settings::load_from_file("/no/such/settings.json"),
            Err(CoreError::FileIO(_))
        ));
    }

    #[test]
    fn validate_rejects_padding_larger_than_canvas() {
        let mut s = Settings::default();
        s.geometry.width = 100;
        assert!(matches!(s.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn validate_rejects_zero_rows() {
        let s = Settings {
            num_rows: 0,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rgb_hex() {
        assert_eq!(Rgb::GRID.to_hex(), "#d7d7d7");
        assert_eq!(Rgb::WHITE.to_hex(), "#ffffff");
    }
}

// ═══════════════════════════════════════════════════════════════════
// ValueRange / ChartSet
// ═══════════════════════════════════════════════════════════════════

mod chart_models {
    use super::*;

    #[test]
    fn padded_adds_five_percent_each_side() {
        let r = ValueRange::padded(95.0, 105.0);
        assert!((r.top - 105.5).abs() < 1e-9);
        assert!((r.bottom - 94.5).abs() < 1e-9);
        assert!(!r.is_degenerate());
    }

    #[test]
    fn padded_clamps_bottom_at_zero() {
        let r = ValueRange::padded(1.0, 100.0);
        assert_eq!(r.bottom, 0.0);
    }

    #[test]
    fn negative_values_keep_top_above_bottom() {
        let r = ValueRange::padded(-20.0, -10.0);
        assert_eq!(r, ValueRange { top: 0.0, bottom: 0.0 });

        let r = ValueRange::padded(-5.0, 1.0);
        assert_eq!(r.bottom, 0.0);
        assert!((r.top - 1.3).abs() < 1e-9);
        assert!(r.top >= r.bottom);
    }

    #[test]
    fn single_value_is_degenerate() {
        let r = ValueRange::padded(100.0, 100.0);
        assert_eq!(r.top, 100.0);
        assert_eq!(r.bottom, 100.0);
        assert!(r.is_degenerate());
    }

    #[test]
    fn chart_set_tab_lookup() {
        let row = RawRow::from_fields(["1/2/2019", "1", "2", "0.5", "1.5", "10"]).unwrap();
        let table = QuoteTable::new(vec![row], 0);
        let set = ChartSet {
            title: "X".into(),
            tabs: vec![ChartTab {
                series: table.series(Column::Volume),
                range: ValueRange::default(),
            }],
            dropped_rows: 0,
        };
        assert_eq!(set.tab(Column::Volume).unwrap().title(), "Volume");
        assert!(set.tab(Column::Close).is_none());
    }
}
