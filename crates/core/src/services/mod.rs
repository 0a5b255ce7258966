pub mod chart_service;
pub mod range_service;
pub mod series_parser;
