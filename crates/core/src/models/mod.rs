pub mod chart;
pub mod query;
pub mod quote;
pub mod settings;
