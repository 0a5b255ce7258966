pub mod traits;

// Quote source implementations
pub mod wsj;
