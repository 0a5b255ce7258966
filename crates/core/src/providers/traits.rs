use async_trait::async_trait;
use std::path::Path;

use crate::errors::CoreError;
use crate::models::query::QuoteQuery;

/// Trait abstraction for historical quote downloads.
///
/// A source writes the raw CSV for a query to `dest`, replacing whatever was
/// there. Parsing is not its concern.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Download the quote file for `query` into `dest`.
    /// Returns the number of bytes written.
    ///
    /// On failure part-way through, `dest` may hold a truncated file.
    async fn download(&self, query: &QuoteQuery, dest: &Path) -> Result<u64, CoreError>;
}
