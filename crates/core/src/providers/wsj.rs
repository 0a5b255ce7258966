use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, Url};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::errors::{redact_query, CoreError};
use crate::models::query::{format_query_date, QuoteQuery};
use crate::models::settings::Settings;
use super::traits::QuoteSource;

const PROVIDER: &str = "WSJ Markets";

/// Historical-prices CSV download from the WSJ quotes site.
///
/// - **Free**: No API key required.
/// - **Format**: `Date, Open, High, Low, Close, Volume` with one header line,
///   most recent day first.
/// - **Redirects**: automatic redirects are disabled. A `Location` header on
///   the first response is followed exactly once; a second `Location` is
///   left alone and that response body is what gets written.
pub struct WsjCsvSource {
    client: Client,
    base_url: String,
    num_rows: u32,
}

impl WsjCsvSource {
    pub fn new(base_url: impl Into<String>, num_rows: u32, timeout: Duration) -> Result<Self, CoreError> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            num_rows,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        Self::new(
            settings.base_url.clone(),
            settings.num_rows,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// Full download URL for a query. Dates are embedded as `M/D/YYYY`.
    pub fn download_url(&self, query: &QuoteQuery) -> String {
        format!(
            "{}/{}/historical-prices/download?MOD_VIEW=page&num_rows={}&startDate={}&endDate={}",
            self.base_url,
            query.ticker(),
            self.num_rows,
            format_query_date(query.start()),
            format_query_date(query.end()),
        )
    }
}

#[async_trait]
impl QuoteSource for WsjCsvSource {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn download(&self, query: &QuoteQuery, dest: &Path) -> Result<u64, CoreError> {
        let url = self.download_url(query);
        info!(ticker = query.ticker(), "Requesting historical prices");

        let mut response = self.client.get(&url).send().await?;
        if let Some(location) = redirect_target(&response)? {
            debug!(location = %redact_query(location.as_str()), "Following redirect");
            response = self.client.get(location).send().await?;
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(CoreError::Http {
                status: status.as_u16(),
                url: redact_query(response.url().as_str()),
            });
        }

        let written = write_body(response, dest).await?;
        info!(
            ticker = query.ticker(),
            bytes = written,
            path = %dest.display(),
            "Download complete"
        );
        Ok(written)
    }
}

/// Resolve the `Location` header of a response, relative to its URL.
fn redirect_target(response: &Response) -> Result<Option<Url>, CoreError> {
    let Some(value) = response.headers().get(LOCATION) else {
        return Ok(None);
    };
    let location = value.to_str().map_err(|e| CoreError::Api {
        provider: PROVIDER.into(),
        message: format!("Unreadable redirect location: {e}"),
    })?;
    response
        .url()
        .join(location)
        .map(Some)
        .map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Invalid redirect location '{}': {e}", redact_query(location)),
        })
}

/// Stream the body into `dest`, creating or truncating it first.
async fn write_body(mut response: Response, dest: &Path) -> Result<u64, CoreError> {
    let mut file = tokio::fs::File::create(dest).await?;
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
