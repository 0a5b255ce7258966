use thiserror::Error;

/// Unified error type for the entire stock-chart-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── File I/O ────────────────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("CSV error: {0}")]
    Csv(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    // ── Input / Data ────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Unknown ticker symbol: {0}")]
    UnknownTicker(String),

    #[error("Invalid number in {column} column at row {row}: '{value}'")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Query strings carry the ticker and dates; keep log lines short and
        // free of anything the caller did not ask to see.
        CoreError::Network(redact_query(&e.to_string()))
    }
}

/// Strip everything after the first `?` of a message containing a URL.
pub(crate) fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_query_strips_parameters() {
        let msg = "error sending request for url (https://x.test/A/download?startDate=1/1/2019)";
        assert_eq!(
            redact_query(msg),
            "error sending request for url (https://x.test/A/download?<query redacted>"
        );
    }

    #[test]
    fn redact_query_keeps_plain_message() {
        assert_eq!(redact_query("connection refused"), "connection refused");
    }
}
