use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Unknown {table} column \"{input}\" (expected one of: {expected})")]
    UnknownField {
        input: String,
        table: &'static str,
        expected: String,
    },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("{0}")]
    Fetch(#[from] FetchError),
}

/// Failure to obtain the raw sheet text; nothing is parsed when this occurs
#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("Request to {url} failed with HTTP status {code}")]
    Status { url: String, code: u16 },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("Failed to read response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
