//! Where the raw sheet text comes from
//!
//! One blocking request, no retries. Any failure is returned before parsing
//! starts, so a failed fetch never yields a partial dataset.

use std::path::PathBuf;

use tracing::debug;

use super::Source;
use crate::error::FetchError;

/// CSV export served over HTTP
#[derive(Debug, Clone)]
pub(crate) struct SheetSource {
    url: String,
}

impl SheetSource {
    pub(crate) fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Source for SheetSource {
    fn name(&self) -> &'static str {
        "sheet"
    }

    fn location(&self) -> String {
        self.url.clone()
    }

    fn read_text(&self) -> Result<String, FetchError> {
        debug!(url = %self.url, "fetching sheet export");
        let response = ureq::get(self.url.as_str())
            .call()
            .map_err(|err| match err {
                ureq::Error::StatusCode(code) => FetchError::Status {
                    url: self.url.clone(),
                    code,
                },
                other => FetchError::Transport {
                    url: self.url.clone(),
                    source: other,
                },
            })?;

        response
            .into_body()
            .read_to_string()
            .map_err(|source| FetchError::Body {
                url: self.url.clone(),
                source,
            })
    }
}

/// A local copy of the export
#[derive(Debug, Clone)]
pub(crate) struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read_text(&self) -> Result<String, FetchError> {
        debug!(path = %self.path.display(), "reading sheet file");
        std::fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
