//! Data source layer
//!
//! A source yields the raw export text; the parser turns it into records.

pub(crate) mod fetcher;
pub(crate) mod loader;
pub(crate) mod parser;

use crate::error::FetchError;

/// Something that can produce the sheet export as text
pub(crate) trait Source {
    /// Short name used in log fields
    fn name(&self) -> &'static str;

    /// URL or path, for messages
    fn location(&self) -> String;

    fn read_text(&self) -> Result<String, FetchError>;
}

pub(crate) use fetcher::{FileSource, SheetSource};
pub(crate) use loader::{LoadResult, load_records};
