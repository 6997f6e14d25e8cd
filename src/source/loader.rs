//! Fetch and parse in one step

use std::time::Instant;

use tracing::info;

use crate::core::AdRecord;
use crate::error::FetchError;
use crate::source::Source;
use crate::source::parser::parse_sheet;

/// Parsed dataset plus what the summary line reports
#[derive(Debug, Clone, Default)]
pub(crate) struct LoadResult {
    pub(crate) records: Vec<AdRecord>,
    pub(crate) skipped: usize,
    pub(crate) elapsed_ms: f64,
}

/// Read the whole sheet from `source` and parse it
///
/// Fails only when the text cannot be obtained; malformed rows are counted in
/// `skipped` instead.
pub(crate) fn load_records(source: &dyn Source) -> Result<LoadResult, FetchError> {
    let start = Instant::now();
    let text = source.read_text()?;
    let parsed = parse_sheet(&text);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    info!(
        source = source.name(),
        location = %source.location(),
        records = parsed.records.len(),
        skipped = parsed.skipped,
        elapsed_ms,
        "loaded sheet"
    );

    Ok(LoadResult {
        records: parsed.records,
        skipped: parsed.skipped,
        elapsed_ms,
    })
}
