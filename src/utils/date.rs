use chrono::NaiveDate;

use crate::consts::DATE_FORMAT;
use crate::error::AppError;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    let s = s.trim();
    // Try YYYYMMDD
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Ok(d);
    }
    // Try YYYY-MM-DD
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// Parse a date argument into the canonical form records are keyed by
pub(crate) fn canonical_date_arg(s: Option<&str>) -> Result<Option<String>, AppError> {
    s.map(|s| parse_date(s).map(|d| d.format(DATE_FORMAT).to_string()))
        .transpose()
}
