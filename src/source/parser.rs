//! Sheet export parser
//!
//! Turns the CSV export into derived records. Rows that cannot be used are
//! skipped and logged; nothing in here fails the caller.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::consts::{
    COL_AD_COST, COL_DATE, COL_OPERATING_COST, COL_ORDERS, COL_PRODUCT, COL_REVENUE, MIN_FIELDS,
};
use crate::core::{AdRecord, ParseResult, RawRecord};

/// Parse a number written with `.` grouping and `,` decimals
///
/// Only the leading numeric part is used, so trailing units are ignored.
/// Anything without a leading number reads as 0.
pub(crate) fn parse_locale_number(raw: &str) -> f64 {
    let normalized = raw.trim().replace('.', "").replacen(',', ".", 1);
    match numeric_prefix(&normalized).parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            if !raw.trim().is_empty() {
                debug!(value = raw, "unparseable number, using 0");
            }
            0.0
        }
    }
}

/// Longest prefix of the form `[+-]digits[.digits]`
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if has_digits || frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }

    if has_digits { &s[..end] } else { "" }
}

/// `D/M/YYYY` to `YYYY-MM-DD`; any other shape passes through untouched
pub(crate) fn canonical_date(raw: &str) -> String {
    let parts: Vec<&str> = raw.split('/').collect();
    match parts.as_slice() {
        [day, month, year] => format!("{year}-{month:0>2}-{day:0>2}"),
        _ => {
            debug!(value = raw, "date not in D/M/YYYY form, keeping as is");
            raw.to_string()
        }
    }
}

fn strip_quotes(field: &str) -> &str {
    let field = field.strip_prefix('"').unwrap_or(field);
    field.strip_suffix('"').unwrap_or(field)
}

fn parse_row(row: &StringRecord) -> Option<RawRecord> {
    if row.len() < MIN_FIELDS {
        return None;
    }
    let field = |idx: usize| strip_quotes(row.get(idx).unwrap_or_default());

    Some(RawRecord {
        date: canonical_date(field(COL_DATE)),
        product: field(COL_PRODUCT).to_string(),
        ad_cost: parse_locale_number(field(COL_AD_COST)),
        revenue: parse_locale_number(field(COL_REVENUE)),
        orders: parse_locale_number(field(COL_ORDERS)),
        operating_cost: parse_locale_number(field(COL_OPERATING_COST)),
    })
}

/// Read one physical line as a CSV record
///
/// Each line gets its own reader so an unbalanced quote cannot swallow the
/// lines after it.
fn read_line(line: &str) -> Result<Option<StringRecord>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());
    let mut row = StringRecord::new();
    Ok(reader.read_record(&mut row)?.then_some(row))
}

/// Parse the whole export: one header line, then one record per line
pub(crate) fn parse_sheet(text: &str) -> ParseResult {
    let text = text.trim();
    if text.is_empty() {
        debug!("empty sheet, no header line");
        return ParseResult::default();
    }

    let mut result = ParseResult::default();
    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            debug!(line = line_no, "skipping blank line");
            continue;
        }

        let row = match read_line(line) {
            Ok(Some(row)) => row,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = line_no, %err, "skipping unreadable row");
                result.skipped += 1;
                continue;
            }
        };

        match parse_row(&row) {
            Some(raw) => result.records.push(AdRecord::derive(raw)),
            None => {
                warn!(
                    line = line_no,
                    fields = row.len(),
                    row = line,
                    "skipping malformed row"
                );
                result.skipped += 1;
            }
        }
    }

    debug!(
        records = result.records.len(),
        skipped = result.skipped,
        "parsed sheet"
    );
    result
}
