//! Date range and product selection over parsed records

use std::collections::HashSet;

use crate::core::types::AdRecord;

/// Inclusive date window over canonical YYYY-MM-DD strings
///
/// Bounds compare lexicographically, which matches chronological order for
/// canonical dates. A missing bound imposes no constraint on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DateRange {
    pub(crate) start: Option<String>,
    pub(crate) end: Option<String>,
}

impl DateRange {
    pub(crate) fn new(start: Option<String>, end: Option<String>) -> Self {
        Self { start, end }
    }

    /// Move the start bound, pulling the end along if it would fall behind
    pub(crate) fn with_start(mut self, start: String) -> Self {
        if let Some(end) = &self.end
            && start > *end
        {
            self.end = Some(start.clone());
        }
        self.start = Some(start);
        self
    }

    /// Move the end bound, pulling the start along if it would run ahead
    pub(crate) fn with_end(mut self, end: String) -> Self {
        if let Some(start) = &self.start
            && end < *start
        {
            self.start = Some(end.clone());
        }
        self.end = Some(end);
        self
    }

    pub(crate) fn contains(&self, date: &str) -> bool {
        if let Some(s) = &self.start
            && date < s.as_str()
        {
            return false;
        }
        if let Some(e) = &self.end
            && date > e.as_str()
        {
            return false;
        }
        true
    }
}

/// Product membership; empty means every product passes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ProductSelection(HashSet<String>);

impl ProductSelection {
    pub(crate) fn all() -> Self {
        Self::default()
    }

    pub(crate) fn contains(&self, product: &str) -> bool {
        self.0.is_empty() || self.0.contains(product)
    }
}

impl<S: Into<String>> FromIterator<S> for ProductSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Everything a single filtering pass needs
#[derive(Debug, Clone, Copy)]
pub(crate) struct RecordFilter<'a> {
    pub(crate) range: &'a DateRange,
    pub(crate) products: &'a ProductSelection,
}

impl RecordFilter<'_> {
    pub(crate) fn matches(&self, record: &AdRecord) -> bool {
        self.range.contains(&record.date) && self.products.contains(&record.product)
    }
}

/// Select matching records, preserving input order
pub(crate) fn filter_records<'r, R>(records: R, filter: &RecordFilter<'_>) -> Vec<&'r AdRecord>
where
    R: IntoIterator<Item = &'r AdRecord>,
{
    records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect()
}
