//! The full analysis pass: filter, aggregate and compare both periods
//!
//! Everything here is a pure function of the parsed dataset and an
//! [`AnalysisConfig`]; nothing is cached between calls.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::consts::DATE_FORMAT;
use crate::core::aggregator::{CostShare, ad_cost_share, aggregate};
use crate::core::compare::{ProductComparison, TotalsComparison, compare_products};
use crate::core::filter::{DateRange, ProductSelection, RecordFilter, filter_records};
use crate::core::sort::{RecordField, SortDirection, SortSpec, SummaryField, sort_by_field};
use crate::core::types::AdRecord;

/// How the comparison period is chosen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum ComparisonMode {
    #[default]
    Off,
    /// Window of equal length immediately before the primary range
    Auto,
    Explicit(DateRange),
}

/// Immutable selection state for one analysis pass
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AnalysisConfig {
    pub(crate) range: DateRange,
    pub(crate) products: ProductSelection,
    pub(crate) comparison: ComparisonMode,
    pub(crate) record_sort: SortSpec<RecordField>,
    pub(crate) summary_sort: SortSpec<SummaryField>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            range: DateRange::default(),
            products: ProductSelection::all(),
            comparison: ComparisonMode::Off,
            record_sort: SortSpec::new(RecordField::Date, SortDirection::Desc),
            summary_sort: SortSpec::new(SummaryField::Profit, SortDirection::Desc),
        }
    }
}

/// Everything a report needs from one pass
#[derive(Debug, Clone)]
pub(crate) struct Analysis<'a> {
    /// Primary-period rows in `record_sort` order
    pub(crate) records: Vec<&'a AdRecord>,
    pub(crate) totals: TotalsComparison,
    /// Primary-period products in order of first appearance
    pub(crate) products: Vec<ProductComparison>,
    pub(crate) comparison_range: Option<DateRange>,
    pub(crate) cost_share: Vec<CostShare>,
    summary_sort: SortSpec<SummaryField>,
}

impl Analysis<'_> {
    pub(crate) fn sorted_products(&self) -> Vec<&ProductComparison> {
        sort_by_field(&self.products, self.summary_sort)
    }
}

/// The window of equal length that ends the day before `range` starts
///
/// The length is the inclusive day count of `range`; the window then spans
/// from `start - (length + 1)` to `start - 1` days. Both bounds must be
/// canonical dates.
pub(crate) fn preceding_window(range: &DateRange) -> Option<DateRange> {
    let start = parse_canonical(range.start.as_deref()?)?;
    let end = parse_canonical(range.end.as_deref()?)?;
    let span = (end - start).num_days().abs() + 1;

    let prev_end = start - Duration::days(1);
    let prev_start = prev_end - Duration::days(span);

    Some(DateRange::new(
        Some(prev_start.format(DATE_FORMAT).to_string()),
        Some(prev_end.format(DATE_FORMAT).to_string()),
    ))
}

fn parse_canonical(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

impl ComparisonMode {
    fn resolve(&self, primary: &DateRange) -> Option<DateRange> {
        match self {
            ComparisonMode::Off => None,
            ComparisonMode::Explicit(range) => Some(range.clone()),
            ComparisonMode::Auto => Some(preceding_window(primary).unwrap_or_else(|| {
                tracing::warn!(
                    ?primary,
                    "cannot derive comparison window without both primary dates, comparing against all dates"
                );
                DateRange::default()
            })),
        }
    }
}

pub(crate) fn analyze<'a>(records: &'a [AdRecord], config: &AnalysisConfig) -> Analysis<'a> {
    let primary_rows = filter_records(
        records,
        &RecordFilter {
            range: &config.range,
            products: &config.products,
        },
    );
    let primary = aggregate(&primary_rows);

    let comparison_range = config.comparison.resolve(&config.range);
    let comparison = comparison_range.as_ref().map(|range| {
        let rows = filter_records(
            records,
            &RecordFilter {
                range,
                products: &config.products,
            },
        );
        aggregate(&rows)
    });

    tracing::debug!(
        rows = primary_rows.len(),
        products = primary.by_product.len(),
        comparing = comparison.is_some(),
        "analysis pass"
    );

    let cost_share = ad_cost_share(&primary.by_product);
    let (comparison_totals, comparison_products) = match comparison {
        Some(agg) => (Some(agg.totals), agg.by_product),
        None => (None, Vec::new()),
    };

    let sorted_rows = sort_by_field(&primary_rows, config.record_sort)
        .into_iter()
        .copied()
        .collect();

    Analysis {
        records: sorted_rows,
        totals: TotalsComparison {
            primary: primary.totals,
            comparison: comparison_totals,
        },
        products: compare_products(primary.by_product, comparison_products),
        comparison_range,
        cost_share,
        summary_sort: config.summary_sort,
    }
}

/// Earliest and latest date in the whole dataset
pub(crate) fn date_bounds(records: &[AdRecord]) -> Option<(String, String)> {
    let min = records.iter().map(|r| r.date.as_str()).min()?;
    let max = records.iter().map(|r| r.date.as_str()).max()?;
    Some((min.to_string(), max.to_string()))
}

/// Distinct product names, sorted
pub(crate) fn product_catalog(records: &[AdRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.product.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
