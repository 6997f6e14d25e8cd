//! Core module - the analytics engine
//!
//! Parsed records flow through filter, aggregation, comparison and sorting.
//! Every step is a pure function over its inputs.

mod aggregator;
mod compare;
mod filter;
mod metrics;
mod pipeline;
mod sort;
mod types;

pub(crate) use aggregator::CostShare;
pub(crate) use compare::{Metric, PercentChange, ProductComparison, TotalsComparison};
pub(crate) use filter::{DateRange, ProductSelection};
pub(crate) use pipeline::{
    Analysis, AnalysisConfig, ComparisonMode, analyze, date_bounds, product_catalog,
};
pub(crate) use sort::{
    FieldValue, RecordField, SortDirection, SortSpec, SummaryField, UnknownField, project_row,
};
pub(crate) use types::{AdRecord, ParseResult, RawRecord, Totals};
