//! Core data types shared by the parser, the engine and the renderers
//!
//! Records are immutable once parsed. Summaries and totals are rebuilt from
//! records on every analysis pass.

use serde::Serialize;

use crate::core::metrics::per_order;

/// One sheet row after column mapping, before any derivation
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RawRecord {
    /// Canonical date (YYYY-MM-DD) or the untouched input when it was not D/M/YYYY
    pub(crate) date: String,
    pub(crate) product: String,
    pub(crate) ad_cost: f64,
    pub(crate) revenue: f64,
    pub(crate) orders: f64,
    pub(crate) operating_cost: f64,
}

/// A raw row plus its computed financial ratios
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct AdRecord {
    pub(crate) date: String,
    pub(crate) product: String,
    pub(crate) ad_cost: f64,
    pub(crate) revenue: f64,
    pub(crate) orders: f64,
    pub(crate) operating_cost: f64,
    pub(crate) profit: f64,
    pub(crate) profit_margin: f64,
    pub(crate) ad_cost_per_order: f64,
    pub(crate) profit_per_order: f64,
}

/// Summed absolute metrics over a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Totals {
    pub(crate) ad_cost: f64,
    pub(crate) revenue: f64,
    pub(crate) profit: f64,
    pub(crate) orders: f64,
    pub(crate) operating_cost: f64,
}

impl Totals {
    pub(crate) fn add(&mut self, record: &AdRecord) {
        self.ad_cost += record.ad_cost;
        self.revenue += record.revenue;
        self.profit += record.profit;
        self.orders += record.orders;
        self.operating_cost += record.operating_cost;
    }

    pub(crate) fn ad_cost_per_order(&self) -> f64 {
        per_order(self.ad_cost, self.orders)
    }

    pub(crate) fn profit_per_order(&self) -> f64 {
        per_order(self.profit, self.orders)
    }
}

/// Per-product aggregate within one period
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProductSummary {
    pub(crate) product: String,
    pub(crate) totals: Totals,
    /// Summed ad cost over summed orders, never an average of row ratios
    pub(crate) ad_cost_per_order: f64,
    pub(crate) profit_per_order: f64,
}

impl ProductSummary {
    pub(crate) fn from_totals(product: String, totals: Totals) -> Self {
        ProductSummary {
            product,
            ad_cost_per_order: totals.ad_cost_per_order(),
            profit_per_order: totals.profit_per_order(),
            totals,
        }
    }
}

/// Aggregation result for one period
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Aggregate {
    pub(crate) totals: Totals,
    /// In order of first appearance
    pub(crate) by_product: Vec<ProductSummary>,
}

/// Parser output with the number of rows dropped as malformed
#[derive(Debug, Default)]
pub(crate) struct ParseResult {
    pub(crate) records: Vec<AdRecord>,
    pub(crate) skipped: usize,
}
