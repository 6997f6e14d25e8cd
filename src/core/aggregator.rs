//! Per-product and whole-period aggregation
//!
//! Absolute metrics are summed first; per-order ratios are computed from the
//! sums afterwards.

use std::collections::HashMap;

use crate::core::types::{AdRecord, Aggregate, ProductSummary, Totals};

/// Aggregate a filtered record set into period totals and product summaries
pub(crate) fn aggregate(records: &[&AdRecord]) -> Aggregate {
    let mut totals = Totals::default();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Totals)> = Vec::new();

    for record in records {
        totals.add(record);
        let slot = *index.entry(record.product.as_str()).or_insert_with(|| {
            groups.push((record.product.as_str(), Totals::default()));
            groups.len() - 1
        });
        groups[slot].1.add(record);
    }

    let by_product = groups
        .into_iter()
        .map(|(product, sums)| ProductSummary::from_totals(product.to_string(), sums))
        .collect();

    Aggregate { totals, by_product }
}

/// One product's slice of the period's ad spend
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CostShare {
    pub(crate) product: String,
    pub(crate) ad_cost: f64,
    /// Percent of total ad cost, 0 when nothing was spent
    pub(crate) percent: f64,
}

pub(crate) fn ad_cost_share(summaries: &[ProductSummary]) -> Vec<CostShare> {
    let total: f64 = summaries.iter().map(|s| s.totals.ad_cost).sum();
    summaries
        .iter()
        .map(|s| CostShare {
            product: s.product.clone(),
            ad_cost: s.totals.ad_cost,
            percent: if total > 0.0 {
                s.totals.ad_cost / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}
