//! Period-over-period comparison

use std::collections::HashMap;
use std::fmt;

use crate::core::types::{ProductSummary, Totals};

/// Signed percentage change, or the "new" marker when there was no baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PercentChange {
    Change(f64),
    /// Previous value was zero and the current one is positive
    New,
}

impl PercentChange {
    pub(crate) fn value(self) -> Option<f64> {
        match self {
            PercentChange::Change(v) => Some(v),
            PercentChange::New => None,
        }
    }
}

impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentChange::New => write!(f, "new"),
            PercentChange::Change(v) if *v == 0.0 => write!(f, "-"),
            PercentChange::Change(v) if *v > 0.0 => write!(f, "▲ {:.1}%", v),
            PercentChange::Change(v) => write!(f, "▼ {:.1}%", v.abs()),
        }
    }
}

pub(crate) fn percent_change(current: f64, previous: f64) -> PercentChange {
    if previous == 0.0 {
        return if current > 0.0 {
            PercentChange::New
        } else {
            PercentChange::Change(0.0)
        };
    }
    PercentChange::Change((current - previous) / previous * 100.0)
}

/// Headline metrics a comparison can be asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Metric {
    Revenue,
    AdCost,
    OperatingCost,
    Profit,
    Orders,
    AdCostPerOrder,
    ProfitPerOrder,
}

impl Metric {
    pub(crate) const HEADLINE: [Metric; 5] = [
        Metric::Revenue,
        Metric::AdCost,
        Metric::OperatingCost,
        Metric::Profit,
        Metric::Orders,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Metric::Revenue => "Revenue",
            Metric::AdCost => "Ad cost",
            Metric::OperatingCost => "Operating cost",
            Metric::Profit => "Profit",
            Metric::Orders => "Orders",
            Metric::AdCostPerOrder => "Ad cost/order",
            Metric::ProfitPerOrder => "Profit/order",
        }
    }

    pub(crate) fn key(self) -> &'static str {
        match self {
            Metric::Revenue => "revenue",
            Metric::AdCost => "ad_cost",
            Metric::OperatingCost => "operating_cost",
            Metric::Profit => "profit",
            Metric::Orders => "orders",
            Metric::AdCostPerOrder => "ad_cost_per_order",
            Metric::ProfitPerOrder => "profit_per_order",
        }
    }

    /// Whether an increase is favorable; costs read the other way round
    pub(crate) fn is_positive_good(self) -> bool {
        !matches!(
            self,
            Metric::AdCost | Metric::OperatingCost | Metric::AdCostPerOrder
        )
    }

    pub(crate) fn of(self, totals: &Totals) -> f64 {
        match self {
            Metric::Revenue => totals.revenue,
            Metric::AdCost => totals.ad_cost,
            Metric::OperatingCost => totals.operating_cost,
            Metric::Profit => totals.profit,
            Metric::Orders => totals.orders,
            Metric::AdCostPerOrder => totals.ad_cost_per_order(),
            Metric::ProfitPerOrder => totals.profit_per_order(),
        }
    }
}

/// Primary period totals with the optional comparison period beside them
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TotalsComparison {
    pub(crate) primary: Totals,
    pub(crate) comparison: Option<Totals>,
}

impl TotalsComparison {
    pub(crate) fn change(&self, metric: Metric) -> Option<PercentChange> {
        let previous = self.comparison.as_ref()?;
        Some(percent_change(
            metric.of(&self.primary),
            metric.of(previous),
        ))
    }
}

/// A primary-period product joined with its comparison-period counterpart
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProductComparison {
    pub(crate) primary: ProductSummary,
    /// `None` when the product had no rows in the comparison period
    pub(crate) comparison: Option<ProductSummary>,
}

impl ProductComparison {
    pub(crate) fn change(&self, metric: Metric) -> Option<PercentChange> {
        let previous = self.comparison.as_ref()?;
        Some(percent_change(
            self.primary.value(metric),
            previous.value(metric),
        ))
    }
}

impl ProductSummary {
    pub(crate) fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::AdCostPerOrder => self.ad_cost_per_order,
            Metric::ProfitPerOrder => self.profit_per_order,
            _ => metric.of(&self.totals),
        }
    }
}

/// Left join primary summaries to comparison summaries by product
pub(crate) fn compare_products(
    primary: Vec<ProductSummary>,
    comparison: Vec<ProductSummary>,
) -> Vec<ProductComparison> {
    let mut previous: HashMap<String, ProductSummary> = comparison
        .into_iter()
        .map(|s| (s.product.clone(), s))
        .collect();

    primary
        .into_iter()
        .map(|summary| ProductComparison {
            comparison: previous.remove(&summary.product),
            primary: summary,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn summary(product: &str, revenue: f64, ad_cost: f64, orders: f64) -> ProductSummary {
        ProductSummary::from_totals(
            product.to_string(),
            Totals {
                ad_cost,
                revenue,
                profit: revenue - ad_cost,
                orders,
                operating_cost: 0.0,
            },
        )
    }

    #[test]
    fn percent_change_regular() {
        assert_eq!(percent_change(150.0, 100.0), PercentChange::Change(50.0));
        assert_eq!(percent_change(50.0, 100.0), PercentChange::Change(-50.0));
        assert_eq!(percent_change(100.0, 100.0), PercentChange::Change(0.0));
    }

    #[test]
    fn percent_change_from_zero_baseline() {
        assert_eq!(percent_change(100.0, 0.0), PercentChange::New);
        assert_eq!(percent_change(0.0, 0.0), PercentChange::Change(0.0));
        assert_eq!(percent_change(-20.0, 0.0), PercentChange::Change(0.0));
    }

    #[test]
    fn new_marker_is_distinct_from_zero() {
        assert_ne!(percent_change(100.0, 0.0), percent_change(0.0, 0.0));
        assert_eq!(PercentChange::New.value(), None);
        assert_eq!(PercentChange::Change(0.0).value(), Some(0.0));
    }

    #[test]
    fn percent_change_display() {
        assert_eq!(PercentChange::New.to_string(), "new");
        assert_eq!(PercentChange::Change(0.0).to_string(), "-");
        assert_eq!(PercentChange::Change(12.345).to_string(), "▲ 12.3%");
        assert_eq!(PercentChange::Change(-7.0).to_string(), "▼ 7.0%");
    }

    #[test]
    fn polarity_by_metric() {
        assert!(Metric::Revenue.is_positive_good());
        assert!(Metric::Profit.is_positive_good());
        assert!(Metric::Orders.is_positive_good());
        assert!(Metric::ProfitPerOrder.is_positive_good());
        assert!(!Metric::AdCost.is_positive_good());
        assert!(!Metric::OperatingCost.is_positive_good());
        assert!(!Metric::AdCostPerOrder.is_positive_good());
    }

    #[test]
    fn totals_change_requires_comparison() {
        let t = Totals {
            revenue: 150.0,
            ..Default::default()
        };
        let without = TotalsComparison {
            primary: t,
            comparison: None,
        };
        assert_eq!(without.change(Metric::Revenue), None);

        let with = TotalsComparison {
            primary: t,
            comparison: Some(Totals {
                revenue: 100.0,
                ..Default::default()
            }),
        };
        assert_eq!(with.change(Metric::Revenue), Some(PercentChange::Change(50.0)));
        assert_eq!(with.change(Metric::Orders), Some(PercentChange::Change(0.0)));
    }

    #[test]
    fn left_join_keeps_primary_order_and_marks_missing() {
        let primary = vec![summary("B", 200.0, 20.0, 4.0), summary("A", 100.0, 10.0, 2.0)];
        let comparison = vec![summary("A", 50.0, 10.0, 1.0), summary("C", 10.0, 1.0, 1.0)];
        let joined = compare_products(primary, comparison);

        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].primary.product, "B");
        assert!(joined[0].comparison.is_none());
        assert_eq!(joined[0].change(Metric::Revenue), None);

        assert_eq!(joined[1].primary.product, "A");
        assert_eq!(joined[1].change(Metric::Revenue), Some(PercentChange::Change(100.0)));
        assert_eq!(joined[1].change(Metric::AdCost), Some(PercentChange::Change(0.0)));
    }

    #[test]
    fn product_change_uses_summary_ratios() {
        let primary = vec![summary("A", 0.0, 30.0, 1.0)];
        let comparison = vec![summary("A", 0.0, 20.0, 2.0)];
        let joined = compare_products(primary, comparison);
        // 30/1 against 20/2
        assert_eq!(
            joined[0].change(Metric::AdCostPerOrder),
            Some(PercentChange::Change(200.0))
        );
    }
}
