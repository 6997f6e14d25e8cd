//! Derived financial metrics

use crate::core::types::{AdRecord, RawRecord};

/// `value / orders`, or 0 when there are no orders
pub(crate) fn per_order(value: f64, orders: f64) -> f64 {
    if orders > 0.0 { value / orders } else { 0.0 }
}

/// Profit as a percentage of revenue, 0 without revenue
pub(crate) fn profit_margin(profit: f64, revenue: f64) -> f64 {
    if revenue > 0.0 {
        profit / revenue * 100.0
    } else {
        0.0
    }
}

impl AdRecord {
    pub(crate) fn derive(raw: RawRecord) -> Self {
        let profit = raw.revenue - raw.ad_cost - raw.operating_cost;
        AdRecord {
            profit_margin: profit_margin(profit, raw.revenue),
            ad_cost_per_order: per_order(raw.ad_cost, raw.orders),
            profit_per_order: per_order(profit, raw.orders),
            profit,
            date: raw.date,
            product: raw.product,
            ad_cost: raw.ad_cost,
            revenue: raw.revenue,
            orders: raw.orders,
            operating_cost: raw.operating_cost,
        }
    }
}
