use serde_json::{Map, Value, json};

use crate::core::{
    AdRecord, Analysis, CostShare, DateRange, Metric, PercentChange, ProductComparison, Totals,
    TotalsComparison,
};

fn to_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        tracing::error!(%e, "failed to serialize JSON output");
        "null".to_string()
    })
}

fn range_json(range: &DateRange) -> Value {
    json!({ "start": range.start, "end": range.end })
}

/// Numbers as numbers, the zero-baseline marker as `"new"`, no comparison as `null`
fn change_json(change: Option<PercentChange>) -> Value {
    match change {
        Some(change) => change.value().map_or_else(|| json!("new"), |v| json!(v)),
        None => Value::Null,
    }
}

const SUMMARY_METRICS: [Metric; 7] = [
    Metric::Revenue,
    Metric::AdCost,
    Metric::OperatingCost,
    Metric::Profit,
    Metric::Orders,
    Metric::AdCostPerOrder,
    Metric::ProfitPerOrder,
];

fn totals_json(totals: &Totals) -> Value {
    let mut obj = Map::new();
    for metric in SUMMARY_METRICS {
        obj.insert(metric.key().to_string(), json!(metric.of(totals)));
    }
    Value::Object(obj)
}

fn changes_json(change: impl Fn(Metric) -> Option<PercentChange>) -> Value {
    let mut obj = Map::new();
    for metric in SUMMARY_METRICS {
        obj.insert(metric.key().to_string(), change_json(change(metric)));
    }
    Value::Object(obj)
}

pub(crate) fn output_records_json(records: &[&AdRecord]) -> String {
    let rows: Vec<Value> = records
        .iter()
        .map(|r| serde_json::to_value(r).unwrap_or(Value::Null))
        .collect();
    to_pretty(&Value::Array(rows))
}

fn product_json(product: &ProductComparison, comparing: bool) -> Value {
    let mut obj = json!({ "product": product.primary.product });
    for metric in SUMMARY_METRICS {
        obj[metric.key()] = json!(product.primary.value(metric));
    }
    if comparing {
        obj["comparison"] = match &product.comparison {
            Some(prev) => {
                let mut prev_obj = Map::new();
                for metric in SUMMARY_METRICS {
                    prev_obj.insert(metric.key().to_string(), json!(prev.value(metric)));
                }
                Value::Object(prev_obj)
            }
            None => Value::Null,
        };
        obj["change"] = changes_json(|m| product.change(m));
    }
    obj
}

fn products_value(products: &[&ProductComparison], comparing: bool) -> Value {
    products.iter().map(|p| product_json(p, comparing)).collect()
}

pub(crate) fn output_products_json(products: &[&ProductComparison], comparing: bool) -> String {
    to_pretty(&products_value(products, comparing))
}

fn cost_share_json(shares: &[CostShare]) -> Value {
    shares
        .iter()
        .map(|s| json!({ "product": s.product, "ad_cost": s.ad_cost, "percent": s.percent }))
        .collect()
}

fn comparison_json(totals: &TotalsComparison) -> (Value, Value) {
    match &totals.comparison {
        Some(prev) => (totals_json(prev), changes_json(|m| totals.change(m))),
        None => (Value::Null, Value::Null),
    }
}

fn totals_value(analysis: &Analysis<'_>, range: &DateRange) -> Value {
    let (comparison, change) = comparison_json(&analysis.totals);
    json!({
        "range": range_json(range),
        "comparison_range": analysis.comparison_range.as_ref().map(range_json),
        "totals": totals_json(&analysis.totals.primary),
        "comparison": comparison,
        "change": change,
        "cost_share": cost_share_json(&analysis.cost_share),
    })
}

pub(crate) fn output_totals_json(analysis: &Analysis<'_>, range: &DateRange) -> String {
    to_pretty(&totals_value(analysis, range))
}

/// Totals report with the product list nested under `products`
pub(crate) fn output_overview_json(analysis: &Analysis<'_>, range: &DateRange) -> String {
    let mut output = totals_value(analysis, range);
    output["products"] = products_value(
        &analysis.sorted_products(),
        analysis.comparison_range.is_some(),
    );
    to_pretty(&output)
}

pub(crate) fn output_bounds_json(bounds: Option<&(String, String)>, products: &[String]) -> String {
    let output = json!({
        "min_date": bounds.map(|(min, _)| min),
        "max_date": bounds.map(|(_, max)| max),
        "products": products,
    });
    to_pretty(&output)
}
