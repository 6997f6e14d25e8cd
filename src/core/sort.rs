//! Field-keyed access and stable sorting for records and summaries

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::core::compare::{Metric, ProductComparison};
use crate::core::types::{AdRecord, ProductSummary};

/// A single field read out of a record or summary
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// Shapes that expose their columns through a fixed set of typed selectors
pub(crate) trait FieldAccess {
    type Field: Copy + Eq;

    fn field(&self, field: Self::Field) -> FieldValue<'_>;
}

impl<T: FieldAccess + ?Sized> FieldAccess for &T {
    type Field = T::Field;

    fn field(&self, field: Self::Field) -> FieldValue<'_> {
        (**self).field(field)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort key plus direction, as selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SortSpec<F> {
    pub(crate) key: F,
    pub(crate) direction: SortDirection,
}

impl<F: Copy + Eq> SortSpec<F> {
    pub(crate) fn new(key: F, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Same key flips the direction, a different key starts ascending
    pub(crate) fn request(self, key: F) -> Self {
        if self.key == key {
            Self::new(key, self.direction.flip())
        } else {
            Self::new(key, SortDirection::Asc)
        }
    }
}

/// Lowercase base letters with accents dropped; `đ` sorts as its own letter after `d`
fn collation_key(s: &str) -> Vec<char> {
    let mut key = Vec::with_capacity(s.len());
    for c in s.nfd().filter(|&c| !is_combining_mark(c)) {
        match c {
            'đ' | 'Đ' => key.extend(['d', char::MAX]),
            _ => key.extend(c.to_lowercase()),
        }
    }
    key
}

/// Base letters first, then accents, then case
fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b)).then_with(|| {
        let (lower_a, lower_b) = (a.to_lowercase(), b.to_lowercase());
        lower_a
            .nfd()
            .cmp(lower_b.nfd())
            .then_with(|| a.cmp(b))
    })
}

pub(crate) fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(a), FieldValue::Text(b)) => compare_text(a, b),
        (FieldValue::Number(a), FieldValue::Number(b)) => {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        _ => Ordering::Equal,
    }
}

/// Stable sort into a new ordered view; the input is left untouched
pub(crate) fn sort_by_field<T: FieldAccess>(items: &[T], spec: SortSpec<T::Field>) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| {
        let ord = compare_values(a.field(spec.key), b.field(spec.key));
        match spec.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

/// Read the given columns, in the given order, out of one item
pub(crate) fn project_row<'a, T: FieldAccess>(item: &'a T, columns: &[T::Field]) -> Vec<FieldValue<'a>> {
    columns.iter().map(|&c| item.field(c)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnknownField(pub(crate) String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field \"{}\"", self.0)
    }
}

/// Normalize `adCostPerOrder`, `ad-cost-per-order` and `ad_cost_per_order` alike
fn normalize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    for c in raw.trim().chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '-' {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordField {
    Date,
    Product,
    AdCost,
    OperatingCost,
    Revenue,
    Orders,
    AdCostPerOrder,
    Profit,
    ProfitPerOrder,
    ProfitMargin,
}

impl RecordField {
    /// Detail table columns in display order
    pub(crate) const ALL: [RecordField; 10] = [
        RecordField::Date,
        RecordField::Product,
        RecordField::AdCost,
        RecordField::OperatingCost,
        RecordField::Revenue,
        RecordField::Orders,
        RecordField::AdCostPerOrder,
        RecordField::Profit,
        RecordField::ProfitPerOrder,
        RecordField::ProfitMargin,
    ];

    pub(crate) fn key(self) -> &'static str {
        match self {
            RecordField::Date => "date",
            RecordField::Product => "product",
            RecordField::AdCost => "ad_cost",
            RecordField::OperatingCost => "operating_cost",
            RecordField::Revenue => "revenue",
            RecordField::Orders => "orders",
            RecordField::AdCostPerOrder => "ad_cost_per_order",
            RecordField::Profit => "profit",
            RecordField::ProfitPerOrder => "profit_per_order",
            RecordField::ProfitMargin => "profit_margin",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            RecordField::Date => "Date",
            RecordField::Product => "Product",
            RecordField::AdCost => "Ad cost",
            RecordField::OperatingCost => "Op. cost",
            RecordField::Revenue => "Revenue",
            RecordField::Orders => "Orders",
            RecordField::AdCostPerOrder => "Ad/order",
            RecordField::Profit => "Profit",
            RecordField::ProfitPerOrder => "Profit/order",
            RecordField::ProfitMargin => "Margin",
        }
    }
}

impl FromStr for RecordField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        RecordField::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

impl FieldAccess for AdRecord {
    type Field = RecordField;

    fn field(&self, field: RecordField) -> FieldValue<'_> {
        match field {
            RecordField::Date => FieldValue::Text(&self.date),
            RecordField::Product => FieldValue::Text(&self.product),
            RecordField::AdCost => FieldValue::Number(self.ad_cost),
            RecordField::OperatingCost => FieldValue::Number(self.operating_cost),
            RecordField::Revenue => FieldValue::Number(self.revenue),
            RecordField::Orders => FieldValue::Number(self.orders),
            RecordField::AdCostPerOrder => FieldValue::Number(self.ad_cost_per_order),
            RecordField::Profit => FieldValue::Number(self.profit),
            RecordField::ProfitPerOrder => FieldValue::Number(self.profit_per_order),
            RecordField::ProfitMargin => FieldValue::Number(self.profit_margin),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SummaryField {
    Product,
    Profit,
    ProfitPerOrder,
    Revenue,
    Orders,
    AdCost,
    AdCostPerOrder,
    OperatingCost,
}

impl SummaryField {
    /// Summary table columns in display order
    pub(crate) const ALL: [SummaryField; 8] = [
        SummaryField::Product,
        SummaryField::Profit,
        SummaryField::ProfitPerOrder,
        SummaryField::Revenue,
        SummaryField::Orders,
        SummaryField::AdCost,
        SummaryField::AdCostPerOrder,
        SummaryField::OperatingCost,
    ];

    pub(crate) fn key(self) -> &'static str {
        match self {
            SummaryField::Product => "product",
            SummaryField::Profit => "profit",
            SummaryField::ProfitPerOrder => "profit_per_order",
            SummaryField::Revenue => "revenue",
            SummaryField::Orders => "orders",
            SummaryField::AdCost => "ad_cost",
            SummaryField::AdCostPerOrder => "ad_cost_per_order",
            SummaryField::OperatingCost => "operating_cost",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            SummaryField::Product => "Product",
            other => other.metric().map_or("", Metric::label),
        }
    }

    /// The comparable metric behind a column; `None` for the product name
    pub(crate) fn metric(self) -> Option<Metric> {
        match self {
            SummaryField::Product => None,
            SummaryField::Profit => Some(Metric::Profit),
            SummaryField::ProfitPerOrder => Some(Metric::ProfitPerOrder),
            SummaryField::Revenue => Some(Metric::Revenue),
            SummaryField::Orders => Some(Metric::Orders),
            SummaryField::AdCost => Some(Metric::AdCost),
            SummaryField::AdCostPerOrder => Some(Metric::AdCostPerOrder),
            SummaryField::OperatingCost => Some(Metric::OperatingCost),
        }
    }
}

impl FromStr for SummaryField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        SummaryField::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

impl FieldAccess for ProductSummary {
    type Field = SummaryField;

    fn field(&self, field: SummaryField) -> FieldValue<'_> {
        match field {
            SummaryField::Product => FieldValue::Text(&self.product),
            SummaryField::Profit => FieldValue::Number(self.totals.profit),
            SummaryField::ProfitPerOrder => FieldValue::Number(self.profit_per_order),
            SummaryField::Revenue => FieldValue::Number(self.totals.revenue),
            SummaryField::Orders => FieldValue::Number(self.totals.orders),
            SummaryField::AdCost => FieldValue::Number(self.totals.ad_cost),
            SummaryField::AdCostPerOrder => FieldValue::Number(self.ad_cost_per_order),
            SummaryField::OperatingCost => FieldValue::Number(self.totals.operating_cost),
        }
    }
}

/// Joined rows sort by their primary-period values
impl FieldAccess for ProductComparison {
    type Field = SummaryField;

    fn field(&self, field: SummaryField) -> FieldValue<'_> {
        self.primary.field(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{RawRecord, Totals};

    fn summary(product: &str, profit: f64) -> ProductSummary {
        ProductSummary::from_totals(
            product.to_string(),
            Totals {
                profit,
                ..Default::default()
            },
        )
    }

    fn record(date: &str, product: &str, revenue: f64) -> AdRecord {
        AdRecord::derive(RawRecord {
            date: date.into(),
            product: product.into(),
            revenue,
            ..Default::default()
        })
    }

    fn names<T: FieldAccess>(items: &[&T], key: T::Field) -> Vec<String> {
        items
            .iter()
            .map(|i| match i.field(key) {
                FieldValue::Text(t) => t.to_string(),
                FieldValue::Number(n) => n.to_string(),
            })
            .collect()
    }

    #[test]
    fn descending_sort_is_stable_for_ties() {
        let items = vec![summary("A", 10.0), summary("B", 10.0), summary("C", 5.0)];
        let sorted = sort_by_field(&items, SortSpec::new(SummaryField::Profit, SortDirection::Desc));
        assert_eq!(names(&sorted, SummaryField::Product), ["A", "B", "C"]);
    }

    #[test]
    fn ascending_sort_is_stable_for_ties() {
        let items = vec![summary("A", 10.0), summary("C", 5.0), summary("B", 10.0)];
        let sorted = sort_by_field(&items, SortSpec::new(SummaryField::Profit, SortDirection::Asc));
        assert_eq!(names(&sorted, SummaryField::Product), ["C", "A", "B"]);
    }

    #[test]
    fn sort_does_not_touch_input() {
        let items = vec![summary("B", 1.0), summary("A", 2.0)];
        let _ = sort_by_field(&items, SortSpec::new(SummaryField::Product, SortDirection::Asc));
        assert_eq!(items[0].product, "B");
    }

    #[test]
    fn text_sort_ignores_case_first() {
        let items = vec![summary("banana", 0.0), summary("Apple", 0.0), summary("cherry", 0.0)];
        let sorted = sort_by_field(&items, SortSpec::new(SummaryField::Product, SortDirection::Asc));
        assert_eq!(names(&sorted, SummaryField::Product), ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn text_sort_places_accented_names_by_base_letter() {
        let items: Vec<ProductSummary> = ["Zebra", "Đèn", "Bàn", "Ecom", "Áo", "Dép"]
            .into_iter()
            .map(|p| summary(p, 0.0))
            .collect();
        let sorted = sort_by_field(&items, SortSpec::new(SummaryField::Product, SortDirection::Asc));
        assert_eq!(
            names(&sorted, SummaryField::Product),
            ["Áo", "Bàn", "Dép", "Đèn", "Ecom", "Zebra"]
        );
    }

    #[test]
    fn accents_break_ties_before_case() {
        assert_eq!(compare_text("Ao", "Áo"), Ordering::Less);
        assert_eq!(compare_text("áo", "Ao"), Ordering::Greater);
        assert_eq!(compare_text("ao", "Ao"), "ao".cmp("Ao"));
        assert_eq!(compare_text("Dz", "Đa"), Ordering::Less);
    }

    #[test]
    fn records_sort_by_canonical_date() {
        let items = vec![
            record("2024-03-10", "A", 1.0),
            record("2023-12-31", "B", 2.0),
            record("2024-01-05", "C", 3.0),
        ];
        let sorted = sort_by_field(&items, SortSpec::new(RecordField::Date, SortDirection::Desc));
        assert_eq!(
            names(&sorted, RecordField::Date),
            ["2024-03-10", "2024-01-05", "2023-12-31"]
        );
    }

    #[test]
    fn numeric_sort_is_not_lexicographic() {
        let items = vec![record("d", "A", 9.0), record("d", "B", 10.0), record("d", "C", 100.0)];
        let sorted = sort_by_field(&items, SortSpec::new(RecordField::Revenue, SortDirection::Asc));
        assert_eq!(names(&sorted, RecordField::Product), ["A", "B", "C"]);
    }

    #[test]
    fn nan_compares_equal() {
        assert_eq!(
            compare_values(FieldValue::Number(f64::NAN), FieldValue::Number(1.0)),
            Ordering::Equal
        );
    }

    #[test]
    fn request_toggles_and_resets() {
        let spec = SortSpec::new(SummaryField::Profit, SortDirection::Desc);
        let flipped = spec.request(SummaryField::Profit);
        assert_eq!(flipped.direction, SortDirection::Asc);
        assert_eq!(flipped.request(SummaryField::Profit).direction, SortDirection::Desc);

        let other = spec.request(SummaryField::Revenue);
        assert_eq!(other, SortSpec::new(SummaryField::Revenue, SortDirection::Asc));
    }

    #[test]
    fn field_names_parse_in_any_case_style() {
        assert_eq!(
            "adCostPerOrder".parse::<RecordField>(),
            Ok(RecordField::AdCostPerOrder)
        );
        assert_eq!(
            "profit_margin".parse::<RecordField>(),
            Ok(RecordField::ProfitMargin)
        );
        assert_eq!(
            "operating-cost".parse::<SummaryField>(),
            Ok(SummaryField::OperatingCost)
        );
        assert!("margin".parse::<SummaryField>().is_err());
        assert!("nope".parse::<RecordField>().is_err());
    }

    #[test]
    fn summary_columns_map_to_metrics() {
        assert_eq!(SummaryField::Product.metric(), None);
        assert_eq!(SummaryField::AdCostPerOrder.metric(), Some(Metric::AdCostPerOrder));
        assert_eq!(SummaryField::Product.label(), "Product");
        assert_eq!(SummaryField::OperatingCost.label(), "Operating cost");
    }

    #[test]
    fn project_row_follows_column_order() {
        let r = record("2024-03-05", "Serum", 100.0);
        let row = project_row(&r, &[RecordField::Revenue, RecordField::Product]);
        assert_eq!(row, [FieldValue::Number(100.0), FieldValue::Text("Serum")]);
    }
}
