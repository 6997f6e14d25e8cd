use comfy_table::{Cell, Color};

use crate::core::{
    AdRecord, CostShare, DateRange, FieldValue, Metric, PercentChange, ProductComparison,
    RecordField, SummaryField, TotalsComparison, project_row,
};
use crate::output::format::{
    NumberFormat, change_color, create_styled_table, format_amount, format_change, format_number,
    format_percent, header_cell, right_cell, styled_cell,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
    pub(crate) number_format: NumberFormat,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SummaryOptions {
    pub(crate) records: usize,
    pub(crate) skipped: usize,
    pub(crate) elapsed_ms: Option<f64>,
}

/// Print the summary line with optional timing
pub(crate) fn print_summary_line(summary: SummaryOptions, opts: TableOptions) {
    let nf = opts.number_format;
    let stats_text = format!(
        "{} rows loaded ({} malformed rows skipped)",
        format_number(summary.records as i64, nf),
        format_number(summary.skipped as i64, nf)
    );

    if let Some(ms) = summary.elapsed_ms {
        if opts.use_color {
            println!("\n  {} | \x1b[36m{:.0}ms\x1b[0m\n", stats_text, ms);
        } else {
            println!("\n  {} | {:.0}ms\n", stats_text, ms);
        }
    } else {
        println!("\n  {}\n", stats_text);
    }
}

pub(crate) fn describe_range(range: &DateRange) -> String {
    match (&range.start, &range.end) {
        (None, None) => "all dates".to_string(),
        (start, end) => format!(
            "{} → {}",
            start.as_deref().unwrap_or("…"),
            end.as_deref().unwrap_or("…")
        ),
    }
}

fn print_title(title: &str, range: &DateRange, comparison: Option<&DateRange>) {
    match comparison {
        Some(prev) => println!(
            "\n  {} | {} (vs {})\n",
            title,
            describe_range(range),
            describe_range(prev)
        ),
        None => println!("\n  {} | {}\n", title, describe_range(range)),
    }
}

fn record_cell(field: RecordField, value: FieldValue<'_>, opts: TableOptions) -> Cell {
    match value {
        FieldValue::Text(text) => Cell::new(text),
        FieldValue::Number(n) => {
            let text = if field == RecordField::ProfitMargin {
                format_percent(n, opts.number_format)
            } else {
                format_amount(n, opts.number_format)
            };
            let color = (opts.use_color
                && n < 0.0
                && matches!(
                    field,
                    RecordField::Profit | RecordField::ProfitPerOrder | RecordField::ProfitMargin
                ))
            .then_some(Color::Red);
            right_cell(&text, color, false)
        }
    }
}

pub(crate) fn print_records_table(
    records: &[&AdRecord],
    columns: &[RecordField],
    range: &DateRange,
    opts: TableOptions,
) {
    let mut table = create_styled_table();
    table.set_header(
        columns
            .iter()
            .map(|c| header_cell(c.label(), opts.use_color))
            .collect::<Vec<_>>(),
    );

    for record in records {
        let row: Vec<Cell> = columns
            .iter()
            .zip(project_row(record, columns))
            .map(|(&field, value)| record_cell(field, value, opts))
            .collect();
        table.add_row(row);
    }

    print_title("Daily Records", range, None);
    println!("{table}");
}

/// Value line plus, when comparing, a change line under it
fn metric_cell(
    value: f64,
    change: Option<PercentChange>,
    metric: Metric,
    comparing: bool,
    bold: bool,
    opts: TableOptions,
) -> Cell {
    let nf = opts.number_format;
    let text = format_amount(value, nf);
    if !comparing {
        return right_cell(&text, None, bold);
    }
    match change {
        Some(change) => right_cell(
            &format!("{text}\n{}", format_change(change, nf)),
            change_color(change, metric, opts.use_color),
            bold,
        ),
        // No rows for this product in the comparison period
        None => right_cell(&format!("{text}\nn/a"), None, bold),
    }
}

pub(crate) fn print_products_table(
    products: &[&ProductComparison],
    totals: &TotalsComparison,
    columns: &[SummaryField],
    range: &DateRange,
    comparison: Option<&DateRange>,
    opts: TableOptions,
) {
    let comparing = comparison.is_some();
    let mut table = create_styled_table();
    table.set_header(
        columns
            .iter()
            .map(|c| header_cell(c.label(), opts.use_color))
            .collect::<Vec<_>>(),
    );

    for product in products {
        let row: Vec<Cell> = columns
            .iter()
            .map(|&field| match field.metric() {
                None => Cell::new(&product.primary.product),
                Some(metric) => metric_cell(
                    product.primary.value(metric),
                    product.change(metric),
                    metric,
                    comparing,
                    false,
                    opts,
                ),
            })
            .collect();
        table.add_row(row);
    }

    let cyan = if opts.use_color { Some(Color::Cyan) } else { None };
    let total_row: Vec<Cell> = columns
        .iter()
        .map(|&field| match field.metric() {
            None => styled_cell("TOTAL", cyan, true),
            Some(metric) => metric_cell(
                metric.of(&totals.primary),
                totals.change(metric),
                metric,
                comparing,
                true,
                opts,
            ),
        })
        .collect();
    table.add_row(total_row);

    print_title("Products", range, comparison);
    println!("{table}");
    println!(
        "\n  {} products\n",
        format_number(products.len() as i64, opts.number_format)
    );
}

pub(crate) fn print_totals_table(
    totals: &TotalsComparison,
    range: &DateRange,
    comparison: Option<&DateRange>,
    opts: TableOptions,
) {
    let nf = opts.number_format;
    let mut table = create_styled_table();
    let mut header = vec![
        header_cell("Metric", opts.use_color),
        header_cell("Current", opts.use_color),
    ];
    if totals.comparison.is_some() {
        header.push(header_cell("Previous", opts.use_color));
        header.push(header_cell("Change", opts.use_color));
    }
    table.set_header(header);

    let metrics = Metric::HEADLINE
        .into_iter()
        .chain([Metric::AdCostPerOrder, Metric::ProfitPerOrder]);
    for metric in metrics {
        let mut row = vec![
            Cell::new(metric.label()),
            right_cell(&format_amount(metric.of(&totals.primary), nf), None, false),
        ];
        if let Some(previous) = &totals.comparison {
            row.push(right_cell(&format_amount(metric.of(previous), nf), None, false));
            if let Some(change) = totals.change(metric) {
                row.push(right_cell(
                    &format_change(change, nf),
                    change_color(change, metric, opts.use_color),
                    false,
                ));
            }
        }
        table.add_row(row);
    }

    print_title("Totals", range, comparison);
    println!("{table}");
}

pub(crate) fn print_cost_share_table(shares: &[CostShare], opts: TableOptions) {
    if shares.is_empty() {
        return;
    }
    let nf = opts.number_format;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Product", opts.use_color),
        header_cell("Ad cost", opts.use_color),
        header_cell("Share", opts.use_color),
    ]);
    for share in shares {
        table.add_row(vec![
            Cell::new(&share.product),
            right_cell(&format_amount(share.ad_cost, nf), None, false),
            right_cell(&format_percent(share.percent, nf), None, false),
        ]);
    }

    println!("\n  Ad Cost Share\n");
    println!("{table}");
}

pub(crate) fn print_bounds(bounds: Option<&(String, String)>, products: &[String]) {
    match bounds {
        Some((min, max)) => println!("\n  Dates: {min} → {max}"),
        None => println!("\n  Dates: none"),
    }
    println!("  Products ({}):", products.len());
    for product in products {
        println!("    {product}");
    }
    println!();
}
