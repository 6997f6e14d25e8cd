mod format;
mod json;
mod table;

pub(crate) use format::NumberFormat;
pub(crate) use json::{
    output_bounds_json, output_overview_json, output_products_json, output_records_json,
    output_totals_json,
};
pub(crate) use table::{
    SummaryOptions, TableOptions, print_bounds, print_cost_share_table, print_products_table,
    print_records_table, print_summary_line, print_totals_table,
};
