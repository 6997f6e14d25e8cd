use std::str::FromStr;

use tracing::warn;

use crate::cli::{Cli, Commands, parse_command};
use crate::consts::DEFAULT_SHEET_URL;
use crate::core::{
    AdRecord, AnalysisConfig, ComparisonMode, DateRange, ProductSelection, RecordField, SortSpec,
    SummaryField, UnknownField, analyze, date_bounds, product_catalog,
};
use crate::error::AppError;
use crate::output::{
    NumberFormat, SummaryOptions, TableOptions, output_bounds_json, output_overview_json,
    output_products_json, output_records_json, output_totals_json, print_bounds,
    print_cost_share_table, print_products_table, print_records_table, print_summary_line,
    print_totals_table,
};
use crate::source::{FileSource, LoadResult, SheetSource, Source, load_records};
use crate::utils::canonical_date_arg;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) command: Commands,
    pub(crate) analysis: AnalysisConfig,
    pub(crate) record_columns: Vec<RecordField>,
    pub(crate) summary_columns: Vec<SummaryField>,
    pub(crate) number_format: NumberFormat,
}

impl CommandContext<'_> {
    fn table_options(&self) -> TableOptions {
        TableOptions {
            use_color: self.cli.use_color(),
            number_format: self.number_format,
        }
    }
}

/// Build a date range from two optional arguments
///
/// An end before the start pulls the start back to it, the same way the
/// two bounds constrain each other when picked one after the other.
fn build_range(since: Option<&str>, until: Option<&str>) -> Result<DateRange, AppError> {
    let since = canonical_date_arg(since)?;
    let until = canonical_date_arg(until)?;

    let mut range = DateRange::default();
    if let Some(start) = since {
        range = range.with_start(start);
    }
    if let Some(end) = until {
        if let Some(start) = &range.start
            && end < *start
        {
            warn!(%start, %end, "end date is before start date, using the end date for both");
        }
        range = range.with_end(end);
    }
    Ok(range)
}

fn parse_fields<F>(
    raw: &[String],
    table: &'static str,
    all: &[F],
    key: fn(F) -> &'static str,
) -> Result<Vec<F>, AppError>
where
    F: FromStr<Err = UnknownField> + Copy,
{
    raw.iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.parse::<F>().map_err(|UnknownField(input)| AppError::UnknownField {
                input,
                table,
                expected: all.iter().map(|&f| key(f)).collect::<Vec<_>>().join(", "),
            })
        })
        .collect()
}

/// Replay `--sort` requests on top of the default, then apply `--order`
fn resolve_sort<F: Copy + Eq>(cli: &Cli, default: SortSpec<F>, requests: &[F]) -> SortSpec<F> {
    let spec = requests
        .iter()
        .fold(default, |spec, &key| spec.request(key));
    match cli.order {
        Some(order) => SortSpec::new(spec.key, order.into()),
        None => spec,
    }
}

fn build_analysis_config(cli: &Cli, command: Commands) -> Result<AnalysisConfig, AppError> {
    let defaults = AnalysisConfig::default();
    let range = build_range(cli.since.as_deref(), cli.until.as_deref())?;

    let comparison = if cli.compare_since.is_some() || cli.compare_until.is_some() {
        ComparisonMode::Explicit(build_range(
            cli.compare_since.as_deref(),
            cli.compare_until.as_deref(),
        )?)
    } else if cli.wants_comparison() {
        ComparisonMode::Auto
    } else {
        ComparisonMode::Off
    };

    let (record_sort, summary_sort) = if command == Commands::Records {
        let keys = parse_fields(&cli.sort, "record", &RecordField::ALL, RecordField::key)?;
        (resolve_sort(cli, defaults.record_sort, &keys), defaults.summary_sort)
    } else {
        let keys = parse_fields(&cli.sort, "product", &SummaryField::ALL, SummaryField::key)?;
        (defaults.record_sort, resolve_sort(cli, defaults.summary_sort, &keys))
    };

    Ok(AnalysisConfig {
        range,
        products: cli.products.iter().cloned().collect::<ProductSelection>(),
        comparison,
        record_sort,
        summary_sort,
    })
}

impl<'a> CommandContext<'a> {
    /// Validate every argument before anything is fetched
    pub(crate) fn from_cli(cli: &'a Cli) -> Result<Self, AppError> {
        let command = parse_command(cli.command);
        let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
        let analysis = build_analysis_config(cli, command)?;

        let (record_columns, summary_columns) = if command == Commands::Records {
            let columns = parse_fields(&cli.columns, "record", &RecordField::ALL, RecordField::key)?;
            (columns, Vec::new())
        } else {
            let columns =
                parse_fields(&cli.columns, "product", &SummaryField::ALL, SummaryField::key)?;
            (Vec::new(), columns)
        };

        Ok(CommandContext {
            cli,
            command,
            analysis,
            record_columns: non_empty_or(record_columns, &RecordField::ALL),
            summary_columns: non_empty_or(summary_columns, &SummaryField::ALL),
            number_format,
        })
    }
}

fn non_empty_or<F: Copy>(columns: Vec<F>, all: &[F]) -> Vec<F> {
    if columns.is_empty() {
        all.to_vec()
    } else {
        columns
    }
}

fn source_for(cli: &Cli) -> Box<dyn Source> {
    match (&cli.file, &cli.url) {
        (Some(path), _) => Box::new(FileSource::new(path.clone())),
        (None, Some(url)) => Box::new(SheetSource::new(url.as_str())),
        (None, None) => Box::new(SheetSource::new(DEFAULT_SHEET_URL)),
    }
}

fn warn_unknown_products(ctx: &CommandContext<'_>, records: &[AdRecord]) {
    if ctx.cli.products.is_empty() {
        return;
    }
    let catalog = product_catalog(records);
    for product in &ctx.cli.products {
        if catalog.binary_search(product).is_err() {
            warn!(%product, "no rows for product");
        }
    }
}

fn handle_bounds(ctx: &CommandContext<'_>, records: &[AdRecord]) {
    let bounds = date_bounds(records);
    let catalog = product_catalog(records);
    if ctx.cli.json {
        println!("{}", output_bounds_json(bounds.as_ref(), &catalog));
    } else {
        print_bounds(bounds.as_ref(), &catalog);
    }
}

fn handle_records(ctx: &CommandContext<'_>, loaded: &LoadResult) {
    let analysis = analyze(&loaded.records, &ctx.analysis);
    if ctx.cli.json {
        println!("{}", output_records_json(&analysis.records));
        return;
    }
    if analysis.records.is_empty() {
        println!("No records found for the selected period.");
        return;
    }
    print_records_table(
        &analysis.records,
        &ctx.record_columns,
        &ctx.analysis.range,
        ctx.table_options(),
    );
    print_summary_line(summary_options(loaded), ctx.table_options());
}

fn handle_report(ctx: &CommandContext<'_>, loaded: &LoadResult) {
    let analysis = analyze(&loaded.records, &ctx.analysis);
    let range = &ctx.analysis.range;
    let comparing = analysis.comparison_range.is_some();

    if ctx.cli.json {
        let json = match ctx.command {
            Commands::Products => output_products_json(&analysis.sorted_products(), comparing),
            Commands::Totals => output_totals_json(&analysis, range),
            _ => output_overview_json(&analysis, range),
        };
        println!("{json}");
        return;
    }

    if analysis.records.is_empty() {
        println!("No records found for the selected period.");
        return;
    }

    let opts = ctx.table_options();
    if ctx.command.shows_totals() {
        print_totals_table(
            &analysis.totals,
            range,
            analysis.comparison_range.as_ref(),
            opts,
        );
    }
    if ctx.command == Commands::Totals {
        print_cost_share_table(&analysis.cost_share, opts);
    }
    if ctx.command.shows_products() {
        print_products_table(
            &analysis.sorted_products(),
            &analysis.totals,
            &ctx.summary_columns,
            range,
            analysis.comparison_range.as_ref(),
            opts,
        );
    }
    print_summary_line(summary_options(loaded), opts);
}

fn summary_options(loaded: &LoadResult) -> SummaryOptions {
    SummaryOptions {
        records: loaded.records.len(),
        skipped: loaded.skipped,
        elapsed_ms: Some(loaded.elapsed_ms),
    }
}

/// Fetch once, analyze, print
pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let ctx = CommandContext::from_cli(cli)?;
    let source = source_for(cli);
    let loaded = load_records(source.as_ref())?;
    warn_unknown_products(&ctx, &loaded.records);

    match ctx.command {
        Commands::Bounds => handle_bounds(&ctx, &loaded.records),
        Commands::Records => handle_records(&ctx, &loaded),
        Commands::Overview | Commands::Products | Commands::Totals => handle_report(&ctx, &loaded),
    }
    Ok(())
}
