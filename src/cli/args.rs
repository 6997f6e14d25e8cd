//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigSortOrder};
use crate::core::SortDirection;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub(crate) enum SortOrder {
    /// Smallest first
    Asc,
    /// Largest first
    Desc,
}

impl From<SortOrder> for SortDirection {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => SortDirection::Asc,
            SortOrder::Desc => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "adstats")]
#[command(about = "Advertising cost, revenue and profit analytics", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Filter from date (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long, global = true)]
    pub(crate) since: Option<String>,

    /// Filter until date (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long, global = true)]
    pub(crate) until: Option<String>,

    /// Compare with the period of equal length just before --since..--until
    #[arg(short = 'C', long, global = true)]
    pub(crate) compare: bool,

    /// Comparison period start (YYYYMMDD or YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    pub(crate) compare_since: Option<String>,

    /// Comparison period end (YYYYMMDD or YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    pub(crate) compare_until: Option<String>,

    /// Only include this product (repeatable)
    #[arg(short, long = "product", global = true, value_name = "NAME")]
    pub(crate) products: Vec<String>,

    /// Sort by column; naming the same column again reverses the direction
    #[arg(long, global = true, value_name = "FIELD")]
    pub(crate) sort: Vec<String>,

    /// Sort direction, overriding the one implied by --sort
    #[arg(short, long, global = true, value_enum)]
    pub(crate) order: Option<SortOrder>,

    /// Table columns to show, in order (e.g. "product,revenue,profit")
    #[arg(long, global = true, value_delimiter = ',', value_name = "FIELDS")]
    pub(crate) columns: Vec<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Sheet CSV export URL
    #[arg(long, global = true, value_name = "URL", conflicts_with = "file")]
    pub(crate) url: Option<String>,

    /// Read the export from a local CSV file instead of fetching it
    #[arg(short, long, global = true, value_name = "PATH")]
    pub(crate) file: Option<PathBuf>,

    /// Locale for number formatting (e.g., "vi", "en", "de")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        if self.order.is_none() {
            self.order = config.order.map(|order| match order {
                ConfigSortOrder::Asc => SortOrder::Asc,
                ConfigSortOrder::Desc => SortOrder::Desc,
            });
        }

        // Only override color if CLI is at default
        if self.color == ColorMode::Auto
            && let Some(color) = config.color
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        // String options: only apply if CLI didn't set them
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }
        if self.url.is_none() && self.file.is_none() {
            self.url = config.url.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    /// Comparison is on when asked for or when either comparison bound is given
    pub(crate) fn wants_comparison(&self) -> bool {
        self.compare || self.compare_since.is_some() || self.compare_until.is_some()
    }
}
