//! CLI subcommand definitions

use clap::Subcommand;

/// Main CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub(crate) enum Commands {
    /// Show totals and per-product summaries (default)
    Overview,
    /// Show the filtered daily rows
    Records,
    /// Show per-product summaries
    Products,
    /// Show period totals and ad cost share
    Totals,
    /// Show the available date range and product list
    Bounds,
}

impl Commands {
    /// Whether this command renders the per-product table
    pub(crate) fn shows_products(self) -> bool {
        matches!(self, Commands::Overview | Commands::Products)
    }

    pub(crate) fn shows_totals(self) -> bool {
        matches!(self, Commands::Overview | Commands::Totals)
    }
}

/// Missing subcommand means overview
pub(crate) fn parse_command(cmd: Option<Commands>) -> Commands {
    cmd.unwrap_or(Commands::Overview)
}
