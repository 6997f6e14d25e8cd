mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod source;
mod utils;

use clap::Parser;
use tracing::{debug, warn};

use cli::Cli;
use config::Config;
use utils::init_logging;

fn main() {
    let load = Config::load();
    let cli = Cli::parse().with_config(&load.config);

    init_logging(cli.debug);
    if let Some(path) = &load.path {
        debug!(path = %path.display(), "loaded config");
    }
    for (path, err) in &load.rejected {
        warn!(path = %path.display(), %err, "failed to parse config");
    }

    if let Err(e) = app::run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
