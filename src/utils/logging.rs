use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects `debug` and the
/// default is `warn`, so skipped rows are reported without extra noise.
pub(crate) fn init_logging(debug: bool) {
    let default = if debug { "adstats=debug" } else { "adstats=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
