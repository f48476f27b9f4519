use tracing_subscriber::EnvFilter;

/// Install the stderr diagnostics subscriber.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
/// output from this crate's library and binaries with `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,nearby_institutes=debug,json_to_table=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
