use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Logs go to stderr so notification
/// text on stdout stays clean.
///
/// `RUST_LOG` wins when set; otherwise `debug` picks between `debug` and
/// `info` for this crate.
pub(crate) fn init_logging(debug: bool) {
    let default_level = if debug { "timewarden=debug" } else { "timewarden=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .try_init();
}
