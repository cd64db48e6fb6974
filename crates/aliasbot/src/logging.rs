use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr so the console gateway
/// owns stdout. `RUST_LOG` selects the filter (default `info`) and `NO_COLOR`
/// turns off ANSI colours.
pub fn init_tracing() {
    let use_ansi = std::env::var_os("NO_COLOR").is_none();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(use_ansi)
        .init();
}
