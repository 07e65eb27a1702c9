//! Subscriber setup

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber on stderr.
///
/// `-v`/`-q` take precedence over `RUST_LOG`; without either the filter comes
/// from `RUST_LOG`, falling back to `info`.
pub fn init(verbose: u8, quiet: bool) {
    let filter = match directive(verbose, quiet) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn directive(verbose: u8, quiet: bool) -> Option<&'static str> {
    match (quiet, verbose) {
        (true, _) => Some("error"),
        (false, 0) => None,
        (false, 1) => Some("debug"),
        (false, _) => Some("trace"),
    }
}
