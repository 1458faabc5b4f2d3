//! Diagnostics on stderr via tracing. stdout carries only the report.

use tracing_subscriber::EnvFilter;

/// `--verbose` forces debug, otherwise `RUST_LOG` or `warn`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
