//! Diagnostic tracing for bisection runs.
//!
//! Tracing goes to stderr and is separate from the progress lines printed by
//! `io::report` on stdout, which are always shown.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset, by `-v` count.
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "line_bisect=info",
        _ => "line_bisect=debug",
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks the level.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=line_bisect=debug line-bisect commands.sh 'make test'
/// ```
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
