//! Tracing setup.
//!
//! Logs go to stderr so they never interleave with report output on stdout;
//! the default filter stays at `warn` unless `RUST_LOG` says otherwise. The
//! TUI runs on the alternate screen, so stderr noise stays invisible there
//! unless redirected.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // try_init: a second call (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
