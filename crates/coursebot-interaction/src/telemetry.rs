//! Tracing setup shared by the front ends.
//!
//! Logs go to stderr so they never interleave with transcript output on
//! stdout. `RUST_LOG` overrides the level passed in.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// HTTP plumbing that is pinned to `warn` unless `RUST_LOG` says otherwise.
pub const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls"];

fn build_filter(log_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let mut directives = String::from(log_level);
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{}=warn", module));
    }
    EnvFilter::new(&directives)
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init_tracing(log_level: &str) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(build_filter(log_level))
        .with(fmt_layer)
        .try_init();

    tracing::debug!(log_level = %log_level, "Logging initialized");
}
