//! Tracing subscriber setup for the `ppltn` binary.
//!
//! Logs go to stderr so that summaries and exports printed on stdout can be
//! piped without noise. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_DIRECTIVE: &str = "citydata_ppltn=info";

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("citydata_ppltn=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
    };

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
