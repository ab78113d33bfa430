use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter, e.g. `RESXGEN_LOG=resxgen=debug`.
pub const LOG_ENV: &str = "RESXGEN_LOG";

/// Install the stderr subscriber. `RESXGEN_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "resxgen=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed when embedded in another program.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
