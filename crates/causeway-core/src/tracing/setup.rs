//! Global log subscriber.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding filter directives, e.g.
/// `CAUSEWAY_LOG=causeway_analysis::tagger=debug,causeway_analysis=info`.
pub const LOG_ENV_VAR: &str = "CAUSEWAY_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

static INIT: Once = Once::new();

/// Filter read from [`LOG_ENV_VAR`]; `info` when unset or unparsable.
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the subscriber. Only the first call does anything, and a
/// subscriber installed elsewhere (a test harness, an embedding binary)
/// is left in place.
///
/// Lines carry the thread name, so matcher workers show up as
/// `causeway-matcher-N`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_thread_names(true))
            .with(log_filter())
            .try_init();
    });
}
