use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Install a tracing subscriber for the current test process.
///
/// Uses `RUST_LOG` when set, defaulting to `warn`. Output goes through the
/// test writer so it is captured per test. Safe to call from every test.
pub fn init_tracing() {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_test_writer()
            .compact();

        let filter_layer = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}
