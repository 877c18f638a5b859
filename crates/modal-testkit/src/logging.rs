//! Test logging

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static TEST_TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
});

/// Install a test-captured subscriber once per process; `RUST_LOG` applies
pub fn init_test_tracing() {
    Lazy::force(&TEST_TRACING);
}
