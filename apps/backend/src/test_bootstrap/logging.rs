#![cfg(test)]

//! Test logging for unit tests. Integration tests use
//! `rps_test_support::logging::init`, which behaves the same way.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Idempotent. Level comes from `TEST_LOG`, then `RUST_LOG`, else `warn`.
///
/// ```bash
/// TEST_LOG=debug cargo test -p rps-backend game::tests_room
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init()
            .ok();
    });
}
