//! Shared helpers for the rps-backend integration tests.
//!
//! - [`logging`]: idempotent tracing initialisation for test binaries
//! - [`ws_client`]: a small JSON-envelope websocket client built on tokio-tungstenite
//! - [`unique_name`]: collision-free display names for concurrently running tests

pub mod logging;
pub mod ws_client;

use ulid::Ulid;

pub use ws_client::WebSocketClient;

/// Generate a unique display name with the given prefix.
///
/// ```
/// use rps_test_support::unique_name;
///
/// let a = unique_name("alice");
/// let b = unique_name("alice");
/// assert_ne!(a, b);
/// assert!(a.starts_with("alice-"));
/// ```
pub fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}
