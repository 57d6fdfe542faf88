//! Websocket gateway: one actor per socket, plus the hub that routes
//! outbound events to them.

pub mod hub;
pub mod protocol;
pub mod session;


pub use hub::WsHub;
pub use session::{upgrade, WsSession};
