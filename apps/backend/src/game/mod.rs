//! Realtime matchmaking and session actors.

pub mod directory;
pub mod ids;
pub mod lobby;
pub mod queue;
pub mod registry;
pub mod room;
pub mod transport;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests_lobby;

pub use ids::{ConnId, RoomId};
pub use lobby::{ClientCommand, Connect, Disconnect, GetStats, Lobby, LobbyStats};
pub use transport::{Outbound, Transport};
