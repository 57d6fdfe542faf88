use std::sync::Arc;

use actix::prelude::*;

use crate::config::GameConfig;
use crate::game::lobby::Lobby;
use crate::game::transport::Transport;
use crate::repos::MatchStore;
use crate::ws::hub::WsHub;

/// Application state shared by every HTTP worker.
#[derive(Clone)]
pub struct AppState {
    /// Owner of the queue, sessions and connection directory.
    pub lobby: Addr<Lobby>,
    /// Socket actors by connection id; the lobby's transport.
    pub hub: Arc<WsHub>,
    pub config: GameConfig,
    pub store: Arc<dyn MatchStore>,
}

impl AppState {
    /// Start the lobby on the current arbiter. Must be called from inside a
    /// running actix system.
    pub fn start(config: GameConfig, store: Arc<dyn MatchStore>) -> Self {
        let hub = Arc::new(WsHub::new());
        let transport: Arc<dyn Transport> = hub.clone();
        let lobby = Lobby::new(config.clone(), transport, store.clone()).start();
        Self {
            lobby,
            hub,
            config,
            store,
        }
    }
}
