use actix::prelude::*;
use dashmap::DashMap;

use crate::game::ids::ConnId;
use crate::game::transport::{Outbound, Transport};
use crate::ws::protocol::ServerMsg;

/// Live socket actors by connection id.
#[derive(Default)]
pub struct WsHub {
    connections: DashMap<ConnId, Recipient<Outbound>>,
}

impl WsHub {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn register(&self, conn: ConnId, recipient: Recipient<Outbound>) {
        self.connections.insert(conn, recipient);
    }

    pub fn unregister(&self, conn: ConnId) {
        self.connections.remove(&conn);
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl Transport for WsHub {
    fn send(&self, conn: ConnId, msg: ServerMsg) -> bool {
        match self.connections.get(&conn) {
            Some(recipient) if recipient.connected() => {
                recipient.do_send(Outbound(msg));
                true
            }
            _ => false,
        }
    }

    fn is_open(&self, conn: ConnId) -> bool {
        self.connections
            .get(&conn)
            .map(|recipient| recipient.connected())
            .unwrap_or(false)
    }
}
