use actix::prelude::*;

use crate::game::ids::ConnId;
use crate::ws::protocol::ServerMsg;

/// One outbound envelope delivered to a socket actor.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

/// Delivery of outbound events to connections.
pub trait Transport: Send + Sync {
    /// Queue `msg` for `conn`. Returns false when the connection is gone.
    fn send(&self, conn: ConnId, msg: ServerMsg) -> bool;

    fn is_open(&self, conn: ConnId) -> bool;
}
