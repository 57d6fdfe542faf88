//! Shared fixtures for the actor tests.

use std::sync::Arc;
use std::time::Duration;

use actix::prelude::*;
use parking_lot::Mutex;

use crate::config::GameConfig;
use crate::errors::ErrorCode;
use crate::game::ids::ConnId;
use crate::game::room::RoomClosed;
use crate::game::transport::recording::RecordingTransport;
use crate::repos::MatchRecord;
use crate::ws::protocol::ServerMsg;

pub fn fast_config(max_rounds: u32) -> GameConfig {
    GameConfig {
        round_timeout: Duration::from_millis(300),
        next_round_delay: Duration::from_millis(30),
        start_delay: Duration::from_millis(20),
        max_rounds,
    }
}

pub async fn settle(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// What a room handed to its owner when it closed.
#[derive(Debug, Clone)]
pub struct ClosedRoom {
    pub departed: Option<ConnId>,
    pub record: MatchRecord,
}

/// Stands in for the lobby when a room is tested alone.
#[derive(Default, Clone)]
pub struct ClosedSink {
    pub closed: Arc<Mutex<Vec<ClosedRoom>>>,
}

impl Actor for ClosedSink {
    type Context = Context<Self>;
}

impl Handler<RoomClosed> for ClosedSink {
    type Result = ();

    fn handle(&mut self, msg: RoomClosed, _ctx: &mut Self::Context) -> Self::Result {
        self.closed.lock().push(ClosedRoom {
            departed: msg.departed,
            record: msg.record,
        });
    }
}

pub fn error_codes(transport: &RecordingTransport, conn: ConnId) -> Vec<ErrorCode> {
    transport
        .sent_to(conn)
        .into_iter()
        .filter_map(|msg| match msg {
            ServerMsg::Error { code, .. } => Some(code),
            _ => None,
        })
        .collect()
}

pub fn infos(transport: &RecordingTransport, conn: ConnId) -> Vec<String> {
    transport
        .sent_to(conn)
        .into_iter()
        .filter_map(|msg| match msg {
            ServerMsg::Info { message, .. } => Some(message),
            _ => None,
        })
        .collect()
}
