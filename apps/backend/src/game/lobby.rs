//! The lobby actor: sole owner of the matchmaking queue, the session registry
//! and the connection directory.

use std::sync::Arc;

use actix::prelude::*;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::domain::Seat;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::game::directory::{ConnectionDirectory, Location};
use crate::game::ids::{ConnId, RoomId};
use crate::game::queue::MatchQueue;
use crate::game::registry::{RoomEntry, RoomRegistry};
use crate::game::room::{PlayerLeft, PlayerMove, RoomActor, RoomClosed, SeatInfo};
use crate::game::transport::Transport;
use crate::repos::MatchStore;
use crate::ws::protocol::{ClientMsg, JoinPayload, LeaveReason, MovePayload, ServerMsg};

#[derive(Message, Debug)]
#[rtype(result = "()")]
pub struct Connect {
    pub conn: ConnId,
}

/// The socket closed, cleanly or not.
#[derive(Message, Debug)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub conn: ConnId,
}

#[derive(Message, Debug)]
#[rtype(result = "()")]
pub struct ClientCommand {
    pub conn: ConnId,
    pub msg: ClientMsg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LobbyStats {
    pub connections: usize,
    pub queued: usize,
    pub sessions: usize,
}

#[derive(Message, Debug)]
#[rtype(result = "LobbyStats")]
pub struct GetStats;

pub struct Lobby {
    queue: MatchQueue,
    rooms: RoomRegistry,
    directory: ConnectionDirectory,
    transport: Arc<dyn Transport>,
    store: Arc<dyn MatchStore>,
    config: GameConfig,
}

impl Lobby {
    pub fn new(
        config: GameConfig,
        transport: Arc<dyn Transport>,
        store: Arc<dyn MatchStore>,
    ) -> Self {
        Self {
            queue: MatchQueue::new(),
            rooms: RoomRegistry::new(),
            directory: ConnectionDirectory::new(),
            transport,
            store,
            config,
        }
    }

    fn already_queued(&self, conn: ConnId) {
        self.reply_error(
            conn,
            DomainError::conflict(ConflictKind::AlreadyQueued, "Already waiting for an opponent"),
        );
    }

    fn reply_error(&self, conn: ConnId, err: DomainError) {
        debug!(conn_id = %conn, code = %err.code(), "[LOBBY] rejected");
        self.transport.send(conn, ServerMsg::from(&err));
    }

    fn join(&mut self, conn: ConnId, payload: JoinPayload, ctx: &mut Context<Self>) {
        match self.directory.location(conn) {
            Some(Location::Queued) => return self.already_queued(conn),
            Some(Location::Playing(_)) => {
                return self.reply_error(
                    conn,
                    DomainError::conflict(ConflictKind::AlreadyInSession, "Already in a session"),
                );
            }
            Some(Location::Idle) => {}
            None => self.directory.insert(conn),
        }

        self.directory
            .set_profile(conn, payload.display_name.as_deref(), payload.player_id);
        let Some(position) = self.queue.push(conn) else {
            return self.already_queued(conn);
        };
        self.directory.set_location(conn, Location::Queued);
        info!(conn_id = %conn, position, "[LOBBY] queued");

        self.transport.send(
            conn,
            ServerMsg::WaitingForOpponent {
                position,
                message: "Waiting for an opponent...".to_string(),
            },
        );
        self.pair_waiting(ctx);
    }

    fn pair_waiting(&mut self, ctx: &mut Context<Self>) {
        while let Some((first, second)) = self.queue.pop_pair() {
            self.create_room(first, second, ctx);
        }
    }

    fn seat_info(&self, conn: ConnId) -> SeatInfo {
        match self.directory.get(conn) {
            Some(record) => SeatInfo {
                conn,
                display_name: record.display_name.clone(),
                player_id: record.player_id,
            },
            None => SeatInfo {
                conn,
                display_name: crate::game::directory::default_display_name(conn),
                player_id: None,
            },
        }
    }

    fn create_room(&mut self, first: ConnId, second: ConnId, ctx: &mut Context<Self>) {
        let id = RoomId::new();
        let seats = [self.seat_info(first), self.seat_info(second)];
        let room = RoomActor::new(
            id,
            seats.clone(),
            self.config.clone(),
            self.transport.clone(),
            ctx.address().recipient(),
        );

        let players = room.players();
        for seat in Seat::BOTH {
            let me = &seats[seat.index()];
            let opponent = &seats[seat.other().index()];
            self.directory.set_location(me.conn, Location::Playing(id));
            self.transport.send(
                me.conn,
                ServerMsg::MatchFound {
                    session_id: id,
                    you: me.conn,
                    opponent: opponent.display_name.clone(),
                    players: players.clone(),
                },
            );
        }

        let addr = room.start();
        self.rooms.insert(
            id,
            RoomEntry {
                addr,
                seats: [first, second],
            },
        );
        info!(session_id = %id, first = %first, second = %second, "[LOBBY] match created");
    }

    fn submit_move(&mut self, conn: ConnId, payload: MovePayload) {
        let entry = RoomId::parse(&payload.session_id)
            .and_then(|id| self.rooms.get(id).map(|entry| (id, entry)));
        let Some((id, entry)) = entry else {
            return self.reply_error(
                conn,
                DomainError::not_found(NotFoundKind::Session, "Session not found"),
            );
        };

        if !entry.has_seat(conn) || self.directory.location(conn) != Some(Location::Playing(id)) {
            return self.reply_error(
                conn,
                DomainError::conflict(ConflictKind::NotInSession, "You are not in this session"),
            );
        }

        if !entry.addr.connected() {
            return self.reply_error(
                conn,
                DomainError::not_found(NotFoundKind::Session, "Session not found"),
            );
        }
        entry.addr.do_send(PlayerMove {
            conn,
            choice: payload.choice,
        });
    }

    fn leave(&mut self, conn: ConnId) {
        match self.directory.location(conn) {
            Some(Location::Queued) => {
                self.queue.remove(conn);
                self.directory.set_location(conn, Location::Idle);
                info!(conn_id = %conn, "[LOBBY] left queue");
                self.transport.send(conn, ServerMsg::info("Left queue"));
            }
            Some(Location::Playing(id)) => {
                self.directory.set_location(conn, Location::Idle);
                if let Some(entry) = self.rooms.get(id) {
                    entry.addr.do_send(PlayerLeft {
                        conn,
                        reason: LeaveReason::Left,
                    });
                }
                info!(conn_id = %conn, session_id = %id, "[LOBBY] left session");
                self.transport.send(conn, ServerMsg::info("Left session"));
            }
            Some(Location::Idle) | None => {
                self.transport
                    .send(conn, ServerMsg::info("Not in queue or session"));
            }
        }
    }
}

impl Actor for Lobby {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!(
            max_rounds = self.config.max_rounds,
            store = self.store.kind(),
            "[LOBBY] started"
        );
    }
}

impl Handler<Connect> for Lobby {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        self.directory.insert(msg.conn);
        debug!(conn_id = %msg.conn, "[LOBBY] connected");
        self.transport.send(
            msg.conn,
            ServerMsg::Info {
                message: "Connected to game server".to_string(),
                client_id: Some(msg.conn),
            },
        );
    }
}

impl Handler<ClientCommand> for Lobby {
    type Result = ();

    fn handle(&mut self, msg: ClientCommand, ctx: &mut Self::Context) -> Self::Result {
        match msg.msg {
            ClientMsg::Join(payload) => self.join(msg.conn, payload, ctx),
            ClientMsg::Move(payload) => self.submit_move(msg.conn, payload),
            ClientMsg::Leave => self.leave(msg.conn),
        }
    }
}

impl Handler<Disconnect> for Lobby {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        let Some(record) = self.directory.remove(msg.conn) else {
            return;
        };
        match record.location {
            Location::Queued => {
                self.queue.remove(msg.conn);
            }
            Location::Playing(id) => {
                if let Some(entry) = self.rooms.get(id) {
                    entry.addr.do_send(PlayerLeft {
                        conn: msg.conn,
                        reason: LeaveReason::Disconnect,
                    });
                }
            }
            Location::Idle => {}
        }
        debug!(conn_id = %msg.conn, "[LOBBY] disconnected");
    }
}

impl Handler<RoomClosed> for Lobby {
    type Result = ();

    fn handle(&mut self, msg: RoomClosed, _ctx: &mut Self::Context) -> Self::Result {
        self.rooms.remove(msg.room);

        for conn in msg.seats {
            if self.directory.location(conn) == Some(Location::Playing(msg.room)) {
                self.directory.set_location(conn, Location::Idle);
            }
            if Some(conn) != msg.departed && self.transport.is_open(conn) {
                self.transport.send(conn, ServerMsg::info("Room closed"));
            }
        }

        let store = self.store.clone();
        let room = msg.room;
        let record = msg.record;
        actix::spawn(async move {
            if let Err(err) = store.record(record).await {
                warn!(session_id = %room, error = %err, "[LOBBY] failed to record match");
            }
        });
        info!(session_id = %room, "[LOBBY] session removed");
    }
}

impl Handler<GetStats> for Lobby {
    type Result = MessageResult<GetStats>;

    fn handle(&mut self, _msg: GetStats, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(LobbyStats {
            connections: self.directory.len(),
            queued: self.queue.len(),
            sessions: self.rooms.len(),
        })
    }
}
