//! One actor per session. Owns the round state machine and its timer.

use std::sync::Arc;
use std::time::Duration;

use actix::prelude::*;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::domain::{
    Continuation, EndReason, MatchSummary, Move, MoveAck, ResolutionReason, RoundOutcome,
    RoundWinner, Seat, SessionState, SEATS,
};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::game::ids::{ConnId, RoomId};
use crate::game::transport::Transport;
use crate::repos::MatchRecord;
use crate::ws::protocol::{LeaveReason, PlayerResult, PlayerView, ServerMsg};

/// A seated player as known when the session was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatInfo {
    pub conn: ConnId,
    pub display_name: String,
    pub player_id: Option<i64>,
}

#[derive(Message, Debug)]
#[rtype(result = "()")]
pub struct PlayerMove {
    pub conn: ConnId,
    pub choice: String,
}

#[derive(Message, Debug)]
#[rtype(result = "()")]
pub struct PlayerLeft {
    pub conn: ConnId,
    pub reason: LeaveReason,
}

/// Sent to the lobby exactly once, right before the room stops.
#[derive(Message, Debug)]
#[rtype(result = "()")]
pub struct RoomClosed {
    pub room: RoomId,
    pub seats: [ConnId; SEATS],
    /// Seat that left or disconnected, if that is what ended the match.
    pub departed: Option<ConnId>,
    pub record: MatchRecord,
}

pub struct RoomActor {
    id: RoomId,
    seats: [SeatInfo; SEATS],
    state: SessionState,
    config: GameConfig,
    transport: Arc<dyn Transport>,
    lobby: Recipient<RoomClosed>,
    /// Start delay, round timeout or inter-round delay; never more than one.
    timer: Option<SpawnHandle>,
}

impl RoomActor {
    pub fn new(
        id: RoomId,
        seats: [SeatInfo; SEATS],
        config: GameConfig,
        transport: Arc<dyn Transport>,
        lobby: Recipient<RoomClosed>,
    ) -> Self {
        let state = SessionState::new(config.max_rounds);
        Self {
            id,
            seats,
            state,
            config,
            transport,
            lobby,
            timer: None,
        }
    }

    fn seat_of(&self, conn: ConnId) -> Option<Seat> {
        Seat::BOTH
            .into_iter()
            .find(|seat| self.seats[seat.index()].conn == conn)
    }

    fn conn_at(&self, seat: Seat) -> ConnId {
        self.seats[seat.index()].conn
    }

    pub fn players(&self) -> Vec<PlayerView> {
        Seat::BOTH
            .into_iter()
            .map(|seat| {
                let info = &self.seats[seat.index()];
                PlayerView {
                    connection_id: info.conn,
                    display_name: info.display_name.clone(),
                    player_id: info.player_id,
                    score: self.state.score(seat),
                    has_moved: self.state.has_moved(seat),
                }
            })
            .collect()
    }

    fn broadcast(&self, msg: ServerMsg) {
        for info in &self.seats {
            self.transport.send(info.conn, msg.clone());
        }
    }

    fn arm<F>(&mut self, ctx: &mut Context<Self>, after: Duration, fire: F)
    where
        F: FnOnce(&mut Self, &mut Context<Self>) + 'static,
    {
        self.disarm(ctx);
        let handle = ctx.run_later(after, move |act, ctx| {
            act.timer = None;
            fire(act, ctx);
        });
        self.timer = Some(handle);
    }

    fn disarm(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.timer.take() {
            ctx.cancel_future(handle);
        }
    }

    fn start_round(&mut self) -> Option<u32> {
        match self.state.start_round() {
            Ok(round) => Some(round),
            Err(err) => {
                warn!(session_id = %self.id, error = %err, "[ROOM] could not start round");
                None
            }
        }
    }

    /// Broadcast `ROUND_START` for the round just started and arm its timeout.
    fn announce_round(&mut self, round: u32, ctx: &mut Context<Self>) {
        let timeout = self.config.round_timeout;
        debug!(session_id = %self.id, round, "[ROOM] round started");
        self.broadcast(ServerMsg::RoundStart {
            session_id: self.id,
            round,
            timeout: timeout.as_secs(),
            timeout_ms: timeout.as_millis() as u64,
            players: self.players(),
        });
        self.arm(ctx, timeout, |act, ctx| {
            act.resolve(ResolutionReason::Timeout, ctx)
        });
    }

    fn first_round(&mut self, ctx: &mut Context<Self>) {
        if let Some(round) = self.start_round() {
            self.announce_round(round, ctx);
        }
    }

    fn resolve(&mut self, reason: ResolutionReason, ctx: &mut Context<Self>) {
        let outcome = match self.state.resolve(reason) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(session_id = %self.id, error = %err, "[ROOM] resolve skipped");
                return;
            }
        };
        info!(
            session_id = %self.id,
            round = outcome.round_no,
            reason = reason.as_str(),
            "[ROOM] round resolved"
        );
        self.broadcast(self.round_result(&outcome));

        match self.state.continuation() {
            Continuation::MatchOver => self.end_match(EndReason::Completed, ctx),
            Continuation::NextRound => {
                let delay = self.config.next_round_delay;
                self.arm(ctx, delay, |act, ctx| act.advance(ctx));
            }
        }
    }

    fn round_result(&self, outcome: &RoundOutcome) -> ServerMsg {
        let winner = match outcome.winner {
            RoundWinner::Seat(seat) => self.conn_at(seat).to_string(),
            RoundWinner::Draw => "draw".to_string(),
            RoundWinner::NoContest => "none".to_string(),
        };
        let results = Seat::BOTH
            .into_iter()
            .map(|seat| {
                let info = &self.seats[seat.index()];
                PlayerResult {
                    connection_id: info.conn,
                    display_name: info.display_name.clone(),
                    choice: outcome.move_of(seat),
                    outcome: outcome.result_for(seat),
                    score: self.state.score(seat),
                }
            })
            .collect();

        ServerMsg::RoundResult {
            session_id: self.id,
            round: outcome.round_no,
            reason: outcome.reason,
            winner,
            results,
            players: self.players(),
        }
    }

    /// After the inter-round delay: continue only if both seats are still connected.
    fn advance(&mut self, ctx: &mut Context<Self>) {
        let all_open = self
            .seats
            .iter()
            .all(|info| self.transport.is_open(info.conn));
        if !all_open {
            info!(session_id = %self.id, "[ROOM] seat gone before next round");
            self.end_match(EndReason::PlayerDisconnected, ctx);
            return;
        }

        if let Some(round) = self.start_round() {
            self.broadcast(ServerMsg::NextRound {
                session_id: self.id,
                round,
                players: self.players(),
            });
            self.announce_round(round, ctx);
        }
    }

    fn end_match(&mut self, end_reason: EndReason, ctx: &mut Context<Self>) {
        self.disarm(ctx);
        if self.state.is_over() {
            return;
        }
        let summary = self.state.finish(end_reason);
        let winner = summary.result.winner().map(|seat| self.conn_at(seat));

        self.broadcast(ServerMsg::GameEnd {
            session_id: self.id,
            reason: end_reason,
            winner,
            draw: winner.is_none(),
            rounds_played: summary.rounds_played,
            players: self.players(),
        });
        self.close(summary, None, ctx);
    }

    fn close(&mut self, summary: MatchSummary, departed: Option<ConnId>, ctx: &mut Context<Self>) {
        info!(
            session_id = %self.id,
            end_reason = summary.end_reason.as_str(),
            scores = ?summary.scores,
            "[ROOM] match over"
        );
        let record = MatchRecord::from_summary(
            self.id,
            [
                self.seats[0].display_name.clone(),
                self.seats[1].display_name.clone(),
            ],
            [self.seats[0].player_id, self.seats[1].player_id],
            &summary,
        );
        self.lobby.do_send(RoomClosed {
            room: self.id,
            seats: [self.seats[0].conn, self.seats[1].conn],
            departed,
            record,
        });
        ctx.stop();
    }
}

impl Actor for RoomActor {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            session_id = %self.id,
            first = %self.seats[0].conn,
            second = %self.seats[1].conn,
            "[ROOM] started"
        );
        let timeout = self.config.round_timeout;
        self.broadcast(ServerMsg::GameStart {
            session_id: self.id,
            round: self.state.round_no + 1,
            max_rounds: self.state.max_rounds,
            timeout: timeout.as_secs(),
            timeout_ms: timeout.as_millis() as u64,
            players: self.players(),
        });
        let delay = self.config.start_delay;
        self.arm(ctx, delay, |act, ctx| act.first_round(ctx));
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        debug!(session_id = %self.id, "[ROOM] stopped");
    }
}

impl Handler<PlayerMove> for RoomActor {
    type Result = ();

    fn handle(&mut self, msg: PlayerMove, ctx: &mut Self::Context) -> Self::Result {
        let Some(seat) = self.seat_of(msg.conn) else {
            let err =
                DomainError::conflict(ConflictKind::NotInSession, "You are not in this session");
            self.transport.send(msg.conn, ServerMsg::from(&err));
            return;
        };

        let mv = match msg.choice.parse::<Move>() {
            Ok(mv) => mv,
            Err(err) => {
                self.transport.send(msg.conn, ServerMsg::from(&err));
                return;
            }
        };

        match self.state.submit(seat, mv) {
            Err(err) => {
                self.transport.send(msg.conn, ServerMsg::from(&err));
            }
            Ok(MoveAck::Duplicate) => {
                self.transport.send(
                    msg.conn,
                    ServerMsg::info("Move already submitted for this round"),
                );
            }
            Ok(MoveAck::Accepted { all_in }) => {
                debug!(session_id = %self.id, conn_id = %msg.conn, "[ROOM] move accepted");
                self.transport.send(
                    msg.conn,
                    ServerMsg::MoveConfirmed {
                        session_id: self.id,
                        round: self.state.round_no,
                        choice: mv,
                        waiting_for_opponent: !all_in,
                    },
                );
                if all_in {
                    self.disarm(ctx);
                    self.resolve(ResolutionReason::AllMovesIn, ctx);
                }
            }
        }
    }
}

impl Handler<PlayerLeft> for RoomActor {
    type Result = ();

    fn handle(&mut self, msg: PlayerLeft, ctx: &mut Self::Context) -> Self::Result {
        let Some(seat) = self.seat_of(msg.conn) else {
            return;
        };
        if self.state.is_over() {
            return;
        }
        self.disarm(ctx);

        let end_reason = match msg.reason {
            LeaveReason::Left => EndReason::PlayerLeft,
            LeaveReason::Disconnect => EndReason::PlayerDisconnected,
        };
        let summary = self.state.finish(end_reason);
        info!(
            session_id = %self.id,
            conn_id = %msg.conn,
            reason = end_reason.as_str(),
            "[ROOM] player departed"
        );

        let message = match msg.reason {
            LeaveReason::Left => "Your opponent left the game",
            LeaveReason::Disconnect => "Your opponent disconnected",
        };
        self.transport.send(
            self.conn_at(seat.other()),
            ServerMsg::OpponentLeft {
                session_id: self.id,
                reason: msg.reason,
                message: message.to_string(),
                players: self.players(),
            },
        );
        self.close(summary, Some(msg.conn), ctx);
    }
}
