use std::sync::Arc;

use actix::prelude::*;
use async_trait::async_trait;

use crate::domain::EndReason;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::errors::ErrorCode;
use crate::game::ids::{ConnId, RoomId};
use crate::game::lobby::{ClientCommand, Connect, Disconnect, GetStats, Lobby};
use crate::game::test_support::{error_codes, fast_config, infos, settle};
use crate::game::transport::recording::RecordingTransport;
use crate::game::transport::Transport;
use crate::repos::{InMemoryMatchStore, MatchRecord, MatchStore};
use crate::ws::protocol::{ClientMsg, JoinPayload, MovePayload, ServerMsg};

struct Harness {
    lobby: Addr<Lobby>,
    transport: Arc<RecordingTransport>,
    store: Arc<InMemoryMatchStore>,
}

impl Harness {
    fn start(max_rounds: u32) -> Self {
        let transport = Arc::new(RecordingTransport::new());
        let store = Arc::new(InMemoryMatchStore::new());
        let shared: Arc<dyn Transport> = transport.clone();
        let lobby = Lobby::new(fast_config(max_rounds), shared, store.clone()).start();
        Self {
            lobby,
            transport,
            store,
        }
    }

    async fn connect(&self) -> ConnId {
        let conn = ConnId::new();
        self.lobby.send(Connect { conn }).await.unwrap();
        conn
    }

    async fn command(&self, conn: ConnId, msg: ClientMsg) {
        self.lobby.send(ClientCommand { conn, msg }).await.unwrap();
    }

    async fn join(&self, conn: ConnId, name: &str) {
        self.command(
            conn,
            ClientMsg::Join(JoinPayload {
                display_name: Some(name.to_string()),
                player_id: None,
            }),
        )
        .await;
    }

    async fn play(&self, conn: ConnId, session: RoomId, choice: &str) {
        self.command(
            conn,
            ClientMsg::Move(MovePayload {
                session_id: session.to_string(),
                choice: choice.to_string(),
            }),
        )
        .await;
    }

    fn session_of(&self, conn: ConnId) -> RoomId {
        self.transport
            .sent_to(conn)
            .into_iter()
            .find_map(|m| match m {
                ServerMsg::MatchFound { session_id, .. } => Some(session_id),
                _ => None,
            })
            .expect("matched")
    }

    fn opponent_name(&self, conn: ConnId) -> String {
        self.transport
            .sent_to(conn)
            .into_iter()
            .find_map(|m| match m {
                ServerMsg::MatchFound { opponent, .. } => Some(opponent),
                _ => None,
            })
            .expect("matched")
    }
}

#[actix_web::test]
async fn connect_sends_welcome_with_client_id() {
    let h = Harness::start(1);
    let conn = h.connect().await;

    assert_eq!(
        h.transport.sent_to(conn),
        vec![ServerMsg::Info {
            message: "Connected to game server".to_string(),
            client_id: Some(conn),
        }]
    );
    assert_eq!(h.lobby.send(GetStats).await.unwrap().connections, 1);
}

#[actix_web::test]
async fn two_joins_create_a_session() {
    let h = Harness::start(3);
    let a = h.connect().await;
    let b = h.connect().await;

    h.join(a, "alice").await;
    match h.transport.last_for(a).unwrap() {
        ServerMsg::WaitingForOpponent { position, .. } => assert_eq!(position, 1),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(h.lobby.send(GetStats).await.unwrap().queued, 1);

    h.join(b, "bob").await;
    settle(10).await;

    assert_eq!(
        h.transport.events_for(b),
        vec!["INFO", "WAITING_FOR_OPPONENT", "MATCH_FOUND", "GAME_START"]
    );
    assert_eq!(h.opponent_name(a), "bob");
    assert_eq!(h.opponent_name(b), "alice");
    assert_eq!(h.session_of(a), h.session_of(b));

    match h
        .transport
        .sent_to(a)
        .into_iter()
        .find(|m| m.event() == "MATCH_FOUND")
        .unwrap()
    {
        ServerMsg::MatchFound { you, players, .. } => {
            assert_eq!(you, a);
            assert_eq!(players.len(), 2);
            assert_eq!(players[0].connection_id, a);
            assert_eq!(players[1].display_name, "bob");
        }
        other => panic!("unexpected {other:?}"),
    }

    let stats = h.lobby.send(GetStats).await.unwrap();
    assert_eq!(stats.queued, 0);
    assert_eq!(stats.sessions, 1);
}

#[actix_web::test]
async fn pairing_is_first_in_first_out() {
    let h = Harness::start(3);
    let mut conns = Vec::new();
    for name in ["p1", "p2", "p3", "p4", "p5"] {
        let conn = h.connect().await;
        h.join(conn, name).await;
        conns.push(conn);
    }

    assert_eq!(h.opponent_name(conns[0]), "p2");
    assert_eq!(h.opponent_name(conns[2]), "p4");
    assert!(!h.transport.events_for(conns[4]).contains(&"MATCH_FOUND"));

    let stats = h.lobby.send(GetStats).await.unwrap();
    assert_eq!(stats.sessions, 2);
    assert_eq!(stats.queued, 1);
}

#[actix_web::test]
async fn join_is_rejected_when_already_queued_or_playing() {
    let h = Harness::start(3);
    let a = h.connect().await;
    let b = h.connect().await;

    h.join(a, "alice").await;
    h.join(a, "alice").await;
    assert_eq!(error_codes(&h.transport, a), vec![ErrorCode::AlreadyQueued]);

    h.join(b, "bob").await;
    h.join(b, "bob").await;
    assert_eq!(error_codes(&h.transport, b), vec![ErrorCode::AlreadyInSession]);
    assert_eq!(h.lobby.send(GetStats).await.unwrap().sessions, 1);
}

#[actix_web::test]
async fn default_display_name_comes_from_connection_id() {
    let h = Harness::start(3);
    let a = h.connect().await;
    let b = h.connect().await;
    h.command(a, ClientMsg::Join(JoinPayload::default())).await;
    h.join(b, "bob").await;

    assert_eq!(h.opponent_name(b), format!("Player-{}", a.short()));
}

#[actix_web::test]
async fn leave_replies_depend_on_location() {
    let h = Harness::start(3);
    let a = h.connect().await;

    h.command(a, ClientMsg::Leave).await;
    h.join(a, "alice").await;
    h.command(a, ClientMsg::Leave).await;

    assert_eq!(
        infos(&h.transport, a),
        vec![
            "Connected to game server".to_string(),
            "Not in queue or session".to_string(),
            "Left queue".to_string(),
        ]
    );
    assert_eq!(h.lobby.send(GetStats).await.unwrap().queued, 0);

    // Back to idle: joining again is allowed.
    h.join(a, "alice").await;
    assert!(error_codes(&h.transport, a).is_empty());
}

#[actix_web::test]
async fn moves_are_routed_only_to_own_session() {
    let h = Harness::start(3);
    let (a, b, c, d) = (
        h.connect().await,
        h.connect().await,
        h.connect().await,
        h.connect().await,
    );
    for (conn, name) in [(a, "a"), (b, "b"), (c, "c"), (d, "d")] {
        h.join(conn, name).await;
    }
    settle(60).await;

    let other_session = h.session_of(c);
    h.play(a, other_session, "rock").await;
    h.command(
        a,
        ClientMsg::Move(MovePayload {
            session_id: "not-a-session".to_string(),
            choice: "rock".to_string(),
        }),
    )
    .await;
    h.play(a, RoomId::new(), "rock").await;

    assert_eq!(
        error_codes(&h.transport, a),
        vec![
            ErrorCode::NotInSession,
            ErrorCode::SessionNotFound,
            ErrorCode::SessionNotFound,
        ]
    );

    h.play(a, h.session_of(a), "rock").await;
    settle(10).await;
    assert_eq!(h.transport.last_for(a).unwrap().event(), "MOVE_CONFIRMED");
}

#[actix_web::test]
async fn move_burst_from_one_seat_does_not_drop_the_other() {
    let h = Harness::start(3);
    let a = h.connect().await;
    let b = h.connect().await;
    h.join(a, "alice").await;
    h.join(b, "bob").await;
    settle(60).await;

    let session = h.session_of(a);
    let choice = |choice: &str| {
        ClientMsg::Move(MovePayload {
            session_id: session.to_string(),
            choice: choice.to_string(),
        })
    };
    for _ in 0..30 {
        h.lobby.do_send(ClientCommand {
            conn: a,
            msg: choice("rock"),
        });
    }
    h.lobby.do_send(ClientCommand {
        conn: b,
        msg: choice("paper"),
    });
    settle(100).await;

    assert!(error_codes(&h.transport, a).is_empty());
    assert!(error_codes(&h.transport, b).is_empty());
    let duplicates = infos(&h.transport, a)
        .into_iter()
        .filter(|m| m == "Move already submitted for this round")
        .count();
    assert_eq!(duplicates, 29);
    assert!(h.transport.events_for(b).contains(&"MOVE_CONFIRMED"));

    match h
        .transport
        .sent_to(a)
        .into_iter()
        .find(|m| m.event() == "ROUND_RESULT")
        .unwrap()
    {
        ServerMsg::RoundResult { winner, .. } => assert_eq!(winner, b.to_string()),
        other => panic!("unexpected {other:?}"),
    }
}

#[actix_web::test]
async fn finished_match_is_recorded_and_players_return_to_idle() {
    let h = Harness::start(1);
    let a = h.connect().await;
    let b = h.connect().await;
    h.join(a, "alice").await;
    h.join(b, "bob").await;
    settle(60).await;

    let session = h.session_of(a);
    h.play(a, session, "rock").await;
    h.play(b, session, "scissors").await;
    settle(60).await;

    assert_eq!(infos(&h.transport, b).last().map(String::as_str), Some("Room closed"));
    let records = h.store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].session_id, session);
    assert_eq!(records[0].player1_name, "alice");
    assert_eq!(records[0].player1_score, 1);
    assert_eq!(records[0].end_reason, EndReason::Completed);

    let stats = h.lobby.send(GetStats).await.unwrap();
    assert_eq!(stats.sessions, 0);

    h.join(a, "alice").await;
    assert_eq!(h.transport.last_for(a).unwrap().event(), "WAITING_FOR_OPPONENT");
}

#[actix_web::test]
async fn leaving_a_session_ends_it_for_both() {
    let h = Harness::start(3);
    let a = h.connect().await;
    let b = h.connect().await;
    h.join(a, "alice").await;
    h.join(b, "bob").await;
    settle(60).await;

    h.command(a, ClientMsg::Leave).await;
    settle(30).await;

    assert_eq!(infos(&h.transport, a).last().map(String::as_str), Some("Left session"));
    let b_events = h.transport.events_for(b);
    assert!(b_events.contains(&"OPPONENT_LEFT"));
    assert_eq!(infos(&h.transport, b).last().map(String::as_str), Some("Room closed"));

    let records = h.store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].end_reason, EndReason::PlayerLeft);
    assert_eq!(h.lobby.send(GetStats).await.unwrap().sessions, 0);
}

#[actix_web::test]
async fn disconnect_cleans_up_queue_and_sessions() {
    let h = Harness::start(3);
    let q = h.connect().await;
    h.join(q, "queued").await;
    h.lobby.send(Disconnect { conn: q }).await.unwrap();

    let stats = h.lobby.send(GetStats).await.unwrap();
    assert_eq!(stats.queued, 0);
    assert_eq!(stats.connections, 0);

    let a = h.connect().await;
    let b = h.connect().await;
    h.join(a, "alice").await;
    h.join(b, "bob").await;
    settle(60).await;

    h.transport.close(b);
    h.lobby.send(Disconnect { conn: b }).await.unwrap();
    settle(30).await;

    match h
        .transport
        .sent_to(a)
        .into_iter()
        .find(|m| m.event() == "OPPONENT_LEFT")
        .unwrap()
    {
        ServerMsg::OpponentLeft { reason, .. } => {
            assert_eq!(reason, crate::ws::protocol::LeaveReason::Disconnect)
        }
        other => panic!("unexpected {other:?}"),
    }
    let records = h.store.records();
    assert_eq!(records[0].end_reason, EndReason::PlayerDisconnected);

    let stats = h.lobby.send(GetStats).await.unwrap();
    assert_eq!(stats.sessions, 0);
    assert_eq!(stats.connections, 1);
}

struct FailingStore;

#[async_trait]
impl MatchStore for FailingStore {
    fn kind(&self) -> &'static str {
        "failing"
    }

    async fn record(&self, _record: MatchRecord) -> Result<(), DomainError> {
        Err(DomainError::infra(InfraErrorKind::DbUnavailable, "down"))
    }
}

#[actix_web::test]
async fn store_failure_does_not_disturb_the_lobby() {
    let transport = Arc::new(RecordingTransport::new());
    let shared: Arc<dyn Transport> = transport.clone();
    let lobby = Lobby::new(fast_config(1), shared, Arc::new(FailingStore)).start();

    let (a, b) = (ConnId::new(), ConnId::new());
    for conn in [a, b] {
        lobby.send(Connect { conn }).await.unwrap();
        lobby
            .send(ClientCommand {
                conn,
                msg: ClientMsg::Join(JoinPayload::default()),
            })
            .await
            .unwrap();
    }
    settle(60).await;

    lobby
        .send(ClientCommand {
            conn: a,
            msg: ClientMsg::Leave,
        })
        .await
        .unwrap();
    settle(30).await;

    let stats = lobby.send(GetStats).await.unwrap();
    assert_eq!(stats.sessions, 0);
    assert_eq!(stats.connections, 2);

    lobby
        .send(ClientCommand {
            conn: b,
            msg: ClientMsg::Join(JoinPayload::default()),
        })
        .await
        .unwrap();
    assert_eq!(transport.last_for(b).unwrap().event(), "WAITING_FOR_OPPONENT");
}
