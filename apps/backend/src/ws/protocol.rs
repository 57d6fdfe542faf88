//! Wire protocol: `{ "event": ..., "payload": { ... } }` in both directions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{EndReason, Move, ResolutionReason, SeatResult};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::ErrorCode;
use crate::game::ids::{ConnId, RoomId};

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    event: String,
    #[serde(default)]
    payload: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    #[serde(default, alias = "username")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub player_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePayload {
    #[serde(alias = "roomId")]
    pub session_id: String,
    pub choice: String,
}

/// Inbound commands understood by the lobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMsg {
    Join(JoinPayload),
    Move(MovePayload),
    Leave,
}

impl ClientMsg {
    /// Parse one text frame. Event names are case-insensitive.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let raw: RawEnvelope = serde_json::from_str(text).map_err(|_| {
            DomainError::validation(
                ValidationKind::MalformedEnvelope,
                "Expected a JSON object with `event` and `payload`",
            )
        })?;

        let payload = match raw.payload {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        match raw.event.trim().to_ascii_uppercase().as_str() {
            "JOIN" => serde_json::from_value(payload).map(ClientMsg::Join).map_err(|_| {
                DomainError::validation(
                    ValidationKind::InvalidPayload,
                    "JOIN accepts displayName and playerId",
                )
            }),
            "MOVE" => serde_json::from_value(payload).map(ClientMsg::Move).map_err(|_| {
                DomainError::validation(
                    ValidationKind::InvalidPayload,
                    "MOVE requires sessionId and choice",
                )
            }),
            "LEAVE" => Ok(ClientMsg::Leave),
            other => Err(DomainError::validation(
                ValidationKind::UnknownEvent,
                format!("Unknown event: {other}"),
            )),
        }
    }
}

/// Public view of a seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub connection_id: ConnId,
    pub display_name: String,
    pub player_id: Option<i64>,
    pub score: u32,
    pub has_moved: bool,
}

/// One seat's line in a `ROUND_RESULT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    pub connection_id: ConnId,
    pub display_name: String,
    pub choice: Option<Move>,
    pub outcome: SeatResult,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveReason {
    Left,
    Disconnect,
}

/// Outbound events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "event",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum ServerMsg {
    #[serde(rename_all = "camelCase")]
    Info {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        client_id: Option<ConnId>,
    },
    Error {
        code: ErrorCode,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    WaitingForOpponent { position: usize, message: String },
    #[serde(rename_all = "camelCase")]
    MatchFound {
        session_id: RoomId,
        you: ConnId,
        opponent: String,
        players: Vec<PlayerView>,
    },
    #[serde(rename_all = "camelCase")]
    GameStart {
        session_id: RoomId,
        /// Round that opens once the start delay elapses.
        round: u32,
        max_rounds: u32,
        timeout: u64,
        timeout_ms: u64,
        players: Vec<PlayerView>,
    },
    #[serde(rename_all = "camelCase")]
    RoundStart {
        session_id: RoomId,
        round: u32,
        /// Seconds.
        timeout: u64,
        timeout_ms: u64,
        players: Vec<PlayerView>,
    },
    #[serde(rename_all = "camelCase")]
    MoveConfirmed {
        session_id: RoomId,
        round: u32,
        choice: Move,
        waiting_for_opponent: bool,
    },
    #[serde(rename_all = "camelCase")]
    RoundResult {
        session_id: RoomId,
        round: u32,
        reason: ResolutionReason,
        /// Winning connection id, `"draw"` or `"none"`.
        winner: String,
        results: Vec<PlayerResult>,
        players: Vec<PlayerView>,
    },
    #[serde(rename_all = "camelCase")]
    NextRound {
        session_id: RoomId,
        round: u32,
        players: Vec<PlayerView>,
    },
    #[serde(rename_all = "camelCase")]
    GameEnd {
        session_id: RoomId,
        reason: EndReason,
        winner: Option<ConnId>,
        draw: bool,
        rounds_played: u32,
        players: Vec<PlayerView>,
    },
    #[serde(rename_all = "camelCase")]
    OpponentLeft {
        session_id: RoomId,
        reason: LeaveReason,
        message: String,
        players: Vec<PlayerView>,
    },
}

impl ServerMsg {
    pub fn info(message: impl Into<String>) -> Self {
        ServerMsg::Info {
            message: message.into(),
            client_id: None,
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMsg::Error {
            code,
            message: message.into(),
        }
    }

    /// Event name as it appears on the wire.
    pub fn event(&self) -> &'static str {
        match self {
            ServerMsg::Info { .. } => "INFO",
            ServerMsg::Error { .. } => "ERROR",
            ServerMsg::WaitingForOpponent { .. } => "WAITING_FOR_OPPONENT",
            ServerMsg::MatchFound { .. } => "MATCH_FOUND",
            ServerMsg::GameStart { .. } => "GAME_START",
            ServerMsg::RoundStart { .. } => "ROUND_START",
            ServerMsg::MoveConfirmed { .. } => "MOVE_CONFIRMED",
            ServerMsg::RoundResult { .. } => "ROUND_RESULT",
            ServerMsg::NextRound { .. } => "NEXT_ROUND",
            ServerMsg::GameEnd { .. } => "GAME_END",
            ServerMsg::OpponentLeft { .. } => "OPPONENT_LEFT",
        }
    }
}

impl From<&DomainError> for ServerMsg {
    fn from(err: &DomainError) -> Self {
        ServerMsg::error(err.code(), err.message())
    }
}
