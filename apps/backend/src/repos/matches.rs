//! Match history: the record handed over when a session ends, and the stores
//! that accept it.

use async_trait::async_trait;
use parking_lot::Mutex;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;

use crate::adapters::matches_sea as matches_adapter;
use crate::domain::{
    EndReason, MatchSummary, Move, ResolutionReason, RoundOutcome, RoundWinner, Seat, SEATS,
};
use crate::errors::domain::DomainError;
use crate::game::ids::RoomId;

/// Who took a recorded round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundVerdict {
    Player1,
    Player2,
    Draw,
    None,
}

impl RoundVerdict {
    pub const fn as_str(self) -> &'static str {
        match self {
            RoundVerdict::Player1 => "player1",
            RoundVerdict::Player2 => "player2",
            RoundVerdict::Draw => "draw",
            RoundVerdict::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round_number: u32,
    pub player1_choice: Option<Move>,
    pub player2_choice: Option<Move>,
    pub winner_id: Option<i64>,
    pub result: RoundVerdict,
    pub reason: ResolutionReason,
}

/// Persistence payload for one finished match. Seat `First` is player 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub session_id: RoomId,
    pub player1_id: Option<i64>,
    pub player2_id: Option<i64>,
    pub player1_name: String,
    pub player2_name: String,
    pub player1_score: u32,
    pub player2_score: u32,
    pub winner_id: Option<i64>,
    pub winner_seat: Option<Seat>,
    pub end_reason: EndReason,
    pub rounds_played: u32,
    pub rounds: Vec<RoundRecord>,
}

impl MatchRecord {
    pub fn from_summary(
        session_id: RoomId,
        names: [String; SEATS],
        player_ids: [Option<i64>; SEATS],
        summary: &MatchSummary,
    ) -> Self {
        let [player1_name, player2_name] = names;
        let id_of = |seat: Seat| player_ids[seat.index()];
        let winner_seat = summary.result.winner();

        let rounds = summary
            .history
            .iter()
            .map(|outcome: &RoundOutcome| {
                let (result, winner_id) = match outcome.winner {
                    RoundWinner::Seat(Seat::First) => (RoundVerdict::Player1, id_of(Seat::First)),
                    RoundWinner::Seat(Seat::Second) => {
                        (RoundVerdict::Player2, id_of(Seat::Second))
                    }
                    RoundWinner::Draw => (RoundVerdict::Draw, None),
                    RoundWinner::NoContest => (RoundVerdict::None, None),
                };
                RoundRecord {
                    round_number: outcome.round_no,
                    player1_choice: outcome.move_of(Seat::First),
                    player2_choice: outcome.move_of(Seat::Second),
                    winner_id,
                    result,
                    reason: outcome.reason,
                }
            })
            .collect();

        Self {
            session_id,
            player1_id: player_ids[0],
            player2_id: player_ids[1],
            player1_name,
            player2_name,
            player1_score: summary.scores[0],
            player2_score: summary.scores[1],
            winner_id: winner_seat.and_then(id_of),
            winner_seat,
            end_reason: summary.end_reason,
            rounds_played: summary.rounds_played,
            rounds,
        }
    }
}

/// Sink for finished matches. Called once per session, fire-and-forget.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Short label reported by the health endpoint.
    fn kind(&self) -> &'static str;

    async fn record(&self, record: MatchRecord) -> Result<(), DomainError>;
}

/// Stores matches in `matches` / `match_rounds` through sea-orm.
#[derive(Debug, Clone)]
pub struct SeaMatchStore {
    db: DatabaseConnection,
}

impl SeaMatchStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl MatchStore for SeaMatchStore {
    fn kind(&self) -> &'static str {
        "database"
    }

    async fn record(&self, record: MatchRecord) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let row = matches_adapter::create_match(
            &txn,
            matches_adapter::MatchCreate {
                session_id: record.session_id.to_string(),
                player1_id: record.player1_id,
                player2_id: record.player2_id,
                player1_name: record.player1_name,
                player2_name: record.player2_name,
                player1_score: record.player1_score as i32,
                player2_score: record.player2_score as i32,
                winner_id: record.winner_id,
                winner_seat: record.winner_seat.map(|seat| seat.index() as i16 + 1),
                end_reason: record.end_reason.as_str().to_string(),
                rounds_played: record.rounds_played as i32,
            },
        )
        .await?;

        for round in record.rounds {
            matches_adapter::create_round(
                &txn,
                matches_adapter::MatchRoundCreate {
                    match_id: row.id,
                    round_number: round.round_number as i32,
                    player1_choice: round.player1_choice.map(|m| m.as_str().to_string()),
                    player2_choice: round.player2_choice.map(|m| m.as_str().to_string()),
                    winner_id: round.winner_id,
                    result: round.result.as_str().to_string(),
                    reason: round.reason.as_str().to_string(),
                },
            )
            .await?;
        }

        txn.commit().await?;
        Ok(())
    }
}

/// Keeps records in process memory. Used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    records: Mutex<Vec<MatchRecord>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<MatchRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn record(&self, record: MatchRecord) -> Result<(), DomainError> {
        self.records.lock().push(record);
        Ok(())
    }
}
