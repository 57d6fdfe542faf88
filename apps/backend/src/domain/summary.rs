use serde::Serialize;

use crate::domain::rounds::RoundOutcome;
use crate::domain::state::{Seat, SEATS};

/// Why a session reached `GameOver`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Completed,
    PlayerLeft,
    PlayerDisconnected,
}

impl EndReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            EndReason::Completed => "completed",
            EndReason::PlayerLeft => "player_left",
            EndReason::PlayerDisconnected => "player_disconnected",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MatchResult {
    Winner(Seat),
    Draw,
}

impl MatchResult {
    /// Higher cumulative score wins; equal scores are a drawn match.
    pub fn from_scores(scores: [u32; SEATS]) -> Self {
        match scores[0].cmp(&scores[1]) {
            std::cmp::Ordering::Greater => MatchResult::Winner(Seat::First),
            std::cmp::Ordering::Less => MatchResult::Winner(Seat::Second),
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }

    pub fn winner(self) -> Option<Seat> {
        match self {
            MatchResult::Winner(seat) => Some(seat),
            MatchResult::Draw => None,
        }
    }
}

/// Produced once when a session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub scores: [u32; SEATS],
    pub result: MatchResult,
    pub end_reason: EndReason,
    /// Rounds started, including one interrupted by a leave.
    pub rounds_played: u32,
    pub history: Vec<RoundOutcome>,
}
