//! Round outcomes: who won a round and why it was resolved.

use serde::Serialize;

use crate::domain::judge::{judge, Verdict};
use crate::domain::moves::Move;
use crate::domain::state::{Seat, SEATS};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionReason {
    AllMovesIn,
    Timeout,
}

impl ResolutionReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResolutionReason::AllMovesIn => "all_moves_in",
            ResolutionReason::Timeout => "timeout",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RoundWinner {
    Seat(Seat),
    Draw,
    /// Neither player moved.
    NoContest,
}

/// Per-seat view of a round result.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatResult {
    Win,
    Lose,
    Draw,
    WinByDefault,
    NoMove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub round_no: u32,
    pub moves: [Option<Move>; SEATS],
    pub reason: ResolutionReason,
    pub winner: RoundWinner,
}

impl RoundOutcome {
    pub fn move_of(&self, seat: Seat) -> Option<Move> {
        self.moves[seat.index()]
    }

    pub fn result_for(&self, seat: Seat) -> SeatResult {
        match self.winner {
            RoundWinner::Draw => SeatResult::Draw,
            RoundWinner::NoContest => SeatResult::NoMove,
            RoundWinner::Seat(w) if w == seat => {
                if self.move_of(seat.other()).is_none() {
                    SeatResult::WinByDefault
                } else {
                    SeatResult::Win
                }
            }
            RoundWinner::Seat(_) => match self.move_of(seat) {
                Some(_) => SeatResult::Lose,
                None => SeatResult::NoMove,
            },
        }
    }
}

/// Decide a round from whatever moves were collected.
///
/// Both moved: judged. One moved: the mover wins by default. None: no contest.
pub fn resolve_round(
    round_no: u32,
    moves: [Option<Move>; SEATS],
    reason: ResolutionReason,
) -> RoundOutcome {
    let winner = match (moves[0], moves[1]) {
        (Some(a), Some(b)) => match judge(a, b) {
            Verdict::FirstWins => RoundWinner::Seat(Seat::First),
            Verdict::SecondWins => RoundWinner::Seat(Seat::Second),
            Verdict::Draw => RoundWinner::Draw,
        },
        (Some(_), None) => RoundWinner::Seat(Seat::First),
        (None, Some(_)) => RoundWinner::Seat(Seat::Second),
        (None, None) => RoundWinner::NoContest,
    };
    RoundOutcome {
        round_no,
        moves,
        reason,
        winner,
    }
}
