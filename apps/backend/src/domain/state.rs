use serde::Serialize;

use crate::domain::moves::Move;
use crate::domain::rounds::RoundOutcome;

pub const SEATS: usize = 2;

/// One of the two player slots of a session, in seating order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub const BOTH: [Seat; SEATS] = [Seat::First, Seat::Second];

    pub const fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    pub const fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// Session progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Seated but no round started yet.
    WaitingForPlayers,
    /// Accepting moves for `round_no`.
    RoundActive,
    /// Round judged; waiting to start the next one or end the match.
    RoundResolving,
    /// Terminal.
    GameOver,
}

/// Everything the round state machine needs, free of timers and I/O.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: Phase,
    /// 0 before the first round; +1 per started round.
    pub round_no: u32,
    /// Moves for the current round only.
    pub moves: [Option<Move>; SEATS],
    /// Cumulative scores, indexed by [`Seat::index`].
    pub scores: [u32; SEATS],
    pub max_rounds: u32,
    pub history: Vec<RoundOutcome>,
}

impl SessionState {
    pub fn new(max_rounds: u32) -> Self {
        Self {
            phase: Phase::WaitingForPlayers,
            round_no: 0,
            moves: [None; SEATS],
            scores: [0; SEATS],
            max_rounds,
            history: Vec::new(),
        }
    }

    pub fn has_moved(&self, seat: Seat) -> bool {
        self.moves[seat.index()].is_some()
    }

    pub fn score(&self, seat: Seat) -> u32 {
        self.scores[seat.index()]
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
