//! Round state machine transitions on [`SessionState`].
//!
//! `WaitingForPlayers -> RoundActive -> RoundResolving -> (RoundActive | GameOver)`.
//! A leave can jump to `GameOver` from any non-terminal phase via [`SessionState::finish`].

use crate::domain::moves::Move;
use crate::domain::rounds::{resolve_round, ResolutionReason, RoundOutcome};
use crate::domain::scoring::apply_round_scoring;
use crate::domain::state::{Phase, Seat, SessionState, SEATS};
use crate::domain::summary::{EndReason, MatchResult, MatchSummary};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveAck {
    /// Recorded. `all_in` is true once both seats have moved.
    Accepted { all_in: bool },
    /// The seat already moved this round; the new move was dropped.
    Duplicate,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Continuation {
    NextRound,
    MatchOver,
}

impl SessionState {
    /// Begin the next round and return its number.
    pub fn start_round(&mut self) -> Result<u32, DomainError> {
        match self.phase {
            Phase::WaitingForPlayers | Phase::RoundResolving => {}
            other => {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    format!("cannot start a round in phase {other:?}"),
                ))
            }
        }
        self.round_no += 1;
        self.moves = [None; SEATS];
        self.phase = Phase::RoundActive;
        Ok(self.round_no)
    }

    /// Record a move for `seat`. The first move per seat per round wins.
    pub fn submit(&mut self, seat: Seat, mv: Move) -> Result<MoveAck, DomainError> {
        if self.phase != Phase::RoundActive {
            return Err(DomainError::validation(
                ValidationKind::RoundNotActive,
                "No round is accepting moves",
            ));
        }
        let slot = &mut self.moves[seat.index()];
        if slot.is_some() {
            return Ok(MoveAck::Duplicate);
        }
        *slot = Some(mv);
        Ok(MoveAck::Accepted {
            all_in: self.moves.iter().all(Option::is_some),
        })
    }

    /// Judge the current round, update scores and history.
    pub fn resolve(&mut self, reason: ResolutionReason) -> Result<RoundOutcome, DomainError> {
        if self.phase != Phase::RoundActive {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("cannot resolve a round in phase {:?}", self.phase),
            ));
        }
        let outcome = resolve_round(self.round_no, self.moves, reason);
        apply_round_scoring(&mut self.scores, &outcome);
        self.history.push(outcome.clone());
        self.phase = Phase::RoundResolving;
        Ok(outcome)
    }

    pub fn continuation(&self) -> Continuation {
        if self.round_no >= self.max_rounds {
            Continuation::MatchOver
        } else {
            Continuation::NextRound
        }
    }

    /// Freeze scores and move to `GameOver`.
    pub fn finish(&mut self, end_reason: EndReason) -> MatchSummary {
        self.phase = Phase::GameOver;
        MatchSummary {
            scores: self.scores,
            result: MatchResult::from_scores(self.scores),
            end_reason,
            rounds_played: self.round_no,
            history: self.history.clone(),
        }
    }
}
