//! Domain layer: pure rock-paper-scissors rules and the per-session round state machine.

pub mod judge;
pub mod moves;
pub mod rounds;
pub mod scoring;
pub mod state;
pub mod summary;
pub mod transitions;

#[cfg(test)]
mod tests_judge;
#[cfg(test)]
mod tests_props_judge;
#[cfg(test)]
mod tests_props_session;

// Re-exports for ergonomics
pub use judge::{judge, Verdict};
pub use moves::Move;
pub use rounds::{resolve_round, ResolutionReason, RoundOutcome, RoundWinner, SeatResult};
pub use state::{Phase, Seat, SessionState, SEATS};
pub use summary::{EndReason, MatchResult, MatchSummary};
pub use transitions::{Continuation, MoveAck};
