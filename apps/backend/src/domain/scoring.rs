use crate::domain::rounds::{RoundOutcome, RoundWinner};
use crate::domain::state::SEATS;

/// Apply one round's points: winner +1, draw +1 each, no contest nothing.
pub fn apply_round_scoring(scores: &mut [u32; SEATS], outcome: &RoundOutcome) {
    match outcome.winner {
        RoundWinner::Seat(seat) => scores[seat.index()] += 1,
        RoundWinner::Draw => scores.iter_mut().for_each(|s| *s += 1),
        RoundWinner::NoContest => {}
    }
}
