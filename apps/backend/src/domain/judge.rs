use crate::domain::moves::Move;

/// Result of comparing two symbols, from the first side's point of view.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Verdict {
    FirstWins,
    SecondWins,
    Draw,
}

impl Verdict {
    /// The same comparison seen from the other side.
    pub fn reversed(self) -> Self {
        match self {
            Verdict::FirstWins => Verdict::SecondWins,
            Verdict::SecondWins => Verdict::FirstWins,
            Verdict::Draw => Verdict::Draw,
        }
    }
}

/// Judge two symbols. Total over all nine pairs.
pub fn judge(first: Move, second: Move) -> Verdict {
    if first == second {
        Verdict::Draw
    } else if first.beats(second) {
        Verdict::FirstWins
    } else {
        Verdict::SecondWins
    }
}
