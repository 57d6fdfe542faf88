pub mod match_rounds;
pub mod matches;

pub use match_rounds::Entity as MatchRounds;
pub use match_rounds::Model as MatchRound;
pub use matches::Entity as Matches;
pub use matches::Model as Match;
