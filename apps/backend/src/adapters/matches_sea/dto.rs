//! DTOs for matches_sea adapter.

/// DTO for inserting a finished match.
#[derive(Debug, Clone)]
pub struct MatchCreate {
    pub session_id: String,
    pub player1_id: Option<i64>,
    pub player2_id: Option<i64>,
    pub player1_name: String,
    pub player2_name: String,
    pub player1_score: i32,
    pub player2_score: i32,
    pub winner_id: Option<i64>,
    pub winner_seat: Option<i16>,
    pub end_reason: String,
    pub rounds_played: i32,
}

/// DTO for one round row of a match.
#[derive(Debug, Clone)]
pub struct MatchRoundCreate {
    pub match_id: i32,
    pub round_number: i32,
    pub player1_choice: Option<String>,
    pub player2_choice: Option<String>,
    pub winner_id: Option<i64>,
    pub result: String,
    pub reason: String,
}
