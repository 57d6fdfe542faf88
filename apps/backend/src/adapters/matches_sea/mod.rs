//! SeaORM adapter for the match history store.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{match_rounds, matches};

pub mod dto;

pub use dto::{MatchCreate, MatchRoundCreate};

/// Insert a match row
pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchCreate,
) -> Result<matches::Model, sea_orm::DbErr> {
    let row = matches::ActiveModel {
        id: sea_orm::NotSet,
        session_id: Set(dto.session_id),
        player1_id: Set(dto.player1_id),
        player2_id: Set(dto.player2_id),
        player1_name: Set(dto.player1_name),
        player2_name: Set(dto.player2_name),
        player1_score: Set(dto.player1_score),
        player2_score: Set(dto.player2_score),
        winner_id: Set(dto.winner_id),
        winner_seat: Set(dto.winner_seat),
        end_reason: Set(dto.end_reason),
        rounds_played: Set(dto.rounds_played),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    row.insert(conn).await
}

/// Insert one round row
pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchRoundCreate,
) -> Result<match_rounds::Model, sea_orm::DbErr> {
    let row = match_rounds::ActiveModel {
        id: sea_orm::NotSet,
        match_id: Set(dto.match_id),
        round_number: Set(dto.round_number),
        player1_choice: Set(dto.player1_choice),
        player2_choice: Set(dto.player2_choice),
        winner_id: Set(dto.winner_id),
        result: Set(dto.result),
        reason: Set(dto.reason),
    };

    row.insert(conn).await
}

/// Find a match by the realtime session id
pub async fn find_by_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: &str,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::SessionId.eq(session_id))
        .one(conn)
        .await
}

/// Rounds of a match ordered by round number
pub async fn find_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i32,
) -> Result<Vec<match_rounds::Model>, sea_orm::DbErr> {
    match_rounds::Entity::find()
        .filter(match_rounds::Column::MatchId.eq(match_id))
        .order_by_asc(match_rounds::Column::RoundNumber)
        .all(conn)
        .await
}

pub async fn count_matches<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    matches::Entity::find().count(conn).await
}
