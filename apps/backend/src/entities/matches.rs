use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "session_id")]
    pub session_id: String,
    #[sea_orm(column_name = "player1_id")]
    pub player1_id: Option<i64>,
    #[sea_orm(column_name = "player2_id")]
    pub player2_id: Option<i64>,
    #[sea_orm(column_name = "player1_name")]
    pub player1_name: String,
    #[sea_orm(column_name = "player2_name")]
    pub player2_name: String,
    #[sea_orm(column_name = "player1_score")]
    pub player1_score: i32,
    #[sea_orm(column_name = "player2_score")]
    pub player2_score: i32,
    #[sea_orm(column_name = "winner_id")]
    pub winner_id: Option<i64>,
    #[sea_orm(column_name = "winner_seat", column_type = "SmallInteger")]
    pub winner_seat: Option<i16>,
    #[sea_orm(column_name = "end_reason")]
    pub end_reason: String,
    #[sea_orm(column_name = "rounds_played")]
    pub rounds_played: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::match_rounds::Entity")]
    Rounds,
}

impl Related<super::match_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
