use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "match_rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "match_id")]
    pub match_id: i32,
    #[sea_orm(column_name = "round_number")]
    pub round_number: i32,
    #[sea_orm(column_name = "player1_choice")]
    pub player1_choice: Option<String>,
    #[sea_orm(column_name = "player2_choice")]
    pub player2_choice: Option<String>,
    #[sea_orm(column_name = "winner_id")]
    pub winner_id: Option<i64>,
    pub result: String,
    pub reason: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id"
    )]
    Match,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
