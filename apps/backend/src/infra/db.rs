use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::entities::{MatchRounds, Matches};
use crate::error::AppError;

/// Connect to `database_url` and make sure the match tables exist.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = Database::connect(database_url).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

/// Create `matches` and `match_rounds` if they are missing.
pub async fn ensure_schema<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    conn.execute(backend.build(schema.create_table_from_entity(Matches).if_not_exists()))
        .await?;
    conn.execute(backend.build(schema.create_table_from_entity(MatchRounds).if_not_exists()))
        .await?;
    Ok(())
}
