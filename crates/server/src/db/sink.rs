use sqlx::PgPool;

use archive_core::{GameSink, NewExplanation, NewGame};

use crate::db::games;

/// Postgres-backed [`GameSink`]. Identity assignment and the `(game, ply)`
/// uniqueness constraint live in the schema; violations come back as sqlx
/// errors through `anyhow`.
pub struct PgGameSink {
    pool: PgPool,
}

impl PgGameSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl GameSink for PgGameSink {
    type GameId = i64;

    async fn create_game(&mut self, game: &NewGame) -> anyhow::Result<i64> {
        Ok(games::insert_game(&self.pool, game).await?)
    }

    async fn create_explanation(
        &mut self,
        game_id: i64,
        explanation: &NewExplanation,
    ) -> anyhow::Result<()> {
        games::insert_explanation(&self.pool, game_id, explanation).await?;
        Ok(())
    }
}
