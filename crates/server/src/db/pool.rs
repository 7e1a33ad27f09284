use sqlx::postgres::{PgPool, PgPoolOptions};

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run the full Postgres schema migration inline.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Imported games (one row per archive block)
CREATE TABLE IF NOT EXISTS games (
    id           BIGSERIAL PRIMARY KEY,
    variant_name TEXT NOT NULL,
    event        TEXT NOT NULL,
    white_player TEXT NOT NULL,
    black_player TEXT NOT NULL,
    pgn          TEXT NOT NULL,
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Per-ply move explanations (color: TRUE = white)
CREATE TABLE IF NOT EXISTS move_explanations (
    id          BIGSERIAL PRIMARY KEY,
    game_id     BIGINT NOT NULL REFERENCES games(id) ON DELETE CASCADE,
    ply         INTEGER NOT NULL,
    move_number INTEGER NOT NULL,
    color       BOOLEAN NOT NULL DEFAULT TRUE,
    content     TEXT NOT NULL,
    UNIQUE(game_id, ply)
);

CREATE INDEX IF NOT EXISTS idx_move_explanations_game_id
    ON move_explanations (game_id);
"#;
