use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::{json, Value as JsonValue};
use sqlx::PgPool;

use archive_core::{Color, NewExplanation, NewGame};

use crate::error::AppError;

type GameRow = (i64, String, String, String, String, String, DateTime<Utc>);
type ExplanationRow = (i64, i32, i32, bool, String);

/// Insert one game and return its assigned id.
pub async fn insert_game(pool: &PgPool, game: &NewGame) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"INSERT INTO games (variant_name, event, white_player, black_player, pgn)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING id"#,
    )
    .bind(&game.variant_name)
    .bind(&game.event)
    .bind(&game.white_player)
    .bind(&game.black_player)
    .bind(&game.pgn)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Insert one explanation for a game. The `(game_id, ply)` unique constraint
/// rejects duplicate plies.
pub async fn insert_explanation(
    pool: &PgPool,
    game_id: i64,
    explanation: &NewExplanation,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"INSERT INTO move_explanations (game_id, ply, move_number, color, content)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING id"#,
    )
    .bind(game_id)
    .bind(explanation.ply as i32)
    .bind(explanation.move_number as i32)
    .bind(explanation.color.is_white())
    .bind(&explanation.content)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub async fn count_games(pool: &PgPool) -> Result<i64, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM games")
        .fetch_one(pool)
        .await
        .map_err(AppError::Sqlx)?;
    Ok(count)
}

/// Paginated games, newest first, each with its explanations embedded in
/// ascending ply order.
pub async fn list_games(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<JsonValue>, AppError> {
    let games: Vec<GameRow> = sqlx::query_as(
        r#"SELECT id, variant_name, event, white_player, black_player, pgn, created_at
           FROM games
           ORDER BY id DESC
           LIMIT $1 OFFSET $2"#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .map_err(AppError::Sqlx)?;

    let ids: Vec<i64> = games.iter().map(|g| g.0).collect();

    let rows: Vec<ExplanationRow> = sqlx::query_as(
        r#"SELECT game_id, ply, move_number, color, content
           FROM move_explanations
           WHERE game_id = ANY($1)
           ORDER BY game_id, ply"#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await
    .map_err(AppError::Sqlx)?;

    let mut by_game: HashMap<i64, Vec<JsonValue>> = HashMap::new();
    for (game_id, ply, move_number, color, content) in rows {
        by_game
            .entry(game_id)
            .or_default()
            .push(explanation_json((game_id, ply, move_number, color, content)));
    }

    Ok(games
        .into_iter()
        .map(|g| {
            let explanations = by_game.remove(&g.0).unwrap_or_default();
            game_json(g, explanations)
        })
        .collect())
}

/// One game with its explanations, or None when the id is unknown.
pub async fn get_game(pool: &PgPool, game_id: i64) -> Result<Option<JsonValue>, AppError> {
    let game: Option<GameRow> = sqlx::query_as(
        r#"SELECT id, variant_name, event, white_player, black_player, pgn, created_at
           FROM games WHERE id = $1"#,
    )
    .bind(game_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::Sqlx)?;

    let Some(game) = game else {
        return Ok(None);
    };

    let rows: Vec<ExplanationRow> = sqlx::query_as(
        r#"SELECT game_id, ply, move_number, color, content
           FROM move_explanations
           WHERE game_id = $1
           ORDER BY ply"#,
    )
    .bind(game_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::Sqlx)?;

    let explanations = rows.into_iter().map(explanation_json).collect();
    Ok(Some(game_json(game, explanations)))
}

/// Delete a game; explanations cascade in the schema. Returns false when the
/// id did not exist.
pub async fn delete_game(pool: &PgPool, game_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM games WHERE id = $1")
        .bind(game_id)
        .execute(pool)
        .await
        .map_err(AppError::Sqlx)?;

    Ok(result.rows_affected() > 0)
}

fn game_json(game: GameRow, explanations: Vec<JsonValue>) -> JsonValue {
    let (id, variant_name, event, white_player, black_player, pgn, created_at) = game;
    json!({
        "id": id,
        "variant_name": variant_name,
        "event": event,
        "white_player": white_player,
        "black_player": black_player,
        "pgn": pgn,
        "created_at": created_at.to_rfc3339(),
        "explanations": explanations,
    })
}

fn explanation_json(row: ExplanationRow) -> JsonValue {
    let (_, ply, move_number, color, content) = row;
    json!({
        "ply": ply,
        "move_number": move_number,
        "color": if color { Color::White } else { Color::Black },
        "content": content,
    })
}
