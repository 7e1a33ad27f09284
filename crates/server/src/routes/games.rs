use axum::{extract::Path, extract::Query, Extension, Json};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use crate::db::games;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct GamesQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/games
pub async fn get_games(
    Extension(pool): Extension<PgPool>,
    Query(q): Query<GamesQuery>,
) -> Result<Json<JsonValue>, AppError> {
    let limit = q.limit.unwrap_or(50).clamp(1, 1000);
    let offset = q.offset.unwrap_or(0).max(0);

    let games_list = games::list_games(&pool, limit, offset).await?;
    let total = games::count_games(&pool).await?;

    Ok(Json(serde_json::json!({
        "games": games_list,
        "total": total,
        "limit": limit,
        "offset": offset,
    })))
}

/// GET /api/games/{game_id}
pub async fn get_game_by_id(
    Extension(pool): Extension<PgPool>,
    Path(game_id): Path<i64>,
) -> Result<Json<JsonValue>, AppError> {
    let game = games::get_game(&pool, game_id)
        .await?
        .ok_or(AppError::NotFound("Game not found".into()))?;

    Ok(Json(game))
}

/// DELETE /api/games/{game_id}
pub async fn delete_game(
    Extension(pool): Extension<PgPool>,
    Path(game_id): Path<i64>,
) -> Result<Json<JsonValue>, AppError> {
    let deleted = games::delete_game(&pool, game_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Game not found".into()));
    }

    Ok(Json(serde_json::json!({ "deleted": game_id })))
}
