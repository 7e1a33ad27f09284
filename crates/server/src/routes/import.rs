use axum::{body::Bytes, Extension, Json};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use archive_core::import_archive;

use crate::db::sink::PgGameSink;
use crate::error::AppError;

/// POST /api/admin/games/import
///
/// Body is the raw uploaded archive file. Bytes that are not valid UTF-8 are
/// rejected up front with a message distinct from processing failures.
pub async fn import_games(
    Extension(pool): Extension<PgPool>,
    body: Bytes,
) -> Result<Json<JsonValue>, AppError> {
    let content = std::str::from_utf8(&body)
        .map_err(|_| AppError::BadRequest("File is not valid UTF-8 text".into()))?;

    let mut sink = PgGameSink::new(pool);
    let counts = import_archive(content, &mut sink).await?;

    tracing::info!(
        games = counts.games_created,
        explanations = counts.explanations_created,
        "archive import finished"
    );

    Ok(Json(serde_json::json!({
        "games_imported": counts.games_created,
        "explanations_imported": counts.explanations_created,
    })))
}
