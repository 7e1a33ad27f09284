//! Batch-import a game archive file into Postgres.
//!
//! Usage: cargo run --bin import-games -- <filepath>
//!
//! Requires DATABASE_URL environment variable to be set. Shares the import
//! pipeline with the admin upload endpoint.

use anyhow::{anyhow, Context, Result};
use sqlx::postgres::PgPoolOptions;

use archive_core::import_archive;
use server::db;
use server::db::sink::PgGameSink;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: import-games <filepath>")?;

    tracing::info!("Reading {path}...");
    let bytes = std::fs::read(&path).with_context(|| format!("failed to read {path}"))?;
    let content = String::from_utf8(bytes)
        .map_err(|_| anyhow!("{path} is not valid UTF-8 text and cannot be imported"))?;

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;
    db::pool::run_migrations(&pool).await?;

    let mut sink = PgGameSink::new(pool);
    let counts = import_archive(&content, &mut sink).await?;

    tracing::info!(
        "Import complete: {} games, {} explanations",
        counts.games_created,
        counts.explanations_created
    );
    Ok(())
}
