//! Import orchestration: drive the splitter and extractors over one archive
//! and hand the resulting records to a [`GameSink`].

use std::future::Future;

use crate::model::{NewExplanation, NewGame};
use crate::parser;

/// Storage abstraction the orchestrator writes through.
///
/// The sink assigns identities and enforces the `(game, ply)` uniqueness
/// constraint; a constraint violation surfaces as an error from
/// `create_explanation`. The server backs this with Postgres; tests use an
/// in-memory map.
pub trait GameSink {
    type GameId: Copy + Send;

    fn create_game(
        &mut self,
        game: &NewGame,
    ) -> impl Future<Output = anyhow::Result<Self::GameId>> + Send;

    fn create_explanation(
        &mut self,
        game_id: Self::GameId,
        explanation: &NewExplanation,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Totals returned by a successful import call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportCounts {
    pub games_created: u64,
    pub explanations_created: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    InvalidPly(#[from] parser::InvalidPly),

    /// A sink call failed. Records created earlier in the same import are not
    /// rolled back.
    #[error(transparent)]
    Sink(#[from] anyhow::Error),
}

/// Parse one archive and store every well-formed game with its explanations.
///
/// Malformed blocks (missing terminator or any metadata label) are skipped
/// without failing the call; a sink failure aborts the call immediately and
/// propagates to the caller.
pub async fn import_archive<S: GameSink>(
    content: &str,
    sink: &mut S,
) -> Result<ImportCounts, ImportError> {
    let mut counts = ImportCounts::default();

    for block in parser::split_blocks(content) {
        let Some(game) = parser::extract_metadata(block) else {
            tracing::warn!("skipping game block with incomplete metadata");
            continue;
        };

        let game_id = sink.create_game(&game).await?;
        counts.games_created += 1;
        tracing::debug!(variant = %game.variant_name, "imported game");

        for explanation in parser::extract_explanations(block)? {
            sink.create_explanation(game_id, &explanation).await?;
            counts.explanations_created += 1;
            tracing::debug!(
                ply = explanation.ply,
                move_number = explanation.move_number,
                "imported explanation"
            );
        }
    }

    Ok(counts)
}
