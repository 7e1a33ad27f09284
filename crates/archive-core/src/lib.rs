//! Bulk import of plain-text game archives.
//!
//! An archive is a concatenation of `===JOGO=== ... ===FIM===` blocks, each
//! carrying five metadata fields (variant, event, players, PGN) and an optional
//! `---EXPLICAÇÕES---` section with per-ply move explanations. This crate owns
//! the parsing and the import orchestration; storage is behind the [`GameSink`]
//! trait so the HTTP server and the batch importer can plug in their own.

pub mod import;
pub mod model;
pub mod parser;

pub use import::{import_archive, GameSink, ImportCounts, ImportError};
pub use model::{Color, NewExplanation, NewGame};
