use serde::{Deserialize, Serialize};

/// Which side played a given ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Odd plies are White's (ply 1 = White's first move).
    pub fn from_ply(ply: u32) -> Self {
        if ply % 2 == 1 {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn is_white(self) -> bool {
        matches!(self, Color::White)
    }
}

/// Full-move counter shared by a White ply and the following Black ply.
pub fn move_number(ply: u32) -> u32 {
    ply / 2 + 1
}

/// Fields of one game as extracted from an archive block.
/// Identity is assigned by the sink on creation, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGame {
    pub variant_name: String,
    pub event: String,
    pub white_player: String,
    pub black_player: String,
    /// Opaque move text — stored verbatim, never validated as legal chess.
    pub pgn: String,
}

/// One move explanation, tied to its game by the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExplanation {
    pub ply: u32,
    pub move_number: u32,
    pub color: Color,
    pub content: String,
}

impl NewExplanation {
    /// Build an explanation with `move_number` and `color` derived from the ply,
    /// so the three can never disagree.
    pub fn from_ply(ply: u32, content: String) -> Self {
        Self {
            ply,
            move_number: move_number(ply),
            color: Color::from_ply(ply),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ply_derivation() {
        assert_eq!(move_number(1), 1);
        assert_eq!(Color::from_ply(1), Color::White);
        assert_eq!(move_number(2), 1);
        assert_eq!(Color::from_ply(2), Color::Black);
        assert_eq!(move_number(5), 3);
        assert_eq!(Color::from_ply(5), Color::White);
    }

    #[test]
    fn test_derivation_is_pure() {
        // Re-deriving from a stored ply always reproduces the original values.
        for ply in 1..200 {
            let e = NewExplanation::from_ply(ply, "x".into());
            assert_eq!(e.move_number, move_number(e.ply));
            assert_eq!(e.color, Color::from_ply(e.ply));
        }
    }

    #[test]
    fn test_color_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Color::White).unwrap(), "white");
        assert_eq!(serde_json::to_value(Color::Black).unwrap(), "black");
    }
}
