//! Archive text parsing — lightweight regex-based extraction, split into three
//! independently testable phases: block splitting, metadata extraction and
//! explanation extraction.

use regex::Regex;

use crate::model::{NewExplanation, NewGame};

const GAME_DELIMITER: &str = "===JOGO===";
const GAME_TERMINATOR: &str = "===FIM===";
const EXPLANATIONS_MARKER: &str = "---EXPLICAÇÕES---";

/// Split raw archive text into game blocks, in input order.
///
/// Text before the first `===JOGO===` is preamble and dropped. A candidate
/// without a `===FIM===` terminator is dropped too (silent-skip policy);
/// otherwise the block is truncated at the first terminator.
pub fn split_blocks(content: &str) -> impl Iterator<Item = &str> {
    content
        .split(GAME_DELIMITER)
        .skip(1)
        .filter_map(|candidate| candidate.split_once(GAME_TERMINATOR).map(|(block, _)| block))
}

/// Extract the five required metadata fields from one game block.
///
/// Each label is located independently (`LABEL:` then the rest of the line,
/// first match wins), so field order inside the block does not matter. Returns
/// `None` when any label is missing or its value trims to empty — the caller
/// skips the block.
pub fn extract_metadata(block: &str) -> Option<NewGame> {
    let field = |label: &str| -> Option<String> {
        let re = Regex::new(&format!(r"{label}:\s*(.+)")).unwrap();
        let value = re.captures(block)?.get(1)?.as_str().trim();
        if value.is_empty() {
            return None;
        }
        Some(value.to_string())
    };

    Some(NewGame {
        variant_name: field("VARIANT")?,
        event: field("EVENT")?,
        white_player: field("WHITE")?,
        black_player: field("BLACK")?,
        pgn: field("PGN")?,
    })
}

/// Extract the move explanations from one game block.
///
/// A block without the `---EXPLICAÇÕES---` marker has zero explanations. After
/// the marker, each `PLY <n>:` heading owns the text up to the next heading
/// (or end of block). Bodies that trim to empty are dropped. Appearance order
/// is preserved — nothing re-sorts by ply here.
pub fn extract_explanations(block: &str) -> Result<Vec<NewExplanation>, InvalidPly> {
    let Some((_, tail)) = block.split_once(EXPLANATIONS_MARKER) else {
        return Ok(Vec::new());
    };

    let re = Regex::new(r"PLY\s+(\d+):").unwrap();
    let headings: Vec<_> = re.captures_iter(tail).collect();

    let mut explanations = Vec::new();
    for (i, cap) in headings.iter().enumerate() {
        // The pattern constrains the capture to digits, so a failed parse can
        // only mean overflow — surfaced loudly rather than skipped.
        let digits = &cap[1];
        let ply: u32 = digits.parse().map_err(|_| InvalidPly(digits.to_string()))?;

        let body_start = cap.get(0).unwrap().end();
        let body_end = headings
            .get(i + 1)
            .map(|next| next.get(0).unwrap().start())
            .unwrap_or(tail.len());

        let content = tail[body_start..body_end].trim();
        if content.is_empty() {
            continue;
        }

        explanations.push(NewExplanation::from_ply(ply, content.to_string()));
    }

    Ok(explanations)
}

/// A `PLY` heading whose number could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid ply number {0:?} in explanation heading")]
pub struct InvalidPly(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Color;

    const SINGLE_GAME: &str = "===JOGO===\n\
        VARIANT: Standard\n\
        EVENT: Test Cup\n\
        WHITE: Alice\n\
        BLACK: Bob\n\
        PGN: 1.e4 e5\n\
        ---EXPLICAÇÕES---\n\
        PLY 1: Classic opening.\n\
        PLY 2: \n\
        PLY 3: Developing a knight.\n\
        ===FIM===\n";

    #[test]
    fn test_split_drops_preamble_and_trailer() {
        let input = format!("some header junk\n{SINGLE_GAME}trailing noise\n");
        let blocks: Vec<_> = split_blocks(&input).collect();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("VARIANT: Standard"));
        assert!(!blocks[0].contains("==="));
        assert!(!blocks[0].contains("trailing noise"));
    }

    #[test]
    fn test_split_skips_unterminated_block() {
        let input = "===JOGO===\nVARIANT: A\n===JOGO===\nVARIANT: B\n===FIM===\n";
        let blocks: Vec<_> = split_blocks(input).collect();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("VARIANT: B"));
    }

    #[test]
    fn test_split_preserves_order() {
        let input = "===JOGO===\nfirst\n===FIM===\n===JOGO===\nsecond\n===FIM===\n";
        let blocks: Vec<_> = split_blocks(input).collect();
        assert!(blocks[0].contains("first"));
        assert!(blocks[1].contains("second"));
    }

    #[test]
    fn test_metadata_extraction() {
        let block = split_blocks(SINGLE_GAME).next().unwrap();
        let game = extract_metadata(block).unwrap();
        assert_eq!(game.variant_name, "Standard");
        assert_eq!(game.event, "Test Cup");
        assert_eq!(game.white_player, "Alice");
        assert_eq!(game.black_player, "Bob");
        assert_eq!(game.pgn, "1.e4 e5");
    }

    #[test]
    fn test_metadata_order_does_not_matter() {
        let block = "PGN: 1.d4\nBLACK: B\nWHITE: W\nEVENT: E\nVARIANT: V\n";
        let game = extract_metadata(block).unwrap();
        assert_eq!(game.variant_name, "V");
        assert_eq!(game.pgn, "1.d4");
    }

    #[test]
    fn test_metadata_missing_label_rejects_block() {
        for label in ["VARIANT", "EVENT", "WHITE", "BLACK", "PGN"] {
            let block = SINGLE_GAME.replace(label, "OTHER");
            assert!(extract_metadata(&block).is_none(), "missing {label}");
        }
    }

    #[test]
    fn test_metadata_values_are_trimmed() {
        let block = "VARIANT:   Fischer Random  \nEVENT: E\nWHITE: W\nBLACK: B\nPGN: 1.e4\n";
        let game = extract_metadata(block).unwrap();
        assert_eq!(game.variant_name, "Fischer Random");
    }

    #[test]
    fn test_explanations_missing_marker_is_empty() {
        let block = "VARIANT: V\nPGN: 1.e4\n";
        assert!(extract_explanations(block).unwrap().is_empty());
    }

    #[test]
    fn test_explanations_extraction_drops_empty_bodies() {
        let block = split_blocks(SINGLE_GAME).next().unwrap();
        let explanations = extract_explanations(block).unwrap();
        assert_eq!(explanations.len(), 2);

        assert_eq!(explanations[0].ply, 1);
        assert_eq!(explanations[0].move_number, 1);
        assert_eq!(explanations[0].color, Color::White);
        assert_eq!(explanations[0].content, "Classic opening.");

        assert_eq!(explanations[1].ply, 3);
        assert_eq!(explanations[1].move_number, 2);
        assert_eq!(explanations[1].color, Color::White);
        assert_eq!(explanations[1].content, "Developing a knight.");
    }

    #[test]
    fn test_explanations_span_multiple_lines() {
        let block = "---EXPLICAÇÕES---\nPLY 4: First line.\nSecond line.\nPLY 5: Next.\n";
        let explanations = extract_explanations(block).unwrap();
        assert_eq!(explanations.len(), 2);
        assert_eq!(explanations[0].content, "First line.\nSecond line.");
        assert_eq!(explanations[0].color, Color::Black);
    }

    #[test]
    fn test_explanations_keep_appearance_order() {
        let block = "---EXPLICAÇÕES---\nPLY 7: later ply first\nPLY 2: earlier ply second\n";
        let explanations = extract_explanations(block).unwrap();
        assert_eq!(explanations[0].ply, 7);
        assert_eq!(explanations[1].ply, 2);
    }

    #[test]
    fn test_explanations_overflowing_ply_fails_loudly() {
        let block = "---EXPLICAÇÕES---\nPLY 99999999999999999999: huge\n";
        assert!(extract_explanations(block).is_err());
    }
}
