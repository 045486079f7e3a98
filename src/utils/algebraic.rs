//! Square conversions for algebraic coordinates.
//!
//! File letter is `'a' + col` and rank digit is `8 - row`, so row 0 is rank 8.
//! Used by the position encoder and to decode collaborator responses.

use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    Ok(Square {
        row: b'8' - rank,
        col: file - b'a',
    })
}

/// Convert a square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if square.row > 7 || square.col > 7 {
        return Err(format!(
            "Square out of bounds: row {} col {}",
            square.row, square.col
        ));
    }

    let file_char = char::from(b'a' + square.col);
    let rank_char = char::from(b'8' - square.row);

    Ok(format!("{file_char}{rank_char}"))
}
