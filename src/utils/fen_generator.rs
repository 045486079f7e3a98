//! GameState-to-position-string encoder.
//!
//! Produces the six-field string handed to the search collaborator. Castling
//! rights are read off the moved flags, and the two clock fields are fixed
//! because they are not tracked.

use crate::game_state::chess_rules::{CASTLE_PATTERNS, KING_HOME_COL};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(game_state);
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(game_state);
    let en_passant = generate_en_passant_field(game_state.en_passant_target);

    format!("{board} {side_to_move} {castling} {en_passant} 0 1")
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for (row, cells) in game_state.board.iter().enumerate() {
        let mut empty_count = 0u8;

        for cell in cells {
            if let Some(piece) = cell {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

/// Whether `color` may still castle with the rook on `rook_col`, judged only
/// by who stands on the home squares and whether they have moved.
pub fn has_castling_right(game_state: &GameState, color: Color, rook_col: u8) -> bool {
    let row = color.back_row();
    let unmoved = |col: u8, kind: PieceKind| {
        game_state
            .piece_at(Square { row, col })
            .is_some_and(|p| p.color == color && p.kind == kind && !p.has_moved)
    };
    unmoved(KING_HOME_COL, PieceKind::King) && unmoved(rook_col, PieceKind::Rook)
}

fn generate_castling_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for color in [Color::Light, Color::Dark] {
        for pattern in CASTLE_PATTERNS {
            if has_castling_right(game_state, color, pattern.rook_from) {
                let letter = if pattern.rook_from > KING_HOME_COL { 'k' } else { 'q' };
                out.push(match color {
                    Color::Light => letter.to_ascii_uppercase(),
                    Color::Dark => letter,
                });
            }
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    let Some(square) = square else {
        return "-".to_owned();
    };

    square_to_algebraic(square).unwrap_or_else(|_| "-".to_owned())
}
