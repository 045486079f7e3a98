//! Pawn pushes and captures.
//!
//! Pawns are the only piece whose moving and capturing patterns differ.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Raw pawn destinations: single push, double push from the home row, and
/// diagonal captures onto enemy pieces or the en-passant target.
pub fn pawn_moves(game_state: &GameState, piece: Piece, from: Square, out: &mut Vec<Square>) {
    let dir = piece.color.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if game_state.is_empty(one) {
            out.push(one);
            if from.row == piece.color.pawn_home_row() {
                if let Some(two) = one.offset(dir, 0) {
                    if game_state.is_empty(two) {
                        out.push(two);
                    }
                }
            }
        }
    }

    for target in pawn_attacks(piece.color, from) {
        let enemy_there = game_state
            .piece_at(target)
            .is_some_and(|p| p.color != piece.color);
        if enemy_there || game_state.en_passant_target == Some(target) {
            out.push(target);
        }
    }
}

/// The (up to two) diagonal squares a pawn of `color` on `from` strikes,
/// whether or not anything stands there.
pub fn pawn_attacks(color: Color, from: Square) -> impl Iterator<Item = Square> {
    let dir = color.pawn_direction();
    [-1i8, 1]
        .into_iter()
        .filter_map(move |d_col| from.offset(dir, d_col))
}
