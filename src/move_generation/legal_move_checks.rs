//! Square-attack and check queries.
//!
//! Everything here is built on raw generation only. Legal-move filtering calls
//! into this module, so calling back into the legal generator would recurse.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::raw_moves;

/// Linear scan for the king of `color`. `None` disables check detection for
/// that side rather than failing.
pub fn find_king(game_state: &GameState, color: Color) -> Option<Square> {
    game_state
        .pieces_of(color)
        .find(|(_, p)| p.kind == PieceKind::King)
        .map(|(sq, _)| sq)
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = find_king(game_state, color) else {
        return false;
    };
    is_cell_attacked(game_state, king_sq, color)
}

/// True when `square` is in the raw move set of any piece of the side
/// opposing `defender`. For pawns that is pushes plus diagonal captures onto
/// an occupied enemy square or the en-passant target, never an empty diagonal.
pub fn is_cell_attacked(game_state: &GameState, square: Square, defender: Color) -> bool {
    game_state
        .pieces_of(defender.opposite())
        .any(|(from, piece)| raw_moves(game_state, piece, from).contains(&square))
}

/// Every enemy piece with `square` in its raw move set, with its location.
pub fn attackers_to_square(
    game_state: &GameState,
    square: Square,
    defender: Color,
) -> Vec<(Square, PieceKind)> {
    game_state
        .pieces_of(defender.opposite())
        .filter(|(from, piece)| raw_moves(game_state, *piece, *from).contains(&square))
        .map(|(from, piece)| (from, piece.kind))
        .collect()
}
