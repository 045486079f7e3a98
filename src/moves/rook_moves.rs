use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::sliding_moves::{slide_moves, ORTHOGONALS};

pub fn rook_moves(game_state: &GameState, piece: Piece, from: Square, out: &mut Vec<Square>) {
    slide_moves(game_state, piece, from, &ORTHOGONALS, out);
}
