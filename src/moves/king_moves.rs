use crate::game_state::{chess_types::*, game_state::GameState};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Raw single-step king destinations. Castling is layered on by the legal
/// generator, never produced here.
pub fn king_moves(game_state: &GameState, piece: Piece, from: Square, out: &mut Vec<Square>) {
    for (d_row, d_col) in KING_OFFSETS {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        if game_state.piece_at(to).is_some_and(|p| p.color == piece.color) {
            continue;
        }
        out.push(to);
    }
}
