use crate::game_state::{chess_types::*, game_state::GameState};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Raw knight destinations. Knights jump, so only friendly occupants block.
pub fn knight_moves(game_state: &GameState, piece: Piece, from: Square, out: &mut Vec<Square>) {
    for (d_row, d_col) in KNIGHT_OFFSETS {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        if game_state.piece_at(to).is_some_and(|p| p.color == piece.color) {
            continue;
        }
        out.push(to);
    }
}
