//! Ray casting shared by rooks, bishops, and queens.

use crate::game_state::{chess_types::*, game_state::GameState};

pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Walks each ray, collecting empty squares, then the first occupant if it is
/// an enemy. Any occupant ends the ray.
pub fn slide_moves(
    game_state: &GameState,
    piece: Piece,
    from: Square,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in directions {
        let mut cursor = from;
        while let Some(next) = cursor.offset(d_row, d_col) {
            match game_state.piece_at(next) {
                None => out.push(next),
                Some(blocker) => {
                    if blocker.color != piece.color {
                        out.push(next);
                    }
                    break;
                }
            }
            cursor = next;
        }
    }
}
