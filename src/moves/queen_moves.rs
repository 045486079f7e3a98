use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::sliding_moves::{slide_moves, DIAGONALS, ORTHOGONALS};

pub fn queen_moves(game_state: &GameState, piece: Piece, from: Square, out: &mut Vec<Square>) {
    slide_moves(game_state, piece, from, &ORTHOGONALS, out);
    slide_moves(game_state, piece, from, &DIAGONALS, out);
}

#[cfg(test)]
mod tests {
    use super::queen_moves;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
    use crate::game_state::game_state::GameState;

    #[test]
    fn queen_combines_rook_and_bishop_rays() {
        let game = GameState::new_empty();
        let d4 = Square::new(4, 3).expect("d4 is on the board");
        let mut out = Vec::new();
        queen_moves(&game, Piece::new(Color::Light, PieceKind::Queen), d4, &mut out);
        assert_eq!(out.len(), 27);
    }
}
