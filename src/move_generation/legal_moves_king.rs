use crate::game_state::chess_rules::{CASTLE_PATTERNS, KING_HOME_COL};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_cell_attacked, is_king_in_check};

/// Castling destinations available to `king` on `from`.
///
/// Requires an unmoved king on its home square and not in check, an unmoved
/// rook in the corner, empty squares between them, and no attack on the
/// squares the king crosses or lands on. The rook's own path may be attacked.
pub fn castling_moves(game_state: &GameState, king: Piece, from: Square, out: &mut Vec<Square>) {
    if king.kind != PieceKind::King || king.has_moved {
        return;
    }
    if from.row != king.color.back_row() || from.col != KING_HOME_COL {
        return;
    }
    if is_king_in_check(game_state, king.color) {
        return;
    }

    let row = from.row;
    for pattern in CASTLE_PATTERNS {
        let rook_sq = Square { row, col: pattern.rook_from };
        let rook_ready = game_state.piece_at(rook_sq).is_some_and(|p| {
            p.kind == PieceKind::Rook && p.color == king.color && !p.has_moved
        });
        if !rook_ready {
            continue;
        }

        let path_clear = pattern
            .between
            .iter()
            .all(|&col| game_state.is_empty(Square { row, col }));
        if !path_clear {
            continue;
        }

        let path_safe = pattern
            .king_path
            .iter()
            .all(|&col| !is_cell_attacked(game_state, Square { row, col }, king.color));
        if path_safe {
            out.push(Square {
                row,
                col: pattern.king_to,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::castling_moves;
    use crate::game_state::chess_types::Square;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    fn castles(fen: &str, king: &str) -> Vec<Square> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let from = algebraic_to_square(king).expect("king square");
        let piece = game.piece_at(from).expect("king should be present");
        let mut out = Vec::new();
        castling_moves(&game, piece, from, &mut out);
        out
    }

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn both_sides_available_on_open_back_rank() {
        let out = castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1");
        assert_eq!(out, vec![sq("g1"), sq("c1")]);
        let out = castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "e8");
        assert_eq!(out, vec![sq("g8"), sq("c8")]);
    }

    #[test]
    fn no_castling_without_rights() {
        assert!(castles("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1", "e1").is_empty());
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w Kkq - 0 1", "e1"), vec![sq("g1")]);
    }

    #[test]
    fn no_castling_through_or_into_attack() {
        // Rook on f8 covers f1.
        assert_eq!(castles("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1"), vec![sq("c1")]);
        // Rook on c8 covers the destination c1.
        assert_eq!(castles("2r1k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1"), vec![sq("g1")]);
    }

    #[test]
    fn pawn_diagonal_onto_empty_square_does_not_block_castling() {
        // The e2 pawn's raw moves are d1/f1 captures only if occupied.
        assert_eq!(castles("4k3/8/8/8/8/8/4p3/4K2R w K - 0 1", "e1"), vec![sq("g1")]);
    }

    #[test]
    fn pawn_push_onto_king_path_blocks_castling() {
        // The g2 pawn can push to g1.
        assert!(castles("4k3/8/8/8/8/8/6p1/4K2R w K - 0 1", "e1").is_empty());
    }

    #[test]
    fn attacked_rook_path_does_not_matter() {
        // b1 is attacked but the king never crosses it.
        assert_eq!(
            castles("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1", "e1"),
            vec![sq("c1")]
        );
    }

    #[test]
    fn no_castling_out_of_check_or_through_pieces() {
        assert!(castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1").is_empty());
        assert!(castles("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1", "e1").is_empty());
    }
}
