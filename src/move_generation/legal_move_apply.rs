//! Move execution.
//!
//! `make_move` performs the board transition and pushes an undo record;
//! `apply_move` additionally classifies the position for the new side to move.
//! Castling, en passant, and promotion are all recognised from the board here
//! rather than carried on the move.

use crate::game_state::chess_rules::castle_pattern_for;
use crate::game_state::undo_state::CastleUndo;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::game_status;

/// Apply `from -> to` and report the status of the side now to move.
///
/// Returns `None` without touching the state if `from` is empty. The caller is
/// responsible for `to` being one of the legal destinations of `from`.
pub fn apply_move(game_state: &mut GameState, from: Square, to: Square) -> Option<GameStatus> {
    if !make_move(game_state, from, to) {
        return None;
    }
    Some(game_status(game_state))
}

/// Board transition without terminal classification. Returns `false` (and
/// changes nothing) when `from` is empty.
pub fn make_move(game_state: &mut GameState, from: Square, to: Square) -> bool {
    let Some(piece) = game_state.piece_at(from) else {
        return false;
    };

    let prev_en_passant_target = game_state.en_passant_target;
    let mut captured = game_state.piece_at(to).map(|p| (p, to));
    let mut is_en_passant = false;

    let castle = if piece.kind == PieceKind::King && from.col.abs_diff(to.col) == 2 {
        relocate_castling_rook(game_state, from.row, to.col)
    } else {
        None
    };

    if piece.kind == PieceKind::Pawn && prev_en_passant_target == Some(to) {
        let victim_sq = Square {
            row: from.row,
            col: to.col,
        };
        captured = game_state.take_piece(victim_sq).map(|p| (p, victim_sq));
        is_en_passant = true;
    }

    game_state.en_passant_target = if piece.kind == PieceKind::Pawn && from.row.abs_diff(to.row) == 2 {
        Some(Square {
            row: (from.row + to.row) / 2,
            col: from.col,
        })
    } else {
        None
    };

    let mut moved = piece;
    moved.has_moved = true;
    game_state.set_piece(from, None);

    let promoted_from = if piece.kind == PieceKind::Pawn && (to.row == 0 || to.row == 7) {
        moved = Piece::new(piece.color, PieceKind::Queen);
        Some(piece)
    } else {
        None
    };
    game_state.set_piece(to, Some(moved));

    game_state.undo_stack.push(UndoState {
        from,
        to,
        moved_piece: moved,
        moved_piece_had_moved: piece.has_moved,
        captured,
        is_en_passant,
        prev_en_passant_target,
        castle,
        promoted_from,
    });

    game_state.side_to_move = game_state.side_to_move.opposite();
    true
}

fn relocate_castling_rook(game_state: &mut GameState, row: u8, king_to: u8) -> Option<CastleUndo> {
    let pattern = castle_pattern_for(king_to)?;
    let rook_from = Square {
        row,
        col: pattern.rook_from,
    };
    let rook_to = Square {
        row,
        col: pattern.rook_to,
    };

    let mut rook = game_state.take_piece(rook_from)?;
    let rook_had_moved = rook.has_moved;
    rook.has_moved = true;
    game_state.set_piece(rook_to, Some(rook));

    Some(CastleUndo {
        rook,
        rook_from,
        rook_to,
        rook_had_moved,
    })
}
