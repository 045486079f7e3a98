//! Reversal of the most recent move.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Undo the latest move. Returns `false` when there is nothing to undo.
pub fn undo_move(game_state: &mut GameState) -> bool {
    let Some(record) = game_state.undo_stack.pop() else {
        return false;
    };

    let mut restored = record.promoted_from.unwrap_or(record.moved_piece);
    restored.has_moved = record.moved_piece_had_moved;

    game_state.set_piece(record.to, None);
    if let Some((captured, at)) = record.captured {
        game_state.set_piece(at, Some(captured));
    }
    game_state.set_piece(record.from, Some(restored));

    if let Some(castle) = record.castle {
        game_state.set_piece(castle.rook_to, None);
        game_state.set_piece(
            castle.rook_from,
            Some(Piece {
                has_moved: castle.rook_had_moved,
                ..castle.rook
            }),
        );
    }

    game_state.en_passant_target = record.prev_en_passant_target;
    game_state.side_to_move = game_state.side_to_move.opposite();
    true
}

/// Undo up to `count` moves, returning how many were actually undone.
pub fn undo_moves(game_state: &mut GameState, count: usize) -> usize {
    (0..count).take_while(|_| undo_move(game_state)).count()
}
