//! Perft node counting over make/undo.
//!
//! Exercises generation, application, and reversal together: a wrong count or
//! a position that fails to restore after undo shows up immediately.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{all_legal_moves, has_no_legal_moves};
use crate::move_generation::legal_move_undo::undo_move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf-node count only; skips the per-leaf classification done by `perft`.
pub fn perft_nodes(game_state: &mut GameState, depth: u8) -> usize {
    if depth == 0 {
        return 1;
    }

    let moves = all_legal_moves(game_state);
    if depth == 1 {
        return moves.len();
    }

    let mut nodes = 0;
    for mv in moves {
        make_move(game_state, mv.from, mv.to);
        nodes += perft_nodes(game_state, depth - 1);
        undo_move(game_state);
    }
    nodes
}

/// Full perft with move-type breakdown of the leaves.
pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in all_legal_moves(game_state) {
        make_move(game_state, mv.from, mv.to);
        if depth == 1 {
            total.merge(classify_leaf(game_state));
        } else {
            total.merge(perft(game_state, depth - 1));
        }
        undo_move(game_state);
    }
    total
}

fn classify_leaf(game_state: &mut GameState) -> PerftCounts {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };

    if let Some(record) = game_state.undo_stack.last() {
        counts.captures = usize::from(record.captured.is_some());
        counts.en_passant = usize::from(record.is_en_passant);
        counts.castles = usize::from(record.is_castle());
        counts.promotions = usize::from(record.is_promotion());
    }

    let side = game_state.side_to_move;
    if is_king_in_check(game_state, side) {
        counts.checks = 1;
        if has_no_legal_moves(game_state, side) {
            counts.checkmates = 1;
        }
    }

    counts
}
