//! Legal move generation.
//!
//! Filters raw destinations by simulating each move in place and asking
//! whether the mover's king would be attacked, then appends castling. Also
//! answers whole-side questions: every legal move, and the game status.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_shared::{en_passant_victim_square, raw_moves};
use crate::move_generation::legal_moves_king::castling_moves;

/// Legal destinations for whatever stands on `from`; empty if nothing does.
pub fn legal_moves(game_state: &mut GameState, from: Square) -> Vec<Square> {
    match game_state.piece_at(from) {
        Some(piece) => legal_moves_for(game_state, piece, from),
        None => Vec::new(),
    }
}

/// Legal destinations for `piece` on `from`.
///
/// The board is mutated during simulation and always restored before
/// returning.
pub fn legal_moves_for(game_state: &mut GameState, piece: Piece, from: Square) -> Vec<Square> {
    let mut legal = Vec::new();

    for to in raw_moves(game_state, piece, from) {
        let victim_sq = en_passant_victim_square(game_state, piece, from, to);
        let victim = victim_sq.and_then(|sq| game_state.take_piece(sq));

        let displaced = game_state.piece_at(to);
        game_state.set_piece(to, Some(piece));
        game_state.set_piece(from, None);

        let safe = !is_king_in_check(game_state, piece.color);

        game_state.set_piece(from, Some(piece));
        game_state.set_piece(to, displaced);
        if let Some(sq) = victim_sq {
            game_state.set_piece(sq, victim);
        }

        if safe {
            legal.push(to);
        }
    }

    if piece.kind == PieceKind::King {
        castling_moves(game_state, piece, from, &mut legal);
    }

    legal
}

/// Every legal move for the side to move.
pub fn all_legal_moves(game_state: &mut GameState) -> Vec<Move> {
    let side = game_state.side_to_move;
    let own: Vec<(Square, Piece)> = game_state.pieces_of(side).collect();

    let mut moves = Vec::with_capacity(48);
    for (from, piece) in own {
        for to in legal_moves_for(game_state, piece, from) {
            moves.push(Move::new(from, to));
        }
    }
    moves
}

/// Whether `color` has no legal move at all. Stops at the first one found.
pub fn has_no_legal_moves(game_state: &mut GameState, color: Color) -> bool {
    let own: Vec<(Square, Piece)> = game_state.pieces_of(color).collect();
    own.into_iter()
        .all(|(from, piece)| legal_moves_for(game_state, piece, from).is_empty())
}

/// Whether `mv` is legal for the side to move right now: a piece of that
/// side stands on the origin and the destination is among its legal moves.
pub fn is_legal_move(game_state: &mut GameState, mv: Move) -> bool {
    match game_state.piece_at(mv.from) {
        Some(piece) if piece.color == game_state.side_to_move => {
            legal_moves_for(game_state, piece, mv.from).contains(&mv.to)
        }
        _ => false,
    }
}

/// Status of the side to move.
pub fn game_status(game_state: &mut GameState) -> GameStatus {
    let side = game_state.side_to_move;
    let in_check = is_king_in_check(game_state, side);

    if has_no_legal_moves(game_state, side) {
        if in_check {
            GameStatus::Checkmate { loser: side }
        } else {
            GameStatus::Stalemate
        }
    } else if in_check {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    }
}
