use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::king_moves::king_moves;
use crate::moves::knight_moves::knight_moves;
use crate::moves::pawn_moves::pawn_moves;
use crate::moves::queen_moves::queen_moves;
use crate::moves::rook_moves::rook_moves;

/// Pseudo-legal destinations for `piece` standing on `from`. Never checks
/// whether the mover's own king is left in check.
pub fn raw_moves(game_state: &GameState, piece: Piece, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    push_raw_moves(game_state, piece, from, &mut out);
    out
}

pub fn push_raw_moves(game_state: &GameState, piece: Piece, from: Square, out: &mut Vec<Square>) {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(game_state, piece, from, out),
        PieceKind::Knight => knight_moves(game_state, piece, from, out),
        PieceKind::Bishop => bishop_moves(game_state, piece, from, out),
        PieceKind::Rook => rook_moves(game_state, piece, from, out),
        PieceKind::Queen => queen_moves(game_state, piece, from, out),
        PieceKind::King => king_moves(game_state, piece, from, out),
    }
}

/// Square of the pawn removed by an en-passant capture, if moving `piece`
/// from `from` to `to` would be one.
#[inline]
pub fn en_passant_victim_square(
    game_state: &GameState,
    piece: Piece,
    from: Square,
    to: Square,
) -> Option<Square> {
    if piece.kind == PieceKind::Pawn && game_state.en_passant_target == Some(to) {
        Square::new(from.row, to.col)
    } else {
        None
    }
}
