use crate::game_state::chess_types::*;

/// Rook relocation performed alongside a castling king move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleUndo {
    /// The rook as it stands after the move (flagged as moved).
    pub rook: Piece,
    pub rook_from: Square,
    pub rook_to: Square,
    pub rook_had_moved: bool,
}

/// Single undo record for `make_move` / `undo_move`.
///
/// Pushed once by the executor and consumed once by undo; never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub from: Square,
    pub to: Square,
    /// The piece standing on `to` after the move (a queen if promoted).
    pub moved_piece: Piece,
    pub moved_piece_had_moved: bool,

    /// Captured piece and the square it was taken from. For en passant the
    /// square differs from `to`.
    pub captured: Option<(Piece, Square)>,
    pub is_en_passant: bool,

    pub prev_en_passant_target: Option<Square>,

    pub castle: Option<CastleUndo>,
    /// The pawn as it was before promotion.
    pub promoted_from: Option<Piece>,
}

impl UndoState {
    #[inline]
    pub fn as_move(&self) -> Move {
        Move::new(self.from, self.to)
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.castle.is_some()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promoted_from.is_some()
    }
}
