//! Canonical chess-rule constants.
//!
//! Stores the standard starting position and the fixed castling geometry
//! shared by legal-move generation, move application, and position encoding.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Column the king starts on.
pub const KING_HOME_COL: u8 = 4;

/// One castling pattern, expressed in columns on the king's home row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePattern {
    pub king_to: u8,
    pub rook_from: u8,
    pub rook_to: u8,
    /// Columns strictly between king and rook; all must be empty.
    pub between: &'static [u8],
    /// Columns the king crosses or lands on; none may be attacked.
    pub king_path: &'static [u8],
}

pub const KINGSIDE: CastlePattern = CastlePattern {
    king_to: 6,
    rook_from: 7,
    rook_to: 5,
    between: &[5, 6],
    king_path: &[5, 6],
};

pub const QUEENSIDE: CastlePattern = CastlePattern {
    king_to: 2,
    rook_from: 0,
    rook_to: 3,
    between: &[1, 2, 3],
    king_path: &[3, 2],
};

pub const CASTLE_PATTERNS: [CastlePattern; 2] = [KINGSIDE, QUEENSIDE];

/// Castling pattern whose king destination column is `king_to`.
#[inline]
pub fn castle_pattern_for(king_to: u8) -> Option<CastlePattern> {
    CASTLE_PATTERNS.into_iter().find(|p| p.king_to == king_to)
}
