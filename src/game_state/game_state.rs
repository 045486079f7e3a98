//! Core board state representation.
//!
//! `GameState` owns the 8×8 grid of optional pieces together with the side to
//! move, the en-passant target, and the undo stack used by make/undo. There is
//! no process-wide board; every operation takes a `GameState` explicitly.

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// `board[row][col]`, row 0 is rank 8.
    pub board: [[Option<Piece>; 8]; 8],

    pub side_to_move: Color,
    /// Square skipped by the last pawn double step; valid for one move only.
    pub en_passant_target: Option<Square>,

    pub undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [[None; 8]; 8],
            side_to_move: Color::Light,
            en_passant_target: None,
            undo_stack: Vec::new(),
        }
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position, white to move.
    pub fn new_game() -> Self {
        let mut state = Self::new_empty();
        for color in [Color::Light, Color::Dark] {
            let back = color.back_row() as usize;
            let pawns = color.pawn_home_row() as usize;
            for (col, kind) in BACK_RANK.iter().enumerate() {
                state.board[back][col] = Some(Piece::new(color, *kind));
                state.board[pawns][col] = Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn starting_fen() -> &'static str {
        STARTING_POSITION_FEN
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.row as usize][square.col as usize] = piece;
    }

    #[inline]
    pub fn take_piece(&mut self, square: Square) -> Option<Piece> {
        self.board[square.row as usize][square.col as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Every occupied square with its piece, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Occupied squares holding pieces of `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.undo_stack.last().map(UndoState::as_move)
    }

    /// Board contents, turn, and en-passant target, ignoring history. Two
    /// states that compare equal here are the same position.
    pub fn same_position(&self, other: &GameState) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.en_passant_target == other.en_passant_target
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_types::{Color, PieceKind, Square};

    #[test]
    fn new_game_matches_starting_fen() {
        let game = GameState::new_game();
        let parsed = GameState::from_fen(GameState::starting_fen()).expect("starting FEN should parse");
        assert!(game.same_position(&parsed));
        assert_eq!(game.board, parsed.board);
        assert_eq!(game.pieces().count(), 32);
    }

    #[test]
    fn white_king_starts_on_e1() {
        let game = GameState::new_game();
        let e1 = Square::new(7, 4).expect("e1 is on the board");
        let king = game.piece_at(e1).expect("king should be on e1");
        assert_eq!(king.kind, PieceKind::King);
        assert_eq!(king.color, Color::Light);
        assert!(!king.has_moved);
        assert_eq!(game.pieces_of(Color::Dark).count(), 16);
    }
}
