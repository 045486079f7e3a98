//! Crate root module declarations for the Chess Duel project.
//!
//! Exposes the rules engine (board state, move patterns, legal-move
//! generation), notation helpers, collaborator engines, and the game session
//! layer that front ends drive.

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_move_undo;
    pub mod legal_moves_king;
    pub mod perft;
}

pub mod engines {
    pub mod engine_commentary;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod engine_uci_process;
}

pub mod session {
    pub mod commentary_dispatch;
    pub mod config;
    pub mod game_session;
    pub mod search_dispatch;
    pub mod selection;
    pub mod session_log;
}

pub mod console {
    pub mod console_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
}
