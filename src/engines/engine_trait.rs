//! Collaborator abstraction layer.
//!
//! The rules engine never searches or evaluates. Move proposals and commentary
//! come from collaborators that only ever see an encoded position string, so
//! they can run on a background thread without touching the live board.

use std::error::Error;
use std::fmt;

pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The collaborator could not be started or is not configured.
    Unavailable(String),
    /// The collaborator answered with something that could not be understood.
    Protocol(String),
    Io(String),
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollaboratorError::Unavailable(msg) => write!(f, "collaborator unavailable: {msg}"),
            CollaboratorError::Protocol(msg) => write!(f, "collaborator protocol error: {msg}"),
            CollaboratorError::Io(msg) => write!(f, "collaborator i/o error: {msg}"),
        }
    }
}

impl Error for CollaboratorError {}

impl From<std::io::Error> for CollaboratorError {
    fn from(err: std::io::Error) -> Self {
        CollaboratorError::Io(err.to_string())
    }
}

/// Score reported alongside a proposed move, from the mover's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Centipawns(i32),
    /// Mate in the given number of moves; negative when being mated.
    MateIn(i32),
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Centipawns(cp) => write!(f, "{:+.2}", f64::from(*cp) / 100.0),
            Evaluation::MateIn(n) => write!(f, "#{n}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub movetime_ms: Option<u64>,
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchOutput {
    /// Four-character move such as `e2e4`; `None` when the collaborator has
    /// no move to offer.
    pub best_move: Option<String>,
    pub evaluation: Option<Evaluation>,
    pub info_lines: Vec<String>,
}

pub trait SearchEngine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(&mut self, fen: &str, params: &SearchParams) -> CollaboratorResult<SearchOutput>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentaryRequest {
    pub fen: String,
    pub move_text: String,
    pub evaluation: Option<Evaluation>,
}

/// Produces free text about a move. Called off the main thread.
pub trait CommentaryEngine: Send {
    fn comment(&mut self, request: &CommentaryRequest) -> CollaboratorResult<String>;
}
