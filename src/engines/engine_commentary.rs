//! Built-in commentary collaborator.
//!
//! Names the side that moved and, when the search reported one, the score.

use crate::engines::engine_trait::{
    CollaboratorError, CollaboratorResult, CommentaryEngine, CommentaryRequest, Evaluation,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreCommentary;

impl CommentaryEngine for ScoreCommentary {
    fn comment(&mut self, request: &CommentaryRequest) -> CollaboratorResult<String> {
        // The position is taken after the move, so the mover is the side not
        // to move.
        let mover = match request.fen.split_whitespace().nth(1) {
            Some("w") => "black",
            Some("b") => "white",
            _ => {
                return Err(CollaboratorError::Protocol(format!(
                    "no side to move in '{}'",
                    request.fen
                )))
            }
        };

        let mut text = format!("{mover} played {}", request.move_text);
        match request.evaluation {
            Some(Evaluation::MateIn(n)) if n > 0 => text.push_str(&format!(", mate in {n}")),
            Some(Evaluation::MateIn(n)) => text.push_str(&format!(", mated in {}", n.unsigned_abs())),
            Some(eval) => text.push_str(&format!(", score {eval}")),
            None => {}
        }
        Ok(text)
    }
}
