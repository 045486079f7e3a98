use crate::game_state::chess_types::*;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Encode a move as origin + destination, e.g. `e2e4`.
pub fn move_to_long_algebraic(mv: Move) -> Result<String, String> {
    let mut out = square_to_algebraic(mv.from)?;
    out.push_str(&square_to_algebraic(mv.to)?);
    Ok(out)
}

/// Decode a collaborator move string.
///
/// A trailing promotion letter is accepted and dropped: pawns always promote
/// to a queen here.
pub fn long_algebraic_to_move(long_algebraic: &str) -> Result<Move, String> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(format!("Invalid long algebraic move: {long_algebraic}"));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    if let Some(promotion) = text.chars().nth(4) {
        match PieceKind::from_letter(promotion) {
            Some(PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen) => {}
            _ => return Err(format!("Invalid promotion piece character: {promotion}")),
        }
    }

    if from == to {
        return Err(format!("Move does not change square: {long_algebraic}"));
    }

    Ok(Move::new(from, to))
}
