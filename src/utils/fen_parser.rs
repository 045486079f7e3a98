//! Position-string-to-GameState parser.
//!
//! Moved flags are not part of the notation, so they are reconstructed: kings
//! and rooks on their home squares count as unmoved only when a matching
//! castling right is present, and pawns off their starting rank count as
//! moved. The clock fields must be numeric but are otherwise ignored.

use crate::game_state::chess_rules::KING_HOME_COL;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, Copy, Default)]
struct CastlingField {
    // [color][0 = kingside, 1 = queenside]
    rights: [[bool; 2]; 2],
}

impl CastlingField {
    fn any(&self, color: Color) -> bool {
        self.rights[color.index()].iter().any(|x| *x)
    }

    fn rook_col_allowed(&self, color: Color, col: u8) -> bool {
        match col {
            7 => self.rights[color.index()][0],
            0 => self.rights[color.index()][1],
            _ => false,
        }
    }
}

pub fn parse_fen(fen: &str) -> Result<GameState, String> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or("Missing board layout in FEN")?;
    let side_part = parts.next().ok_or("Missing side-to-move in FEN")?;
    let castling_part = parts.next().ok_or("Missing castling rights in FEN")?;
    let en_passant_part = parts.next().ok_or("Missing en-passant square in FEN")?;
    let halfmove_part = parts.next().ok_or("Missing halfmove clock in FEN")?;
    let fullmove_part = parts.next().ok_or("Missing fullmove number in FEN")?;

    if parts.next().is_some() {
        return Err("FEN has extra trailing fields".to_owned());
    }

    halfmove_part
        .parse::<u16>()
        .map_err(|_| format!("Invalid halfmove clock: {halfmove_part}"))?;
    fullmove_part
        .parse::<u16>()
        .map_err(|_| format!("Invalid fullmove number: {fullmove_part}"))?;

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    let castling = parse_castling_rights(castling_part)?;
    game_state.en_passant_target = parse_en_passant_square(en_passant_part)?;

    derive_moved_flags(&mut game_state, &castling);

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("Board layout must contain 8 ranks".to_owned());
    }

    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                let step = usize::try_from(empty_count).map_err(|_| "Digit conversion failed")?;
                if !(1..=8).contains(&step) {
                    return Err(format!("Invalid empty-square count '{ch}'"));
                }
                col += step;
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| format!("Invalid piece character '{ch}' in board layout"))?;

            if col >= 8 {
                return Err("Board rank has too many files".to_owned());
            }

            game_state.board[row][col] = Some(piece);
            col += 1;
        }

        if col != 8 {
            return Err("Board rank does not sum to 8 files".to_owned());
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, String> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(format!("Invalid side-to-move field: {side_part}")),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingField, String> {
    let mut field = CastlingField::default();
    if castling_part == "-" {
        return Ok(field);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => field.rights[Color::Light.index()][0] = true,
            'Q' => field.rights[Color::Light.index()][1] = true,
            'k' => field.rights[Color::Dark.index()][0] = true,
            'q' => field.rights[Color::Dark.index()][1] = true,
            _ => return Err(format!("Invalid castling rights character: {ch}")),
        }
    }

    Ok(field)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, String> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    if square.row != 2 && square.row != 5 {
        return Err(format!("En-passant square must be on rank 3 or 6: {en_passant_part}"));
    }
    Ok(Some(square))
}

fn derive_moved_flags(game_state: &mut GameState, castling: &CastlingField) {
    for row in 0..8u8 {
        for col in 0..8u8 {
            let Some(piece) = game_state.board[row as usize][col as usize].as_mut() else {
                continue;
            };
            let on_back_row = row == piece.color.back_row();
            piece.has_moved = match piece.kind {
                PieceKind::King => !(on_back_row && col == KING_HOME_COL && castling.any(piece.color)),
                PieceKind::Rook => !(on_back_row && castling.rook_col_allowed(piece.color, col)),
                PieceKind::Pawn => row != piece.color.pawn_home_row(),
                _ => false,
            };
        }
    }
}
