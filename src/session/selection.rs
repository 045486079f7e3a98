//! Two-phase square selection.
//!
//! The first click picks up a piece of the side to move and caches its legal
//! destinations. The next on-board click either plays one of those moves or
//! drops the selection.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::legal_moves;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Off-board, or an empty/opponent square with nothing selected.
    Ignored,
    Selected {
        square: Square,
        destinations: Vec<Square>,
    },
    Moved {
        mv: Move,
        status: GameStatus,
    },
    /// A selection was dropped without moving.
    Cleared,
}

#[derive(Debug, Clone)]
struct Selection {
    square: Square,
    destinations: Vec<Square>,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: Option<Selection>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn selected_square(&self) -> Option<Square> {
        self.selected.as_ref().map(|s| s.square)
    }

    /// Cached destinations of the selected piece, empty when nothing is held.
    pub fn destinations(&self) -> &[Square] {
        self.selected
            .as_ref()
            .map(|s| s.destinations.as_slice())
            .unwrap_or(&[])
    }

    #[inline]
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn click(&mut self, game_state: &mut GameState, row: i32, col: i32) -> ClickOutcome {
        let Some(square) = board_square(row, col) else {
            return ClickOutcome::Ignored;
        };

        match self.selected.take() {
            None => self.pick_up(game_state, square),
            Some(selection) => {
                if !selection.destinations.contains(&square) {
                    return ClickOutcome::Cleared;
                }
                match apply_move(game_state, selection.square, square) {
                    Some(status) => ClickOutcome::Moved {
                        mv: Move::new(selection.square, square),
                        status,
                    },
                    None => ClickOutcome::Cleared,
                }
            }
        }
    }

    fn pick_up(&mut self, game_state: &mut GameState, square: Square) -> ClickOutcome {
        match game_state.piece_at(square) {
            Some(piece) if piece.color == game_state.side_to_move => {
                let destinations = legal_moves(game_state, square);
                self.selected = Some(Selection {
                    square,
                    destinations: destinations.clone(),
                });
                ClickOutcome::Selected {
                    square,
                    destinations,
                }
            }
            _ => ClickOutcome::Ignored,
        }
    }
}

fn board_square(row: i32, col: i32) -> Option<Square> {
    let row = u8::try_from(row).ok()?;
    let col = u8::try_from(col).ok()?;
    Square::new(row, col)
}

#[cfg(test)]
mod tests {
    use super::{ClickOutcome, SelectionController};
    use crate::game_state::chess_types::{GameState, GameStatus, Move, Square};
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("valid square")
    }

    fn click(controller: &mut SelectionController, game: &mut GameState, name: &str) -> ClickOutcome {
        let square = sq(name);
        controller.click(game, i32::from(square.row), i32::from(square.col))
    }

    #[test]
    fn select_then_move() {
        let mut game = GameState::new_game();
        let mut controller = SelectionController::new();

        match click(&mut controller, &mut game, "e2") {
            ClickOutcome::Selected { square, destinations } => {
                assert_eq!(square, sq("e2"));
                assert_eq!(destinations.len(), 2);
            }
            other => panic!("expected selection, got {other:?}"),
        }
        assert_eq!(controller.selected_square(), Some(sq("e2")));

        assert_eq!(
            click(&mut controller, &mut game, "e4"),
            ClickOutcome::Moved {
                mv: Move::new(sq("e2"), sq("e4")),
                status: GameStatus::Ongoing,
            }
        );
        assert_eq!(controller.selected_square(), None);
        assert!(controller.destinations().is_empty());
        assert!(game.piece_at(sq("e4")).is_some());
    }

    #[test]
    fn opponent_and_empty_squares_are_ignored() {
        let mut game = GameState::new_game();
        let mut controller = SelectionController::new();
        assert_eq!(click(&mut controller, &mut game, "e7"), ClickOutcome::Ignored);
        assert_eq!(click(&mut controller, &mut game, "e4"), ClickOutcome::Ignored);
        assert_eq!(controller.selected_square(), None);
    }

    #[test]
    fn illegal_destination_resets_without_moving() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let mut controller = SelectionController::new();
        click(&mut controller, &mut game, "e2");
        assert_eq!(click(&mut controller, &mut game, "e5"), ClickOutcome::Cleared);
        assert_eq!(game, before);

        // Reselecting another own piece takes two clicks.
        click(&mut controller, &mut game, "e2");
        assert_eq!(click(&mut controller, &mut game, "g1"), ClickOutcome::Cleared);
        assert!(matches!(
            click(&mut controller, &mut game, "g1"),
            ClickOutcome::Selected { .. }
        ));
    }

    #[test]
    fn off_board_click_keeps_selection() {
        let mut game = GameState::new_game();
        let mut controller = SelectionController::new();
        click(&mut controller, &mut game, "g1");
        assert_eq!(controller.click(&mut game, 8, 3), ClickOutcome::Ignored);
        assert_eq!(controller.click(&mut game, -1, 0), ClickOutcome::Ignored);
        assert_eq!(controller.selected_square(), Some(sq("g1")));
        assert!(matches!(
            click(&mut controller, &mut game, "f3"),
            ClickOutcome::Moved { .. }
        ));
    }

    #[test]
    fn piece_without_moves_can_still_be_selected() {
        let mut game = GameState::new_game();
        let mut controller = SelectionController::new();
        match click(&mut controller, &mut game, "a1") {
            ClickOutcome::Selected { destinations, .. } => assert!(destinations.is_empty()),
            other => panic!("expected selection, got {other:?}"),
        }
        assert_eq!(click(&mut controller, &mut game, "a2"), ClickOutcome::Cleared);
    }
}
