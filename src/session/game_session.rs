//! One game between a human and, optionally, a computer collaborator.
//!
//! `GameSession` is the only owner of the live board. Collaborators run on
//! worker threads against an encoded copy of the position and their answers
//! are checked against the current board before anything is applied.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::engines::engine_trait::{
    CollaboratorResult, CommentaryEngine, CommentaryRequest, Evaluation, SearchEngine,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::{game_status, is_legal_move, legal_moves};
use crate::move_generation::legal_move_undo::undo_move;
use crate::session::commentary_dispatch::CommentaryDispatcher;
use crate::session::config::SessionConfig;
use crate::session::search_dispatch::{SearchDispatcher, SearchPoll};
use crate::session::selection::{ClickOutcome, SelectionController};
use crate::session::session_log::SessionLog;
use crate::utils::long_algebraic::{long_algebraic_to_move, move_to_long_algebraic};

pub struct GameSession {
    game_state: GameState,
    selection: SelectionController,
    config: SessionConfig,
    search: Option<SearchDispatcher>,
    commentary: Option<CommentaryDispatcher>,
    commentary_tx: Sender<CollaboratorResult<String>>,
    commentary_rx: Receiver<CollaboratorResult<String>>,
    log: SessionLog,
    status: GameStatus,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let (commentary_tx, commentary_rx) = channel();
        let log = SessionLog::with_capacity(config.log_capacity);
        Self {
            game_state: GameState::new_game(),
            selection: SelectionController::new(),
            config,
            search: None,
            commentary: None,
            commentary_tx,
            commentary_rx,
            log,
            status: GameStatus::Ongoing,
        }
    }

    pub fn with_search_engine(mut self, engine: Box<dyn SearchEngine>) -> Self {
        self.set_search_engine(engine);
        self
    }

    pub fn with_commentary(mut self, engine: Box<dyn CommentaryEngine>) -> Self {
        self.commentary = Some(CommentaryDispatcher::new(engine));
        self
    }

    /// Replace the search collaborator. Any outstanding answer from the old
    /// one is dropped with its dispatcher.
    pub fn set_search_engine(&mut self, engine: Box<dyn SearchEngine>) {
        let dispatcher = SearchDispatcher::new(engine);
        self.log
            .info(format!("search engine: {}", dispatcher.engine_name()));
        self.search = Some(dispatcher);
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Log lines added since the previous call, ready to print.
    pub fn drain_log(&mut self) -> Vec<String> {
        self.log.drain_new()
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        self.config.set_option(name, value)?;
        self.log.set_capacity(self.config.log_capacity);
        self.log.info(format!("option {name} = {value}"));
        Ok(())
    }

    pub fn fen(&self) -> String {
        self.game_state.get_fen()
    }

    pub fn legal_destinations(&mut self, from: Square) -> Vec<Square> {
        legal_moves(&mut self.game_state, from)
    }

    /// True when the configured computer side is to move in a live game.
    pub fn computer_to_move(&self) -> bool {
        self.config.computer_plays == Some(self.game_state.side_to_move)
            && !self.status.is_terminal()
    }

    pub fn is_searching(&self) -> bool {
        self.search.as_ref().is_some_and(SearchDispatcher::is_in_flight)
    }

    pub fn click(&mut self, row: i32, col: i32) -> ClickOutcome {
        if self.computer_to_move() {
            return ClickOutcome::Ignored;
        }

        let outcome = self.selection.click(&mut self.game_state, row, col);
        if let ClickOutcome::Moved { mv, status } = outcome {
            self.after_move(mv, status, None);
        }
        outcome
    }

    /// Play a move for the side to move. Illegal moves, and moves made while
    /// the computer is to move, are refused with `None`.
    pub fn play_move(&mut self, mv: Move) -> Option<GameStatus> {
        if self.computer_to_move() || !is_legal_move(&mut self.game_state, mv) {
            return None;
        }

        self.selection.clear();
        let status = apply_move(&mut self.game_state, mv.from, mv.to)?;
        self.after_move(mv, status, None);
        Some(status)
    }

    pub fn play_long_algebraic(&mut self, text: &str) -> Result<GameStatus, String> {
        let mv = long_algebraic_to_move(text)?;
        self.play_move(mv)
            .ok_or_else(|| format!("move '{text}' is not playable here"))
    }

    /// Take back the last move. An outstanding search is abandoned since its
    /// position no longer exists.
    pub fn undo(&mut self) -> bool {
        self.abandon_search();
        self.selection.clear();
        let Some(last) = self.game_state.last_move() else {
            return false;
        };
        undo_move(&mut self.game_state);
        self.status = game_status(&mut self.game_state);
        self.log.info(format!(
            "took back {}, {} to move",
            move_to_long_algebraic(last).unwrap_or_default(),
            self.game_state.side_to_move.name()
        ));
        true
    }

    pub fn new_game(&mut self) {
        self.reset_to(GameState::new_game());
        self.log.info("new game");
    }

    pub fn load_fen(&mut self, fen: &str) -> Result<(), String> {
        let game_state = GameState::from_fen(fen)?;
        self.reset_to(game_state);
        self.log.info(format!("position set: {fen}"));
        self.log_status();
        Ok(())
    }

    fn reset_to(&mut self, game_state: GameState) {
        self.abandon_search();
        self.selection.clear();
        self.game_state = game_state;
        self.status = game_status(&mut self.game_state);
        if let Some(search) = self.search.as_mut() {
            search.new_game();
        }
    }

    fn abandon_search(&mut self) {
        if let Some(search) = self.search.as_mut() {
            if search.is_in_flight() {
                search.abandon();
                self.log.info("outstanding search abandoned");
            }
        }
    }

    /// Ask the search collaborator for a move in the current position.
    /// Returns the request token, or `None` if nothing was started.
    pub fn request_computer_move(&mut self) -> Option<u64> {
        if self.status.is_terminal() {
            self.log.info("game is over, no search started");
            return None;
        }
        let fen = self.game_state.get_fen();
        let params = self.config.search_params();
        let Some(search) = self.search.as_mut() else {
            self.log.warn("no search engine configured");
            return None;
        };

        let token = search.request(fen, params);
        if token.is_none() {
            self.log.info("search already in progress");
        }
        token
    }

    /// Apply the collaborator's answer if one has arrived and still fits the
    /// board. Every failure leaves the board untouched and is logged.
    pub fn poll_computer_move(&mut self) -> Option<(Move, GameStatus)> {
        let response = match self.search.as_mut()?.poll() {
            SearchPoll::Pending => return None,
            SearchPoll::Discarded { token } => {
                self.log
                    .info(format!("discarded answer to abandoned request {token}"));
                return None;
            }
            SearchPoll::Ready(response) => response,
        };

        if response.fen != self.game_state.get_fen() {
            self.log.info("discarded answer for an earlier position");
            return None;
        }

        let output = match response.result {
            Ok(output) => output,
            Err(err) => {
                self.log.warn(format!("search failed: {err}"));
                return None;
            }
        };
        for line in &output.info_lines {
            self.log.info(line.trim_start_matches("info string ").to_owned());
        }

        let Some(text) = output.best_move else {
            self.log.info("search engine has no move to offer");
            return None;
        };
        let mv = match long_algebraic_to_move(&text) {
            Ok(mv) => mv,
            Err(err) => {
                self.log.warn(format!("unreadable move from search engine: {err}"));
                return None;
            }
        };
        if !is_legal_move(&mut self.game_state, mv) {
            self.log
                .warn(format!("search engine proposed illegal move {text}"));
            return None;
        }

        self.selection.clear();
        let status = apply_move(&mut self.game_state, mv.from, mv.to)?;
        self.after_move(mv, status, output.evaluation);
        Some((mv, status))
    }

    /// One front-end frame: collect finished work, then start a search if
    /// the computer is to move.
    pub fn tick(&mut self) -> Option<(Move, GameStatus)> {
        self.poll_commentary();
        let played = self.poll_computer_move();
        if self.computer_to_move() && !self.is_searching() && self.search.is_some() {
            self.request_computer_move();
        }
        played
    }

    /// Log commentary that has come back since the last call.
    pub fn poll_commentary(&mut self) -> usize {
        let mut received = 0;
        while let Ok(result) = self.commentary_rx.try_recv() {
            match result {
                Ok(text) => self.log.info(format!("commentary: {text}")),
                Err(err) => self.log.warn(format!("commentary failed: {err}")),
            }
            received += 1;
        }
        received
    }

    fn after_move(&mut self, mv: Move, status: GameStatus, evaluation: Option<Evaluation>) {
        self.status = status;
        let move_text = move_to_long_algebraic(mv).unwrap_or_default();
        match evaluation {
            Some(eval) => self.log.info(format!("played {move_text} ({eval})")),
            None => self.log.info(format!("played {move_text}")),
        }
        self.log_status();

        if !self.config.commentary {
            return;
        }
        if let Some(commentary) = self.commentary.as_ref() {
            let request = CommentaryRequest {
                fen: self.game_state.get_fen(),
                move_text,
                evaluation,
            };
            let tx = self.commentary_tx.clone();
            // Session may be gone by the time the answer lands.
            let queued = commentary.request(request, move |result| {
                let _ = tx.send(result);
            });
            if !queued {
                self.log.warn("commentary worker has stopped");
            }
        }
    }

    fn log_status(&mut self) {
        match self.status {
            GameStatus::Ongoing => {}
            GameStatus::Check => self.log.info(format!(
                "{} is in check",
                self.game_state.side_to_move.name()
            )),
            GameStatus::Checkmate { loser } => self
                .log
                .info(format!("checkmate, {} has lost", loser.name())),
            GameStatus::Stalemate => self.log.info("stalemate, the game is drawn"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::GameSession;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_trait::{
        CollaboratorError, CollaboratorResult, CommentaryEngine, CommentaryRequest, SearchEngine,
        SearchOutput, SearchParams,
    };
    use crate::game_state::chess_types::{Color, GameStatus, Move, Square};
    use crate::session::config::SessionConfig;
    use crate::session::selection::ClickOutcome;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("valid square")
    }

    /// Always answers with the same move text.
    struct FixedEngine(Option<&'static str>);

    impl SearchEngine for FixedEngine {
        fn name(&self) -> &str {
            "fixed"
        }

        fn choose_move(&mut self, _fen: &str, _params: &SearchParams) -> CollaboratorResult<SearchOutput> {
            Ok(SearchOutput {
                best_move: self.0.map(str::to_owned),
                ..SearchOutput::default()
            })
        }
    }

    struct BrokenEngine;

    impl SearchEngine for BrokenEngine {
        fn name(&self) -> &str {
            "broken"
        }

        fn choose_move(&mut self, _fen: &str, _params: &SearchParams) -> CollaboratorResult<SearchOutput> {
            Err(CollaboratorError::Unavailable("not installed".to_owned()))
        }
    }

    struct EchoCommentary;

    impl CommentaryEngine for EchoCommentary {
        fn comment(&mut self, request: &CommentaryRequest) -> CollaboratorResult<String> {
            Ok(format!("{} was played", request.move_text))
        }
    }

    fn wait_for_move(session: &mut GameSession) -> Option<(Move, GameStatus)> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(played) = session.poll_computer_move() {
                return Some(played);
            }
            if !session.is_searching() {
                return None;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    fn computer_as_black() -> SessionConfig {
        SessionConfig {
            computer_plays: Some(Color::Dark),
            ..SessionConfig::default()
        }
    }

    #[test]
    fn human_then_computer_move() {
        let mut session = GameSession::new(computer_as_black())
            .with_search_engine(Box::new(RandomEngine::with_seed(11)));

        let e2 = sq("e2");
        assert!(matches!(
            session.click(i32::from(e2.row), i32::from(e2.col)),
            ClickOutcome::Selected { .. }
        ));
        let e4 = sq("e4");
        assert!(matches!(
            session.click(i32::from(e4.row), i32::from(e4.col)),
            ClickOutcome::Moved { .. }
        ));
        assert!(session.computer_to_move());

        // Human clicks are ignored while the computer is thinking.
        let d7 = sq("d7");
        assert_eq!(
            session.click(i32::from(d7.row), i32::from(d7.col)),
            ClickOutcome::Ignored
        );

        assert!(session.request_computer_move().is_some());
        let (_, status) = wait_for_move(&mut session).expect("computer replies");
        assert_eq!(status, GameStatus::Ongoing);
        assert_eq!(session.game_state().side_to_move, Color::Light);
        assert_eq!(session.game_state().undo_stack.len(), 2);
    }

    #[test]
    fn illegal_proposal_leaves_board_untouched() {
        let mut session = GameSession::new(SessionConfig::default())
            .with_search_engine(Box::new(FixedEngine(Some("e2e5"))));
        let before = session.game_state().clone();

        assert!(session.request_computer_move().is_some());
        assert_eq!(wait_for_move(&mut session), None);
        assert_eq!(session.game_state(), &before);
        assert!(session
            .log()
            .last_message()
            .is_some_and(|m| m.contains("illegal move e2e5")));
    }

    #[test]
    fn failures_become_log_messages() {
        let mut session =
            GameSession::new(SessionConfig::default()).with_search_engine(Box::new(BrokenEngine));
        session.request_computer_move();
        assert_eq!(wait_for_move(&mut session), None);
        assert!(session
            .log()
            .last_message()
            .is_some_and(|m| m.contains("not installed")));

        let mut session = GameSession::new(SessionConfig::default())
            .with_search_engine(Box::new(FixedEngine(None)));
        session.request_computer_move();
        assert_eq!(wait_for_move(&mut session), None);
        assert_eq!(
            session.log().last_message(),
            Some("search engine has no move to offer")
        );

        let mut session = GameSession::new(SessionConfig::default());
        assert_eq!(session.request_computer_move(), None);
        assert_eq!(session.log().last_message(), Some("no search engine configured"));
    }

    #[test]
    fn undo_discards_outstanding_answer() {
        let mut session = GameSession::new(SessionConfig::default())
            .with_search_engine(Box::new(FixedEngine(Some("e7e5"))));
        session
            .play_long_algebraic("e2e4")
            .expect("opening move is legal");
        assert!(session.request_computer_move().is_some());
        assert!(session.undo());

        let deadline = Instant::now() + Duration::from_secs(5);
        while session.is_searching() && Instant::now() < deadline {
            assert_eq!(session.poll_computer_move(), None);
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(session.game_state().undo_stack.is_empty());
        assert_eq!(session.game_state().side_to_move, Color::Light);
        assert!(!session.undo());
    }

    #[test]
    fn play_move_refuses_illegal_moves() {
        let mut session = GameSession::new(SessionConfig::default());
        assert!(session.play_long_algebraic("e2e5").is_err());
        assert!(session.play_long_algebraic("e7e5").is_err());
        assert!(session.play_long_algebraic("zz").is_err());
        assert_eq!(session.play_long_algebraic("g1f3"), Ok(GameStatus::Ongoing));
    }

    #[test]
    fn fools_mate_is_reported() {
        let mut session = GameSession::new(SessionConfig::default());
        for mv in ["f2f3", "e7e5", "g2g4"] {
            session.play_long_algebraic(mv).expect("legal move");
        }
        assert_eq!(
            session.play_long_algebraic("d8h4"),
            Ok(GameStatus::Checkmate { loser: Color::Light })
        );
        assert_eq!(session.log().last_message(), Some("checkmate, white has lost"));
        assert!(session.undo());
        assert_eq!(session.status(), GameStatus::Ongoing);
    }

    #[test]
    fn load_fen_resets_state() {
        let mut session = GameSession::new(SessionConfig::default());
        session.play_long_algebraic("e2e4").expect("legal move");
        session
            .load_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")
            .expect("valid position");
        assert_eq!(session.status(), GameStatus::Stalemate);
        assert!(session.game_state().undo_stack.is_empty());
        assert!(session.load_fen("not a position").is_err());
        assert_eq!(session.status(), GameStatus::Stalemate);
        assert_eq!(session.request_computer_move(), None);
    }

    #[test]
    fn tick_starts_and_finishes_computer_turn() {
        let mut session = GameSession::new(SessionConfig {
            computer_plays: Some(Color::Light),
            ..SessionConfig::default()
        })
        .with_search_engine(Box::new(FixedEngine(Some("d2d4"))));

        assert_eq!(session.tick(), None);
        assert!(session.is_searching());
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut played = None;
        while played.is_none() && Instant::now() < deadline {
            played = session.tick();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(
            played,
            Some((Move::new(sq("d2"), sq("d4")), GameStatus::Ongoing))
        );
        assert!(!session.computer_to_move());
    }

    #[test]
    fn commentary_arrives_in_the_log() {
        let mut session = GameSession::new(SessionConfig {
            commentary: true,
            ..SessionConfig::default()
        })
        .with_commentary(Box::new(EchoCommentary));
        session.play_long_algebraic("e2e4").expect("legal move");

        let deadline = Instant::now() + Duration::from_secs(5);
        while session.poll_commentary() == 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(
            session.log().last_message(),
            Some("commentary: e2e4 was played")
        );
    }

    #[test]
    fn options_update_config_and_log() {
        let mut session = GameSession::new(SessionConfig::default());
        session.set_option("ComputerPlays", "white").expect("valid option");
        assert!(session.computer_to_move());
        assert!(session.set_option("Nope", "1").is_err());
        let lines = session.drain_log();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("option ComputerPlays = white"));
    }
}
