//! Console front end.
//!
//! Reads line commands, drives a `GameSession`, and prints session log lines
//! as `info string` output. Commands:
//!
//! `legal e2`, `move e2e4`, `click e2`, `undo`, `fen`,
//! `position startpos|fen <fen> [moves ...]`, `go`, `new`,
//! `setoption name <name> value <value>`, `status`, `quit`.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::engines::engine_commentary::ScoreCommentary;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::SearchEngine;
use crate::engines::engine_uci_process::UciProcessEngine;
use crate::game_state::chess_types::*;
use crate::session::config::SessionConfig;
use crate::session::game_session::GameSession;
use crate::session::selection::ClickOutcome;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};
use crate::utils::long_algebraic::move_to_long_algebraic;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Run the console until `quit` or end of input.
pub fn run_stdio_loop() -> io::Result<()> {
    let (line_tx, line_rx) = channel::<String>();

    // Stdin blocks, so it gets its own thread; the main loop keeps polling
    // the session while waiting for input.
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut stdout = io::stdout();
    let mut console = ConsoleState::new(SessionConfig::default());
    console.flush_log(&mut stdout)?;
    run_loop(&mut console, &line_rx, &mut stdout)
}

fn run_loop(
    console: &mut ConsoleState,
    lines: &Receiver<String>,
    out: &mut impl Write,
) -> io::Result<()> {
    loop {
        match lines.try_recv() {
            Ok(line) => {
                if console.handle_command(&line, out)? {
                    return Ok(());
                }
            }
            Err(TryRecvError::Disconnected) => {
                // Input closed; let an outstanding computer move land first.
                while console.session.is_searching() {
                    console.tick(out)?;
                    thread::sleep(POLL_INTERVAL);
                }
                console.tick(out)?;
                return Ok(());
            }
            Err(TryRecvError::Empty) => thread::sleep(POLL_INTERVAL),
        }
        console.tick(out)?;
        out.flush()?;
    }
}

pub struct ConsoleState {
    session: GameSession,
}

impl ConsoleState {
    pub fn new(config: SessionConfig) -> Self {
        let engine = build_search_engine(&config);
        Self {
            session: GameSession::new(config)
                .with_search_engine(engine)
                .with_commentary(Box::new(ScoreCommentary)),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// One polling step: collect collaborator answers and print the log.
    pub fn tick(&mut self, out: &mut impl Write) -> io::Result<()> {
        if let Some((mv, status)) = self.session.tick() {
            let text = move_to_long_algebraic(mv).unwrap_or_default();
            writeln!(out, "computer {} {}", text, status_word(status))?;
        }
        self.flush_log(out)
    }

    pub fn flush_log(&mut self, out: &mut impl Write) -> io::Result<()> {
        for line in self.session.drain_log() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    /// Handle one input line. Returns `true` on `quit`.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let arg = parts.next().unwrap_or_default();

        match cmd {
            "legal" => match self.handle_legal(arg) {
                Ok(list) => writeln!(out, "legal {arg}: {list}")?,
                Err(err) => writeln!(out, "info string legal error: {err}")?,
            },
            "move" => match self.session.play_long_algebraic(arg) {
                Ok(status) => writeln!(out, "ok {}", status_word(status))?,
                Err(err) => writeln!(out, "info string move error: {err}")?,
            },
            "click" => match self.handle_click(arg) {
                Ok(text) => writeln!(out, "{text}")?,
                Err(err) => writeln!(out, "info string click error: {err}")?,
            },
            "undo" => {
                let undone = self.session.undo();
                writeln!(out, "undo {}", if undone { "ok" } else { "empty" })?;
            }
            "fen" => writeln!(out, "fen {}", self.session.fen())?,
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "info string position error: {err}")?;
                }
            }
            "go" => {
                self.session.request_computer_move();
            }
            "new" | "ucinewgame" => self.session.new_game(),
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    writeln!(out, "info string setoption error: {err}")?;
                }
            }
            "status" => {
                let state = self.session.game_state();
                writeln!(
                    out,
                    "status {} {} to move",
                    status_word(self.session.status()),
                    state.side_to_move.name()
                )?;
            }
            "quit" => return Ok(true),
            _ => writeln!(out, "info string unknown command '{cmd}'")?,
        }

        self.flush_log(out)?;
        Ok(false)
    }

    fn handle_legal(&mut self, arg: &str) -> Result<String, String> {
        let from = algebraic_to_square(arg)?;
        let names = self
            .session
            .legal_destinations(from)
            .into_iter()
            .map(square_to_algebraic)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names.join(" "))
    }

    fn handle_click(&mut self, arg: &str) -> Result<String, String> {
        let square = algebraic_to_square(arg)?;
        let text = match self
            .session
            .click(i32::from(square.row), i32::from(square.col))
        {
            ClickOutcome::Ignored => "ignored".to_owned(),
            ClickOutcome::Cleared => "cleared".to_owned(),
            ClickOutcome::Selected {
                square,
                destinations,
            } => {
                let names = destinations
                    .into_iter()
                    .map(square_to_algebraic)
                    .collect::<Result<Vec<_>, _>>()?;
                format!("selected {} -> {}", square_to_algebraic(square)?, names.join(" "))
            }
            ClickOutcome::Moved { mv, status } => {
                format!("moved {} {}", move_to_long_algebraic(mv)?, status_word(status))
            }
        };
        Ok(text)
    }

    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace().peekable();
        let _ = tokens.next(); // "position"

        match tokens.next() {
            Some("startpos") => self.session.new_game(),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(next) = tokens.peek() {
                    if *next == "moves" {
                        break;
                    }
                    fen_parts.extend(tokens.next());
                }
                if fen_parts.is_empty() {
                    return Err("missing FEN after 'position fen'".to_owned());
                }
                self.session.load_fen(&fen_parts.join(" "))?;
            }
            Some(other) => return Err(format!("unsupported position token '{other}'")),
            None => return Err("incomplete position command".to_owned()),
        }

        if tokens.peek().copied() == Some("moves") {
            let _ = tokens.next();
            for lan in tokens {
                self.session.play_long_algebraic(lan)?;
            }
        }
        Ok(())
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        self.session.set_option(&name, &value_tokens.join(" "))?;
        if name.eq_ignore_ascii_case("EnginePath") || name.eq_ignore_ascii_case("EngineArgs") {
            let engine = build_search_engine(self.session.config());
            self.session.set_search_engine(engine);
        }
        Ok(())
    }
}

fn build_search_engine(config: &SessionConfig) -> Box<dyn SearchEngine> {
    match &config.engine_path {
        Some(path) => {
            Box::new(UciProcessEngine::new(path.clone()).with_args(config.engine_args.clone()))
        }
        None => Box::new(RandomEngine::new()),
    }
}

fn status_word(status: GameStatus) -> String {
    match status {
        GameStatus::Ongoing => "ongoing".to_owned(),
        GameStatus::Check => "check".to_owned(),
        GameStatus::Checkmate { loser } => format!("checkmate {}", loser.name()),
        GameStatus::Stalemate => "stalemate".to_owned(),
    }
}
