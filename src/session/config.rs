//! Session options.
//!
//! Options are set by name the way a UCI front end handles `setoption`:
//! names are case-insensitive and booleans accept `true/1/yes/on`.

use std::path::PathBuf;

use crate::engines::engine_trait::SearchParams;
use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Side played by the search collaborator, if any.
    pub computer_plays: Option<Color>,
    pub movetime_ms: u64,
    pub search_depth: Option<u8>,
    /// External UCI program; the built-in random mover is used when unset.
    pub engine_path: Option<PathBuf>,
    /// Extra command-line arguments for the external program.
    pub engine_args: Vec<String>,
    /// Comment on each move. Front ends attach the commentary collaborator.
    pub commentary: bool,
    /// Oldest log entries are dropped beyond this many.
    pub log_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            computer_plays: None,
            movetime_ms: 500,
            search_depth: None,
            engine_path: None,
            engine_args: Vec::new(),
            commentary: false,
            log_capacity: 256,
        }
    }
}

impl SessionConfig {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            movetime_ms: Some(self.movetime_ms),
            depth: self.search_depth,
        }
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        let value = value.trim();

        if name.eq_ignore_ascii_case("ComputerPlays") {
            self.computer_plays = match value.to_ascii_lowercase().as_str() {
                "white" | "w" => Some(Color::Light),
                "black" | "b" => Some(Color::Dark),
                "none" | "" => None,
                _ => return Err(format!("invalid ComputerPlays value '{value}'")),
            };
        } else if name.eq_ignore_ascii_case("MoveTime") {
            let parsed = value
                .parse::<u64>()
                .map_err(|_| format!("invalid MoveTime value '{value}'"))?;
            self.movetime_ms = parsed.max(1);
        } else if name.eq_ignore_ascii_case("Depth") {
            let parsed = value
                .parse::<u8>()
                .map_err(|_| format!("invalid Depth value '{value}'"))?;
            self.search_depth = if parsed == 0 { None } else { Some(parsed) };
        } else if name.eq_ignore_ascii_case("EnginePath") {
            self.engine_path = if value.is_empty() || value.eq_ignore_ascii_case("<empty>") {
                None
            } else {
                Some(PathBuf::from(value))
            };
        } else if name.eq_ignore_ascii_case("EngineArgs") {
            self.engine_args = if value.eq_ignore_ascii_case("<empty>") {
                Vec::new()
            } else {
                value.split_whitespace().map(str::to_owned).collect()
            };
        } else if name.eq_ignore_ascii_case("Commentary") {
            self.commentary = parse_bool(value)?;
        } else if name.eq_ignore_ascii_case("LogCapacity") {
            let parsed = value
                .parse::<usize>()
                .map_err(|_| format!("invalid LogCapacity value '{value}'"))?;
            self.log_capacity = parsed.max(1);
        } else {
            return Err(format!("unknown option '{name}'"));
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("invalid boolean value '{value}'")),
    }
}
