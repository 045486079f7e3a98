//! External search program spoken to over UCI.
//!
//! The program is spawned lazily on the first request and kept alive for the
//! rest of the game. Each request sends `position fen` + `go`, then reads until
//! `bestmove`, picking up the last reported score on the way.

use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use crate::engines::engine_trait::{
    CollaboratorError, CollaboratorResult, Evaluation, SearchEngine, SearchOutput, SearchParams,
};

const DEFAULT_MOVETIME_MS: u64 = 500;

struct EngineProcess {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
}

impl EngineProcess {
    fn spawn(program: &PathBuf, args: &[String]) -> CollaboratorResult<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                CollaboratorError::Unavailable(format!("cannot start {}: {e}", program.display()))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| CollaboratorError::Unavailable("engine stdin not captured".to_owned()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| CollaboratorError::Unavailable("engine stdout not captured".to_owned()))?;

        let mut process = Self {
            child,
            stdin,
            reader: BufReader::new(stdout),
        };
        process.send("uci")?;
        process.read_until(|line| line == "uciok")?;
        process.send("isready")?;
        process.read_until(|line| line == "readyok")?;
        Ok(process)
    }

    fn send(&mut self, command: &str) -> CollaboratorResult<()> {
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> CollaboratorResult<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(CollaboratorError::Io("engine closed its output".to_owned()));
        }
        Ok(line.trim().to_owned())
    }

    fn read_until(&mut self, done: impl Fn(&str) -> bool) -> CollaboratorResult<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line()?;
            let finished = done(&line);
            lines.push(line);
            if finished {
                return Ok(lines);
            }
        }
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        let _ = self.send("quit");
        let _ = self.child.wait();
    }
}

pub struct UciProcessEngine {
    program: PathBuf,
    args: Vec<String>,
    process: Option<EngineProcess>,
}

impl UciProcessEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            process: None,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    fn process(&mut self) -> CollaboratorResult<&mut EngineProcess> {
        if self.process.is_none() {
            self.process = Some(EngineProcess::spawn(&self.program, &self.args)?);
        }
        self.process
            .as_mut()
            .ok_or_else(|| CollaboratorError::Unavailable("engine process missing".to_owned()))
    }

    fn search(&mut self, fen: &str, params: &SearchParams) -> CollaboratorResult<SearchOutput> {
        let go = go_command(params);
        let process = self.process()?;
        process.send(&format!("position fen {fen}"))?;
        process.send(&go)?;
        let lines = process.read_until(|line| line.starts_with("bestmove"))?;

        let mut out = SearchOutput::default();
        for line in &lines {
            if let Some(eval) = parse_score(line) {
                out.evaluation = Some(eval);
            }
        }
        let last = lines.last().map(String::as_str).unwrap_or_default();
        out.best_move = parse_bestmove(last)?;
        out.info_lines = lines
            .iter()
            .filter(|line| line.starts_with("info") && line.contains(" score "))
            .cloned()
            .collect();
        Ok(out)
    }
}

impl SearchEngine for UciProcessEngine {
    fn name(&self) -> &str {
        self.program
            .file_name()
            .and_then(|x| x.to_str())
            .unwrap_or("uci engine")
    }

    fn new_game(&mut self) {
        if let Some(process) = self.process.as_mut() {
            if process.send("ucinewgame").is_err() {
                self.process = None;
            }
        }
    }

    fn choose_move(&mut self, fen: &str, params: &SearchParams) -> CollaboratorResult<SearchOutput> {
        let result = self.search(fen, params);
        if result.is_err() {
            // A broken pipe leaves the process unusable; respawn next time.
            self.process = None;
        }
        result
    }
}

fn go_command(params: &SearchParams) -> String {
    match (params.depth, params.movetime_ms) {
        (Some(depth), _) => format!("go depth {depth}"),
        (None, Some(ms)) => format!("go movetime {ms}"),
        (None, None) => format!("go movetime {DEFAULT_MOVETIME_MS}"),
    }
}

/// Move text from a `bestmove` line; `None` when the engine reports that no
/// move exists.
pub fn parse_bestmove(line: &str) -> CollaboratorResult<Option<String>> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("bestmove") {
        return Err(CollaboratorError::Protocol(format!(
            "expected bestmove, got '{line}'"
        )));
    }

    match tokens.next() {
        None | Some("0000") | Some("(none)") => Ok(None),
        Some(mv) => Ok(Some(mv.to_owned())),
    }
}

/// Score carried on an `info` line, if it has one.
pub fn parse_score(line: &str) -> Option<Evaluation> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    if tokens.first() != Some(&"info") {
        return None;
    }

    let at = tokens.iter().position(|t| *t == "score")?;
    let value = tokens.get(at + 2)?.parse::<i32>().ok()?;
    match *tokens.get(at + 1)? {
        "cp" => Some(Evaluation::Centipawns(value)),
        "mate" => Some(Evaluation::MateIn(value)),
        _ => None,
    }
}
