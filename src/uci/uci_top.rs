//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands, keeps the current position, runs fixed-depth searches
//! for `go` and writes protocol output. Diagnostics go through `tracing` so
//! stdout carries protocol lines only.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::game_state::position::Position;
use crate::search::board_scoring::MATE_SCORE;
use crate::search::minimax::{SearchConfig, SearchEngine, SearchResult};
use crate::search::threading::ThreadingConfig;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::apply_long_algebraic_moves;
use crate::utils::render_game_state::render_position;

const UCI_ENGINE_NAME: &str = "Rook Engine";
const UCI_ENGINE_AUTHOR: &str = "the rook_engine developers";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut uci = UciState::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct UciState {
    position: Position,
    config: SearchConfig,
    /// Built on first `go`; dropped whenever an option changes the config.
    engine: Option<SearchEngine>,
}

impl Default for UciState {
    fn default() -> Self {
        Self::new()
    }
}

impl UciState {
    pub fn new() -> Self {
        Self {
            position: Position::initial(),
            config: SearchConfig::default(),
            engine: None,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Handle one input line. Returns `true` once `quit` is received.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let cmd = trimmed.split_whitespace().next().unwrap_or_default();
        match cmd {
            "uci" => {
                let defaults = SearchConfig::default();
                writeln!(out, "id name {}", UCI_ENGINE_NAME)?;
                writeln!(out, "id author {}", UCI_ENGINE_AUTHOR)?;
                writeln!(
                    out,
                    "option name Depth type spin default {} min 1 max 32",
                    defaults.max_depth
                )?;
                writeln!(out, "option name Threads type spin default 0 min 0 max 256")?;
                writeln!(
                    out,
                    "option name HashEntries type spin default {} min 0 max 67108864",
                    defaults.tt_max_entries
                )?;
                writeln!(
                    out,
                    "option name Quiescence type spin default {} min 0 max 16",
                    defaults.quiescence_depth
                )?;
                writeln!(out, "option name AlphaBeta type check default true")?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    writeln!(out, "info string setoption error: {}", err)?;
                }
            }
            "ucinewgame" => {
                self.position = Position::initial();
                if let Some(engine) = &self.engine {
                    engine.clear_transposition_table();
                }
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "go" => {
                if let Err(err) = self.handle_go(trimmed, out) {
                    writeln!(out, "info string go error: {}", err)?;
                    writeln!(out, "bestmove 0000")?;
                }
            }
            "d" => {
                write!(out, "{}", render_position(&self.position))?;
            }
            "stop" | "ponderhit" | "debug" | "register" => {
                // Search is synchronous; nothing to interrupt.
            }
            "quit" => {
                return Ok(true);
            }
            other => {
                debug!(command = other, "ignoring unknown UCI command");
            }
        }

        Ok(false)
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
        let value = value_tokens.join(" ");
        let mut config = self.config;

        if name.eq_ignore_ascii_case("Depth") {
            config.max_depth = parse_number(&name, &value)?;
        } else if name.eq_ignore_ascii_case("Threads") {
            config.threading = ThreadingConfig::with_threads(parse_number(&name, &value)?);
        } else if name.eq_ignore_ascii_case("HashEntries") {
            let entries: usize = parse_number(&name, &value)?;
            config.tt_max_entries = entries;
            config.use_transposition_table = entries > 0;
        } else if name.eq_ignore_ascii_case("Quiescence") {
            config.quiescence_depth = parse_number(&name, &value)?;
        } else if name.eq_ignore_ascii_case("AlphaBeta") {
            config.alpha_beta = parse_check(&name, &value)?;
        } else {
            return Err(format!("unknown option '{}'", name));
        }

        if config != self.config {
            self.config = config;
            self.engine = None;
        }
        Ok(())
    }

    /// The current position is replaced only when the whole command,
    /// including every move token, is valid.
    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace().skip(1).peekable();

        let base = match tokens.next() {
            Some("startpos") => Position::initial(),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(&next) = tokens.peek() {
                    if next == "moves" {
                        break;
                    }
                    fen_parts.push(next);
                    tokens.next();
                }
                if fen_parts.is_empty() {
                    return Err("missing FEN after 'position fen'".to_owned());
                }
                parse_fen(&fen_parts.join(" ")).map_err(|err| err.to_string())?
            }
            Some(other) => return Err(format!("unsupported position token '{}'", other)),
            None => return Err("incomplete position command".to_owned()),
        };

        let position = if tokens.peek().copied() == Some("moves") {
            tokens.next();
            apply_long_algebraic_moves(&base, tokens).map_err(|err| {
                warn!(%err, "rejected move list");
                err.to_string()
            })?
        } else {
            base
        };

        self.position = position;
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> Result<(), String> {
        let depth = parse_go_depth(line)?.unwrap_or(self.config.max_depth);
        let engine = match self.engine.take() {
            Some(engine) => engine,
            None => SearchEngine::new(self.config).map_err(|err| err.to_string())?,
        };
        let searched = engine.search_to_depth(&self.position, depth);
        self.engine = Some(engine);
        let result = searched.map_err(|err| err.to_string())?;

        writeln!(out, "{}", info_line(&result, &self.position)).map_err(|e| e.to_string())?;
        let written = match result.best_move {
            Some(best_move) => writeln!(out, "bestmove {}", best_move),
            None => writeln!(out, "bestmove 0000"),
        };
        written.map_err(|e| e.to_string())
    }
}

fn parse_check(name: &str, value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("invalid {} value '{}'", name, value)),
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("invalid {} value '{}'", name, value))
}

/// Only `depth` is honored; clock and node limits are accepted and ignored.
fn parse_go_depth(line: &str) -> Result<Option<u8>, String> {
    let mut tokens = line.split_whitespace();
    while let Some(tok) = tokens.next() {
        if tok == "depth" {
            let value = tokens.next().unwrap_or_default();
            return parse_number("depth", value).map(Some);
        }
    }
    Ok(None)
}

/// UCI reports scores from the side to move's point of view.
fn info_line(result: &SearchResult, position: &Position) -> String {
    let relative = result.score * position.side_to_move().sign();
    let score = if relative.abs() >= MATE_SCORE {
        format!("mate {}", if relative > 0 { 1 } else { -1 })
    } else {
        format!("cp {}", relative)
    };
    format!(
        "info depth {} score {} nodes {}",
        result.depth, score, result.nodes
    )
}
