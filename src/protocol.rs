//! Line-oriented text protocol for driving the engine from another process.
//!
//! The framing follows GTP: each line is an optional numeric id followed by
//! a command and its arguments; each reply is `=` (success) or `?` (failure),
//! the id if one was given, the response text and a blank line.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `decode <size> [board]` - Normalized board and the player to move
//! - `outcome <size> [board]` - `in_progress`, `x_wins`, `o_wins` or `draw`
//! - `search <size> [board] [depth]` - Best move, score and node count
//! - `depth <empty_cells>` - Depth budget the engine would use
//! - `play <path>` - Let the engine answer a game path and render the page
//! - `quit` - Exit the loop
//!
//! ## Example
//!
//! ```
//! use nxn_tictactoe::protocol::Protocol;
//! use nxn_tictactoe::search::Engine;
//!
//! let mut protocol = Protocol::new(Engine::default());
//! let mut out = Vec::new();
//! protocol.run_with("1 outcome 3 XXX______\n".as_bytes(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "=1 x_wins\n\n");
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use crate::board::{Board, BoardSize, Outcome, Player};
use crate::game::GameState;
use crate::render::Page;
use crate::search::{search, Engine};

const KNOWN_COMMANDS: &[&str] = &[
    "decode",
    "depth",
    "known_command",
    "list_commands",
    "name",
    "outcome",
    "play",
    "quit",
    "search",
    "version",
];

/// Protocol session. Holds only the engine configuration; every command
/// carries the full position it is about.
pub struct Protocol {
    engine: Engine,
}

impl Default for Protocol {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl Protocol {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Serve commands from stdin until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Serve commands from `input`, writing replies to `output`.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        info!("protocol session started");
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!(command = %command, message = %message, "command failed");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            let separator = if message.is_empty() { "" } else { " " };
            write!(output, "{prefix}{id_str}{separator}{message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        info!("protocol session ended");
        Ok(())
    }

    /// Split an optional numeric command id from the front of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute one command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "executing");
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "decode" => match Self::parse_board(args) {
                Ok((board, next)) => (true, format!("{} {}", board.encode(), next)),
                Err(message) => (false, message),
            },

            "outcome" => match Self::parse_board(args) {
                Ok((board, _)) => (true, outcome_name(board.outcome()).to_string()),
                Err(message) => (false, message),
            },

            "search" => {
                let (mut board, mover) = match Self::parse_board(args) {
                    Ok(parsed) => parsed,
                    Err(message) => return (false, message),
                };
                let depth = match args.get(2) {
                    Some(arg) => match arg.parse::<u32>() {
                        Ok(depth) => depth,
                        Err(_) => return (false, format!("invalid depth: {arg}")),
                    },
                    None => self.engine.policy().max_depth(board.empty_count()),
                };
                let result = search(&mut board, mover, depth);
                let best = result
                    .best_move
                    .map_or_else(|| "none".to_string(), |index| index.to_string());
                (true, format!("{best} {} {}", result.score, result.nodes))
            }

            "depth" => match args.first().map(|arg| arg.parse::<usize>()) {
                Some(Ok(empty_cells)) => {
                    (true, self.engine.policy().max_depth(empty_cells).to_string())
                }
                Some(Err(_)) => (false, "invalid cell count".to_string()),
                None => (false, "missing argument".to_string()),
            },

            "play" => {
                let path = args.first().copied().unwrap_or("/");
                let mut state = GameState::from_path(path);
                match state.computer_move(&self.engine) {
                    Ok(taunt) => {
                        let mut page = format!("{}\n", state.path());
                        page.push_str(&Page::new(&state, taunt).to_string());
                        (true, page.trim_end().to_string())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// `<size> [board]`: the size must be supported, the board text is
    /// decoded leniently and may be omitted for a blank board.
    fn parse_board(args: &[&str]) -> Result<(Board, Player), String> {
        let Some(size_arg) = args.first() else {
            return Err("missing argument".to_string());
        };
        let n = size_arg
            .parse::<usize>()
            .map_err(|_| format!("invalid size: {size_arg}"))?;
        let size = BoardSize::new(n).map_err(|err| err.to_string())?;
        let text = args.get(1).copied().unwrap_or("");
        Ok(Board::decode(text, size))
    }
}

fn outcome_name(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::InProgress => "in_progress",
        Outcome::Won(Player::X) => "x_wins",
        Outcome::Won(Player::O) => "o_wins",
        Outcome::Draw => "draw",
    }
}
