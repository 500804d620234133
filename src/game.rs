//! Game state carried entirely in a URL-style path.
//!
//! A game is addressed as `/<mode>/<size>/<board>`. Nothing is stored
//! between requests: the board text is the whole game, and whose turn it is
//! follows from counting marks.
//!
//! - `mode` is `p` for two humans; anything else is a game against the
//!   computer.
//! - `size` is `3`, `4` or `5`; anything else falls back to 3.
//! - `board` is an encoded board (see [`Board::decode`]). A computer game
//!   without a board segment means the human moves first.

use std::fmt;

use tracing::{debug, instrument};

use crate::board::{Board, BoardSize, Player};
use crate::constants::{SCORE_LOSS, SCORE_NEUTRAL, SCORE_WIN};
use crate::error::Result;
use crate::search::Engine;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameMode {
    /// Two humans sharing the board.
    PlayerVsPlayer,
    /// A human against the engine.
    PlayerVsComputer,
}

impl GameMode {
    /// Path segment naming this mode.
    pub fn code(self) -> &'static str {
        match self {
            GameMode::PlayerVsPlayer => "p",
            GameMode::PlayerVsComputer => "c",
        }
    }
}

/// What the engine says after moving, based on its evaluation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Taunt {
    Winning,
    Drawing,
    Losing,
}

impl Taunt {
    pub fn from_score(score: i8) -> Option<Taunt> {
        match score {
            SCORE_WIN => Some(Taunt::Winning),
            SCORE_NEUTRAL => Some(Taunt::Drawing),
            SCORE_LOSS => Some(Taunt::Losing),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Taunt::Winning => "Nice try, human, but I am going to win.",
            Taunt::Drawing => "If you're smart, you can still make it a draw, but you can't win.",
            Taunt::Losing => "No fair, you cheated!",
        }
    }
}

impl fmt::Display for Taunt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A game rebuilt from its path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub mode: GameMode,
    pub board: Board,
    pub next_turn: Player,
    /// The engine should move before the page is shown.
    pub computer_turn: bool,
    /// Cell the engine played in [`GameState::computer_move`], if any.
    pub last_move: Option<usize>,
}

impl GameState {
    /// Blank two-player 3×3 game.
    pub fn new() -> Self {
        Self::blank(GameMode::PlayerVsPlayer, BoardSize::default())
    }

    fn blank(mode: GameMode, size: BoardSize) -> Self {
        Self {
            mode,
            board: Board::new(size),
            next_turn: Player::X,
            computer_turn: false,
            last_move: None,
        }
    }

    /// Rebuild a game from `/<mode>/<size>/<board>`.
    ///
    /// Never fails: a path with fewer than three segments is a blank 3×3
    /// two-player game and an unknown size is read as 3.
    #[instrument]
    pub fn from_path(path: &str) -> Self {
        let params: Vec<&str> = path.splitn(4, '/').collect();
        if params.len() < 3 {
            return Self::new();
        }

        let mode = if params[1] == GameMode::PlayerVsPlayer.code() {
            GameMode::PlayerVsPlayer
        } else {
            GameMode::PlayerVsComputer
        };
        let size = match params[2] {
            "4" => BoardSize::new(4),
            "5" => BoardSize::new(5),
            _ => BoardSize::new(3),
        }
        .unwrap_or_default();

        let state = match params.get(3) {
            Some(text) => {
                let (board, next_turn) = Board::decode(text, size);
                Self {
                    mode,
                    board,
                    next_turn,
                    computer_turn: mode == GameMode::PlayerVsComputer,
                    last_move: None,
                }
            }
            // No board yet: the human goes first.
            None => Self::blank(mode, size),
        };
        debug!(
            mode = state.mode.code(),
            board = %state.board.encode(),
            next = %state.next_turn,
            computer_turn = state.computer_turn,
            "parsed game path"
        );
        state
    }

    /// Path addressing the current position.
    pub fn path(&self) -> String {
        format!("/{}/{}/{}", self.mode.code(), self.board.size(), self.board.encode())
    }

    /// Let the engine move if it is its turn.
    ///
    /// Returns the engine's taunt, or `None` when it was not the engine's
    /// turn. A decided position is evaluated but left unchanged.
    #[instrument(skip(self, engine), fields(board = %self.board.encode(), mover = %self.next_turn))]
    pub fn computer_move(&mut self, engine: &Engine) -> Result<Option<Taunt>> {
        if !self.computer_turn {
            return Ok(None);
        }
        self.computer_turn = false;

        let result = engine.choose(&mut self.board, self.next_turn);
        if let Some(index) = result.best_move {
            self.board.play(index, self.next_turn)?;
            self.last_move = Some(index);
            self.next_turn = self.next_turn.opponent();
            debug!(index, score = result.score, "engine moved");
        }
        Ok(Taunt::from_score(result.score))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Mark, Outcome};

    #[test]
    fn test_short_paths_are_blank_pvp() {
        for path in ["", "/", "/c"] {
            let state = GameState::from_path(path);
            assert_eq!(state.mode, GameMode::PlayerVsPlayer);
            assert_eq!(state.board.len(), 9);
            assert_eq!(state.next_turn, Player::X);
            assert!(!state.computer_turn);
        }
    }

    #[test]
    fn test_computer_game_without_board_waits_for_human() {
        let state = GameState::from_path("/c/4");
        assert_eq!(state.mode, GameMode::PlayerVsComputer);
        assert_eq!(state.board.len(), 16);
        assert!(!state.computer_turn);
    }

    #[test]
    fn test_unknown_size_falls_back_to_three() {
        let state = GameState::from_path("/p/9/X");
        assert_eq!(state.board.size().get(), 3);
        assert_eq!(state.board.encode(), "X________");
        assert_eq!(state.next_turn, Player::O);
    }

    #[test]
    fn test_size_segment_must_be_exact() {
        for segment in ["+4", "04", " 4", "4 ", "5.0"] {
            let state = GameState::from_path(&format!("/c/{segment}/XO"));
            assert_eq!(state.board.size().get(), 3, "segment {segment:?}");
            assert_eq!(state.path(), "/c/3/XO_______");
        }
        assert_eq!(GameState::from_path("/c/5/").board.len(), 25);
    }

    #[test]
    fn test_pvp_never_asks_engine() {
        let mut state = GameState::from_path("/p/3/X________");
        assert!(!state.computer_turn);
        assert_eq!(state.computer_move(&Engine::default()), Ok(None));
        assert_eq!(state.board.encode(), "X________");
    }

    #[test]
    fn test_computer_blocks_and_flips_turn() {
        let mut state = GameState::from_path("/c/3/XX__O____");
        assert!(state.computer_turn);
        assert_eq!(state.next_turn, Player::O);

        let taunt = state.computer_move(&Engine::default()).unwrap();
        assert_eq!(state.last_move, Some(2));
        assert_eq!(state.board.get(2), Some(Mark::O));
        assert_eq!(state.next_turn, Player::X);
        assert!(!state.computer_turn);
        assert_eq!(taunt, Some(Taunt::Drawing));
        assert_eq!(state.path(), "/c/3/XXO_O____");
    }

    #[test]
    fn test_computer_opens_on_blank_board() {
        let mut state = GameState::from_path("/c/3/_________");
        let taunt = state.computer_move(&Engine::default()).unwrap();
        assert_eq!(state.board.encode(), "X________");
        assert_eq!(taunt, Some(Taunt::Drawing));
    }

    #[test]
    fn test_decided_game_is_left_alone() {
        let mut state = GameState::from_path("/c/3/OOOXX_X__");
        let taunt = state.computer_move(&Engine::default()).unwrap();
        assert_eq!(state.board.encode(), "OOOXX_X__");
        assert_eq!(state.last_move, None);
        assert_eq!(state.board.outcome(), Outcome::Won(Player::O));
        // X was to move and has already lost.
        assert_eq!(taunt, Some(Taunt::Losing));
    }

    #[test]
    fn test_taunt_messages() {
        assert_eq!(Taunt::from_score(1), Some(Taunt::Winning));
        assert_eq!(Taunt::from_score(-1), Some(Taunt::Losing));
        assert_eq!(Taunt::from_score(5), None);
        assert_eq!(Taunt::Losing.to_string(), "No fair, you cheated!");
    }
}
