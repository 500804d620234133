//! nxn-tictactoe: an alpha-beta engine for 3×3, 4×4 and 5×5 tic-tac-toe.
//!
//! A game is nothing but its encoded board: every request decodes the board,
//! derives whose turn it is from the mark counts, optionally lets the engine
//! move and encodes the result again.
//!
//! ## Modules
//!
//! - [`constants`] - Board sizes, symbols, scores and the default depth table
//! - [`error`] - Library error type
//! - [`board`] - Board model, win detection and the text codec
//! - [`depth`] - Empty-cell count to search depth policy
//! - [`search`] - Depth-limited negamax with alpha-beta pruning
//! - [`game`] - Game state rebuilt from a `/<mode>/<size>/<board>` path
//! - [`render`] - Plain-text page for a game
//! - [`protocol`] - Line-oriented text protocol
//! - [`selfplay`] - Engine against a random mover
//!
//! ## Example
//!
//! ```
//! use nxn_tictactoe::board::{Board, BoardSize, Outcome};
//! use nxn_tictactoe::search::Engine;
//!
//! let size = BoardSize::new(3).unwrap();
//! let (mut board, mover) = Board::decode("XX_OO____", size);
//! assert_eq!(board.outcome(), Outcome::InProgress);
//!
//! let result = Engine::default().choose(&mut board, mover);
//! assert_eq!(result.best_move, Some(2));
//! assert_eq!(result.score, 1);
//! ```

pub mod board;
pub mod constants;
pub mod depth;
pub mod error;
pub mod game;
pub mod protocol;
pub mod render;
pub mod search;
pub mod selfplay;

pub use crate::error::{Error, Result};
