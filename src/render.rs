//! Plain-text page for a game: status, taunt, grid and follow-up moves.

use std::fmt;

use crate::board::Outcome;
use crate::game::{GameState, Taunt};

/// A rendered view of a [`GameState`].
///
/// While the game is in progress the page lists one path per empty cell,
/// each addressing the position after the player to move takes that cell.
pub struct Page<'a> {
    state: &'a GameState,
    taunt: Option<Taunt>,
}

impl<'a> Page<'a> {
    pub fn new(state: &'a GameState, taunt: Option<Taunt>) -> Self {
        Self { state, taunt }
    }

    /// One line describing who won or who moves next.
    pub fn status(&self) -> String {
        match self.state.board.outcome() {
            Outcome::Won(winner) => format!("The winner is {winner}."),
            Outcome::Draw => "It's a draw!".to_string(),
            Outcome::InProgress => format!("It is now Player {}'s turn.", self.state.next_turn),
        }
    }

    /// `(cell, path)` for every move available to the player to move.
    pub fn follow_ups(&self) -> Vec<(usize, String)> {
        if self.state.board.outcome().is_over() {
            return Vec::new();
        }

        let mode = self.state.mode.code();
        let size = self.state.board.size();
        let mover = self.state.next_turn;
        let mut board = self.state.board.clone();
        let empties: Vec<usize> = board.empty_cells().collect();
        empties
            .into_iter()
            .map(|index| {
                let placed = board.place(index, mover);
                (index, format!("/{mode}/{size}/{}", placed.encode()))
            })
            .collect()
    }
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.status())?;
        if let Some(taunt) = self.taunt {
            writeln!(f, "{taunt}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.state.board)?;

        let follow_ups = self.follow_ups();
        if !follow_ups.is_empty() {
            writeln!(f)?;
            writeln!(f, "Moves:")?;
            for (index, path) in follow_ups {
                writeln!(f, "  {index:>2} {path}")?;
            }
        }
        Ok(())
    }
}
