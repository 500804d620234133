//! N×N board representation, win detection and the text codec.
//!
//! A board is a flat, row-major vector of N² [`Mark`]s. Win detection scans
//! four families of straight lines (rows, columns and both diagonals); each
//! family is a [`LinePattern`] of start cells and a stride, so the same scan
//! works for every supported size.

use std::fmt;
use std::ops::{Deref, DerefMut, Range};

use crate::constants::{DEFAULT_SIZE, SUPPORTED_SIZES, SYMBOL_EMPTY, SYMBOL_O, SYMBOL_X};
use crate::error::{Error, Result};

/// One of the two players. X always moves first on an empty board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// The other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The mark this player leaves on the board.
    pub fn mark(self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::X => SYMBOL_X,
            Player::O => SYMBOL_O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Content of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    /// The player owning this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Mark::Empty => None,
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
        }
    }

    /// Lenient symbol decoding: anything that is not `X` or `O` is empty.
    pub fn from_symbol(ch: char) -> Mark {
        match ch {
            SYMBOL_X => Mark::X,
            SYMBOL_O => Mark::O,
            _ => Mark::Empty,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::Empty => SYMBOL_EMPTY,
            Mark::X => SYMBOL_X,
            Mark::O => SYMBOL_O,
        }
    }
}

/// State of the game as read off the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won(Player),
    Draw,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Validated board side length.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardSize(usize);

impl BoardSize {
    /// Accepts only the sizes in [`SUPPORTED_SIZES`].
    pub fn new(n: usize) -> Result<Self> {
        if SUPPORTED_SIZES.contains(&n) {
            Ok(BoardSize(n))
        } else {
            Err(Error::UnsupportedSize(n))
        }
    }

    /// Side length N.
    pub fn get(self) -> usize {
        self.0
    }

    /// Number of cells, N².
    pub fn cells(self) -> usize {
        self.0 * self.0
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        BoardSize(DEFAULT_SIZE)
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = Error;

    fn try_from(n: usize) -> Result<Self> {
        BoardSize::new(n)
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A family of winning lines.
///
/// Line `k` of the family starts at cell `starts.start + k * start_step` and
/// covers the cells `start + offset` for every offset in `offsets`, stepping
/// by `offset_step`. Every line has exactly N cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinePattern {
    pub starts: Range<usize>,
    pub start_step: usize,
    pub offsets: Range<usize>,
    pub offset_step: usize,
}

impl LinePattern {
    /// The four families for an N×N board: rows, columns, main diagonal and
    /// anti-diagonal.
    pub fn families(size: BoardSize) -> [LinePattern; 4] {
        let n = size.get();
        let area = size.cells();
        [
            // rows
            LinePattern {
                starts: 0..area,
                start_step: n,
                offsets: 0..n,
                offset_step: 1,
            },
            // columns
            LinePattern {
                starts: 0..n,
                start_step: 1,
                offsets: 0..area,
                offset_step: n,
            },
            // top-left to bottom-right
            LinePattern {
                starts: 0..1,
                start_step: 1,
                offsets: 0..area,
                offset_step: n + 1,
            },
            // top-right to bottom-left
            LinePattern {
                starts: 0..1,
                start_step: 1,
                offsets: n - 1..area - 1,
                offset_step: n - 1,
            },
        ]
    }

    /// Cell indices of every line in this family.
    pub fn lines(&self) -> impl Iterator<Item = impl Iterator<Item = usize>> + '_ {
        self.starts.clone().step_by(self.start_step).map(move |start| {
            self.offsets
                .clone()
                .step_by(self.offset_step)
                .map(move |offset| start + offset)
        })
    }
}

/// A square tic-tac-toe board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Mark>,
}

impl Board {
    /// Blank board of the given size.
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![Mark::Empty; size.cells()],
        }
    }

    /// Decode an encoded board and work out who moves next.
    ///
    /// Decoding never fails: characters other than `X` and `O` become empty
    /// cells, characters beyond N² are ignored and a short string leaves the
    /// remaining cells empty.
    pub fn decode(text: &str, size: BoardSize) -> (Board, Player) {
        let mut board = Board::new(size);
        for (cell, ch) in board.cells.iter_mut().zip(text.chars()) {
            *cell = Mark::from_symbol(ch);
        }
        let next = board.next_player();
        (board, next)
    }

    /// Encode as exactly N² characters from `X`, `O` and `_`.
    pub fn encode(&self) -> String {
        self.cells.iter().map(|mark| mark.symbol()).collect()
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Number of cells (N²).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Mark] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    /// Number of cells holding the given mark.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&m| m == mark).count()
    }

    pub fn empty_count(&self) -> usize {
        self.count(Mark::Empty)
    }

    /// Indices of the empty cells, lowest first.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, mark)| **mark == Mark::Empty)
            .map(|(i, _)| i)
    }

    /// Whoever has fewer marks moves next; X on ties.
    pub fn next_player(&self) -> Player {
        if self.count(Mark::O) < self.count(Mark::X) {
            Player::O
        } else {
            Player::X
        }
    }

    /// Decide the game: the first complete line wins, X checked before O on
    /// each line. Without a complete line the game is drawn once no empty
    /// cell remains.
    pub fn outcome(&self) -> Outcome {
        for pattern in LinePattern::families(self.size) {
            for line in pattern.lines() {
                let mut x_wins = true;
                let mut o_wins = true;
                for i in line {
                    match self.cells[i] {
                        Mark::X => o_wins = false,
                        Mark::O => x_wins = false,
                        Mark::Empty => {
                            x_wins = false;
                            o_wins = false;
                        }
                    }
                }
                if x_wins {
                    return Outcome::Won(Player::X);
                }
                if o_wins {
                    return Outcome::Won(Player::O);
                }
            }
        }

        if self.cells.contains(&Mark::Empty) {
            Outcome::InProgress
        } else {
            Outcome::Draw
        }
    }

    /// Permanently place `player`'s mark on an empty cell.
    pub fn play(&mut self, index: usize, player: Player) -> Result<()> {
        match self.cells.get(index) {
            None => Err(Error::IllegalMove { index, reason: "cell is off the board" }),
            Some(Mark::Empty) => {
                self.cells[index] = player.mark();
                Ok(())
            }
            Some(_) => Err(Error::IllegalMove { index, reason: "cell is not empty" }),
        }
    }

    /// Tentatively place `player`'s mark on an empty cell.
    ///
    /// The cell is emptied again when the returned guard is dropped, whether
    /// the caller returns normally, breaks out of a loop or unwinds.
    pub(crate) fn place(&mut self, index: usize, player: Player) -> Placement<'_> {
        debug_assert_eq!(self.cells[index], Mark::Empty, "placing on a taken cell");
        self.cells[index] = player.mark();
        Placement { board: self, index }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.get()) {
            for mark in row {
                let ch = match mark {
                    Mark::Empty => '.',
                    Mark::X => SYMBOL_X,
                    Mark::O => SYMBOL_O,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A mark placed by [`Board::place`], undone on drop.
pub struct Placement<'a> {
    board: &'a mut Board,
    index: usize,
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.cells[self.index] = Mark::Empty;
    }
}
