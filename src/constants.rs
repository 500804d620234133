//! Constants for board sizes, cell symbols, search scores and the depth table.
//!
//! Boards are square, N×N, with N chosen per game from [`SUPPORTED_SIZES`].
//! Cells are stored row-major in a flat vector of length N².

// =============================================================================
// Board Geometry
// =============================================================================

/// Board sizes (N for an N×N board) the engine accepts.
pub const SUPPORTED_SIZES: [usize; 3] = [3, 4, 5];

/// Board size used when a request does not name a supported one.
pub const DEFAULT_SIZE: usize = 3;

// =============================================================================
// Encoded Board Symbols
// =============================================================================

/// Symbol for a cell taken by X (the first player).
pub const SYMBOL_X: char = 'X';

/// Symbol for a cell taken by O (the second player).
pub const SYMBOL_O: char = 'O';

/// Symbol written for an empty cell. Any other character also decodes as empty.
pub const SYMBOL_EMPTY: char = '_';

// =============================================================================
// Search Scores
// =============================================================================

/// The player to move has a forced win within the horizon.
pub const SCORE_WIN: i8 = 1;

/// Draw, or the depth horizon was reached before the game was decided.
pub const SCORE_NEUTRAL: i8 = 0;

/// The player to move loses against best play within the horizon.
pub const SCORE_LOSS: i8 = -1;

/// Initial alpha/beta bound, strictly below every real score so the first
/// move examined always becomes the best so far.
pub const WINDOW_FLOOR: i8 = -2;

// =============================================================================
// Depth Policy
// =============================================================================

/// Default `(max empty cells, depth)` rows, in increasing threshold order.
///
/// Nine or fewer empty cells are searched exhaustively; boards with more
/// empty cells than the last threshold get the last (smallest) depth.
pub const DEFAULT_DEPTH_TABLE: [(usize, u32); 6] = [
    (9, 9),   // exhaustive for a 3x3-sized remainder
    (10, 8),
    (11, 7),
    (12, 6),
    (16, 5),
    (26, 4),
];
