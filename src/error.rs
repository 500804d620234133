//! Error type shared by the library modules.

use thiserror::Error;

/// Errors raised by board construction, move application and configuration.
///
/// Malformed board text is deliberately absent: decoding is lenient and turns
/// unrecognized characters into empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Board size outside of [`SUPPORTED_SIZES`](crate::constants::SUPPORTED_SIZES).
    #[error("unsupported board size: {0} (expected 3, 4 or 5)")]
    UnsupportedSize(usize),

    /// Depth table rejected by [`DepthPolicy::from_table`](crate::depth::DepthPolicy::from_table).
    #[error("invalid depth table: {0}")]
    InvalidDepthTable(String),

    /// Attempt to play outside the board or on a taken cell.
    #[error("illegal move at cell {index}: {reason}")]
    IllegalMove { index: usize, reason: &'static str },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
