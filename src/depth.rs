//! Depth budget selection.
//!
//! Exhaustive search is only affordable near the end of a game. A
//! [`DepthPolicy`] maps the number of empty cells to the number of plies the
//! search may look ahead, so 4×4 and 5×5 openings stay fast at the cost of
//! perfect play.

use crate::constants::DEFAULT_DEPTH_TABLE;
use crate::error::{Error, Result};

/// Ordered `(max empty cells, depth)` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepthPolicy {
    rows: Vec<(usize, u32)>,
}

impl Default for DepthPolicy {
    fn default() -> Self {
        Self {
            rows: DEFAULT_DEPTH_TABLE.to_vec(),
        }
    }
}

impl DepthPolicy {
    /// Build a policy from explicit rows.
    ///
    /// Rows must be non-empty, have strictly increasing thresholds and
    /// depths of at least one ply.
    pub fn from_table(rows: Vec<(usize, u32)>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::InvalidDepthTable("no rows".to_string()));
        }
        if let Some((threshold, _)) = rows.iter().find(|(_, depth)| *depth == 0) {
            return Err(Error::InvalidDepthTable(format!(
                "zero depth for up to {threshold} empty cells"
            )));
        }
        if let Some(pair) = rows.windows(2).find(|pair| pair[0].0 >= pair[1].0) {
            return Err(Error::InvalidDepthTable(format!(
                "threshold {} does not increase past {}",
                pair[1].0, pair[0].0
            )));
        }
        Ok(Self { rows })
    }

    /// Same thresholds with every depth clamped to `max` plies (at least one).
    pub fn capped(&self, max: u32) -> Self {
        let max = max.max(1);
        Self {
            rows: self
                .rows
                .iter()
                .map(|&(threshold, depth)| (threshold, depth.min(max)))
                .collect(),
        }
    }

    pub fn rows(&self) -> &[(usize, u32)] {
        &self.rows
    }

    /// Depth budget for a board with `empty_cells` empty cells.
    ///
    /// Counts past the last threshold get the smallest depth in the table.
    /// The result never exceeds the plies that remain, and is at least one.
    pub fn max_depth(&self, empty_cells: usize) -> u32 {
        let depth = self
            .rows
            .iter()
            .find(|(threshold, _)| empty_cells <= *threshold)
            .map(|&(_, depth)| depth)
            .unwrap_or_else(|| self.rows.iter().map(|&(_, depth)| depth).min().unwrap_or(1));
        let remaining = u32::try_from(empty_cells).unwrap_or(u32::MAX).max(1);
        depth.min(remaining)
    }
}
