//! Cascade resolver - removes exploded tiles, applies gravity, refills
//!
//! Columns are compacted toward `v = 0`. For every exploded tile the tiles
//! above it shift down one cell and a fresh tile is spawned above the top row.
//! The n-th replacement in a column is parked at row `height + n`, so
//! replacements queued in the same pass never share a start position; a
//! replacement that is shifted again later in the pass just receives a newer
//! `Moved` target.
//!
//! All moves of one pass share one duration, so a single wait covers them.

use crate::grid::Grid;
use crate::matcher::{self, Run};
use crate::types::MatchBonus;

/// Compact every column and refill from the top.
///
/// Returns `duration_ms` if anything moved, `0` if the grid was already free
/// of exploded tiles. With a zero duration the two cases look the same; use
/// [`resolve_step`] when that matters.
pub fn collapse(grid: &mut Grid, duration_ms: u32) -> u32 {
    if compact(grid, duration_ms) == 0 {
        return 0;
    }
    duration_ms
}

/// Number of tiles removed (and replaced).
fn compact(grid: &mut Grid, duration_ms: u32) -> usize {
    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let mut removed = 0usize;

    for h in 0..width {
        let mut spawned = 0i32;
        for v in 0..height {
            // The occupant shifted into `v` may itself be exploded.
            while grid.at(h, v).is_exploded() {
                grid.collapse_into(h, v, height as i32 + spawned, duration_ms);
                spawned += 1;
                removed += 1;
            }
        }
    }

    if removed > 0 {
        tracing::trace!(removed, "collapsed columns");
    }
    removed
}

/// Result of one detect + compact pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    pub bonus: MatchBonus,
    pub runs: Vec<Run>,
    /// Tiles removed and refilled by this pass
    pub removed: usize,
    /// How long the caller must wait before the next pass
    pub wait_ms: u32,
}

impl Step {
    /// Whether the pass changed the board, independent of the wait
    pub fn acted(&self) -> bool {
        self.removed > 0
    }
}

/// Run the match detector, then the resolver.
pub fn resolve_step(grid: &mut Grid, duration_ms: u32) -> Step {
    let report = matcher::mark_runs(grid);
    let removed = compact(grid, duration_ms);
    Step {
        bonus: report.bonus,
        runs: report.runs,
        removed,
        wait_ms: if removed > 0 { duration_ms } else { 0 },
    }
}
