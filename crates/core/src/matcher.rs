//! Match detector - finds runs of three or more equal kinds
//!
//! Rows are scanned first, then columns. At each anchor the next two cells are
//! compared; on a match the run is extended greedily and the scan resumes after
//! its last cell, so every maximal run is counted exactly once. Tiles shared by
//! a horizontal and a vertical run (L, T and cross shapes) are marked by both
//! runs; marking is idempotent.

use crate::grid::Grid;
use crate::types::{Axis, CellPos, MatchBonus, MIN_RUN};

/// A maximal straight run of equal kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    /// Lowest cell of the run (leftmost for rows, bottom for columns)
    pub start: CellPos,
    pub axis: Axis,
    pub len: usize,
}

impl Run {
    /// Cells covered by the run, from `start` forward
    pub fn cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        (0..self.len as i32).map(move |i| match self.axis {
            Axis::Horizontal => self.start.offset(i, 0),
            Axis::Vertical => self.start.offset(0, i),
        })
    }
}

/// Outcome of one detection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub bonus: MatchBonus,
    pub runs: Vec<Run>,
}

impl MatchReport {
    /// No run anywhere: the cascade is over, or the swap was unproductive
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Find every run without touching the grid.
pub fn find_runs(grid: &Grid) -> Vec<Run> {
    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let mut runs = Vec::new();

    for v in 0..height {
        scan_line(width, |i| grid.at(i, v).kind(), |h, len| {
            runs.push(Run {
                start: CellPos::new(h as i32, v as i32),
                axis: Axis::Horizontal,
                len,
            })
        });
    }

    for h in 0..width {
        scan_line(height, |i| grid.at(h, i).kind(), |v, len| {
            runs.push(Run {
                start: CellPos::new(h as i32, v as i32),
                axis: Axis::Vertical,
                len,
            })
        });
    }

    runs
}

/// Scan one line of `len` cells, reporting `(start, run_len)` per run.
fn scan_line<K: PartialEq>(
    len: usize,
    kind: impl Fn(usize) -> K,
    mut on_run: impl FnMut(usize, usize),
) {
    let mut anchor = 0;
    while anchor + MIN_RUN <= len {
        let k = kind(anchor);
        if kind(anchor + 1) != k || kind(anchor + 2) != k {
            anchor += 1;
            continue;
        }

        let mut end = anchor + MIN_RUN;
        while end < len && kind(end) == k {
            end += 1;
        }
        on_run(anchor, end - anchor);
        anchor = end;
    }
}

/// True if any run exists; used for the stability check
pub fn has_run(grid: &Grid) -> bool {
    !find_runs(grid).is_empty()
}

/// Detect runs, mark their tiles exploded and tally bonuses.
///
/// Bonuses count runs, not tiles: re-marking a tile already exploded by a
/// crossing run adds nothing.
pub fn mark_runs(grid: &mut Grid) -> MatchReport {
    let runs = find_runs(grid);
    let mut bonus = MatchBonus::default();

    for run in &runs {
        bonus.record_run(run.len);
        for cell in run.cells() {
            grid.explode_at(cell.h as usize, cell.v as usize);
        }
    }

    if !runs.is_empty() {
        tracing::trace!(runs = runs.len(), ?bonus, "marked runs");
    }

    MatchReport { bonus, runs }
}
