//! Selection and adjacency rules.

use crate::types::CellPos;

/// True when `a` and `b` are orthogonal neighbours.
///
/// Equal cells, diagonal cells, and cells more than one step apart on an
/// axis are all rejected.
pub fn swap_allowed(a: CellPos, b: CellPos) -> bool {
    a.h.abs_diff(b.h) + a.v.abs_diff(b.v) == 1
}

/// What a click does to the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Off-board click; the selection (if any) is unchanged
    Ignored,
    /// The clicked cell is now selected
    Selected(CellPos),
    /// Selected cell and clicked cell are neighbours; swap them
    Swap(CellPos, CellPos),
    /// Not a neighbour of the selection; `to` becomes the new selection
    Rejected { from: CellPos, to: CellPos },
}

/// Apply one click to `current`.
///
/// `clicked` is an already resolved, bounds-checked cell or `None`.
pub fn select(current: Option<CellPos>, clicked: Option<CellPos>) -> SelectOutcome {
    match (current, clicked) {
        (_, None) => SelectOutcome::Ignored,
        (None, Some(c)) => SelectOutcome::Selected(c),
        (Some(s), Some(c)) if swap_allowed(s, c) => SelectOutcome::Swap(s, c),
        (Some(s), Some(c)) => SelectOutcome::Rejected { from: s, to: c },
    }
}

impl SelectOutcome {
    /// Selection left behind after this outcome
    pub fn next_selection(self, current: Option<CellPos>) -> Option<CellPos> {
        match self {
            SelectOutcome::Ignored => current,
            SelectOutcome::Selected(c) => Some(c),
            SelectOutcome::Swap(..) => None,
            SelectOutcome::Rejected { to, .. } => Some(to),
        }
    }
}
