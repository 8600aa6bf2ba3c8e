//! Pointer input resolution.
//!
//! A host delivers either a world-space hit point or a cell it already
//! resolved itself (its own raycast or hit test). Either way the result is
//! bounds-checked against the grid; anything off the board is "no cell".

use crate::core::Grid;
use crate::types::{CellPos, Vec3};

/// One pointer activation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Click {
    /// World-space point on (or near) the board plane
    World(Vec3),
    /// Cell chosen by the host
    Cell(CellPos),
}

impl From<CellPos> for Click {
    fn from(pos: CellPos) -> Self {
        Click::Cell(pos)
    }
}

impl From<Vec3> for Click {
    fn from(world: Vec3) -> Self {
        Click::World(world)
    }
}

/// Maps a click to a cell. Implementations need not bounds-check; the
/// controller does that for every resolver.
pub trait PointerResolver {
    fn resolve(&self, grid: &Grid, click: Click) -> Option<CellPos>;
}

/// Inverts the grid layout: nearest cell center on the board plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResolver;

impl PointerResolver for LayoutResolver {
    fn resolve(&self, grid: &Grid, click: Click) -> Option<CellPos> {
        match click {
            Click::Cell(pos) => Some(pos),
            Click::World(world) => grid.layout().nearest_cell(world),
        }
    }
}

impl<F> PointerResolver for F
where
    F: Fn(&Grid, Click) -> Option<CellPos>,
{
    fn resolve(&self, grid: &Grid, click: Click) -> Option<CellPos> {
        self(grid, click)
    }
}

/// Resolve and bounds-check in one go.
pub fn resolve_on_board(
    resolver: &impl PointerResolver,
    grid: &Grid,
    click: Click,
) -> Option<CellPos> {
    resolver
        .resolve(grid, click)
        .filter(|pos| grid.in_bounds(*pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Layout;

    fn grid() -> Grid {
        Grid::from_fn(4, 3, Layout::default(), 4, 1, |h, v| ((h + v) % 4) as u8).unwrap()
    }

    #[test]
    fn world_click_rounds_to_nearest_cell() {
        let g = grid();
        let r = LayoutResolver;
        assert_eq!(
            resolve_on_board(&r, &g, Click::World(Vec3::new(2.4, 0.6, 0.0))),
            Some(CellPos::new(2, 1))
        );
        // Off-plane hits still project onto the board.
        assert_eq!(
            resolve_on_board(&r, &g, Click::World(Vec3::new(0.0, 2.0, -3.0))),
            Some(CellPos::new(0, 2))
        );
    }

    #[test]
    fn off_board_clicks_resolve_to_none() {
        let g = grid();
        let r = LayoutResolver;
        assert_eq!(
            resolve_on_board(&r, &g, Click::World(Vec3::new(-0.6, 0.0, 0.0))),
            None
        );
        assert_eq!(resolve_on_board(&r, &g, Click::Cell(CellPos::new(4, 0))), None);
        assert_eq!(resolve_on_board(&r, &g, Click::Cell(CellPos::new(0, -1))), None);
    }

    #[test]
    fn closures_act_as_resolvers() {
        let g = grid();
        let mirror = |grid: &Grid, click: Click| match click {
            Click::Cell(p) => Some(CellPos::new(grid.width() as i32 - 1 - p.h, p.v)),
            Click::World(_) => None,
        };
        assert_eq!(
            resolve_on_board(&mirror, &g, CellPos::new(0, 1).into()),
            Some(CellPos::new(3, 1))
        );
    }

    #[test]
    fn degenerate_layout_resolves_nothing() {
        let flat = Layout::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        let g = Grid::from_fn(2, 2, flat, 2, 1, |_, _| 0).unwrap();
        assert_eq!(
            resolve_on_board(&LayoutResolver, &g, Click::World(Vec3::ZERO)),
            None
        );
    }
}
