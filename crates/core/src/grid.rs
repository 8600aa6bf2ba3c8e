//! Grid module - owns the tiles and the coordinate mapping
//!
//! Tiles are stored column-major in a flat vector (`h * height + v`), so the
//! per-column compaction in [`crate::cascade`] walks contiguous memory.
//! Coordinates: `(h, v)` where `h` ranges `0..width` (left to right) and `v`
//! ranges `0..height` (bottom to top).
//!
//! Every mutation that a visual collaborator cares about is recorded as a
//! [`GridEvent`]; callers drain them with [`Grid::drain_events`].

use crate::error::GridError;
use crate::layout::Layout;
use crate::matcher;
use crate::rng::SimpleRng;
use crate::snapshot::GridSnapshot;
use crate::tile::Tile;
use crate::types::{CellPos, GridEvent, TileId, TileKind, Vec3};

#[derive(Debug, Clone)]
pub struct Grid {
    width: u16,
    height: u16,
    kind_count: u8,
    layout: Layout,
    /// Column-major cells (h * height + v)
    cells: Vec<Tile>,
    rng: SimpleRng,
    next_id: u32,
    events: Vec<GridEvent>,
}

impl Grid {
    /// Check construction parameters without building anything
    pub fn validate(width: u16, height: u16, kind_count: u8) -> Result<(), GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        if kind_count == 0 {
            return Err(GridError::NoTileKinds);
        }
        Ok(())
    }

    /// Create a grid filled with uniformly random kinds.
    ///
    /// Each tile is placed instantly at its cell (a `Spawned` event with no
    /// move). The fill may contain runs; the first resolve pass clears them.
    pub fn create(
        width: u16,
        height: u16,
        layout: Layout,
        kind_count: u8,
        seed: u32,
    ) -> Result<Self, GridError> {
        Self::validate(width, height, kind_count)?;
        let mut grid = Self::empty(width, height, layout, kind_count, seed);
        for h in 0..width as usize {
            for v in 0..height as usize {
                let kind = grid.rng.next_kind(kind_count);
                let tile = grid.place_new(kind, h as i32, v as i32);
                grid.cells.push(tile);
            }
        }
        Ok(grid)
    }

    /// Create a grid with explicit kinds, `f(h, v)` for every cell.
    ///
    /// Replacement tiles spawned later are still drawn from the seeded RNG.
    pub fn from_fn(
        width: u16,
        height: u16,
        layout: Layout,
        kind_count: u8,
        seed: u32,
        mut f: impl FnMut(usize, usize) -> TileKind,
    ) -> Result<Self, GridError> {
        Self::validate(width, height, kind_count)?;
        let mut grid = Self::empty(width, height, layout, kind_count, seed);
        for h in 0..width as usize {
            for v in 0..height as usize {
                let kind = f(h, v);
                if kind >= kind_count {
                    return Err(GridError::KindOutOfRange { kind, kind_count });
                }
                let tile = grid.place_new(kind, h as i32, v as i32);
                grid.cells.push(tile);
            }
        }
        Ok(grid)
    }

    fn empty(width: u16, height: u16, layout: Layout, kind_count: u8, seed: u32) -> Self {
        Self {
            width,
            height,
            kind_count,
            layout,
            cells: Vec::with_capacity(width as usize * height as usize),
            rng: SimpleRng::new(seed),
            next_id: 0,
            events: Vec::new(),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn kind_count(&self) -> u8 {
        self.kind_count
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// World position of `(h, v)`; defined outside the grid as well
    #[inline]
    pub fn position_of(&self, h: i32, v: i32) -> Vec3 {
        self.layout.position_of(h, v)
    }

    pub fn in_bounds(&self, pos: CellPos) -> bool {
        pos.h >= 0 && pos.h < self.width as i32 && pos.v >= 0 && pos.v < self.height as i32
    }

    fn check(&self, pos: CellPos) -> Result<usize, GridError> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds {
                pos,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.index(pos.h as usize, pos.v as usize))
    }

    #[inline(always)]
    fn index(&self, h: usize, v: usize) -> usize {
        h * self.height as usize + v
    }

    /// Tile at `pos`, or `None` outside the grid
    pub fn tile(&self, pos: CellPos) -> Option<&Tile> {
        self.check(pos).ok().map(|i| &self.cells[i])
    }

    /// Kind at `pos`
    pub fn kind_at(&self, pos: CellPos) -> Result<TileKind, GridError> {
        self.check(pos).map(|i| self.cells[i].kind())
    }

    /// Exchange the occupants of `a` and `b`.
    ///
    /// Both tiles get a `Moved` event toward their new cell over
    /// `duration_ms`. Adjacency is the caller's concern.
    pub fn swap(&mut self, a: CellPos, b: CellPos, duration_ms: u32) -> Result<(), GridError> {
        let ia = self.check(a)?;
        let ib = self.check(b)?;
        self.cells.swap(ia, ib);

        let to_a = self.position_of(a.h, a.v);
        let to_b = self.position_of(b.h, b.v);
        self.events.push(GridEvent::Moved {
            tile: self.cells[ia].id(),
            to: to_a,
            duration_ms,
        });
        self.events.push(GridEvent::Moved {
            tile: self.cells[ib].id(),
            to: to_b,
            duration_ms,
        });
        Ok(())
    }

    /// Kinds as a column-major matrix, `kinds()[h][v]`
    pub fn kinds(&self) -> Vec<Vec<TileKind>> {
        self.cells
            .chunks(self.height as usize)
            .map(|column| column.iter().map(Tile::kind).collect())
            .collect()
    }

    /// All cells with their tiles, column by column
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, &Tile)> + '_ {
        let height = self.height as usize;
        self.cells.iter().enumerate().map(move |(i, tile)| {
            let pos = CellPos::new((i / height) as i32, (i % height) as i32);
            (pos, tile)
        })
    }

    pub fn has_exploded(&self) -> bool {
        self.cells.iter().any(Tile::is_exploded)
    }

    /// No exploded tiles and no run anywhere
    pub fn is_stable(&self) -> bool {
        !self.has_exploded() && !matcher::has_run(self)
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::from_grid(self)
    }

    /// Events recorded since the last drain, oldest first
    pub fn pending_events(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GridEvent> {
        self.events.drain(..)
    }

    // ---- crate-internal primitives used by the matcher and the cascade ----

    #[inline]
    pub(crate) fn at(&self, h: usize, v: usize) -> &Tile {
        &self.cells[self.index(h, v)]
    }

    /// Mark `(h, v)` exploded; the effect event fires only the first time
    pub(crate) fn explode_at(&mut self, h: usize, v: usize) -> bool {
        let i = self.index(h, v);
        let first = self.cells[i].explode();
        if first {
            let at = self.position_of(h as i32, v as i32);
            self.events.push(GridEvent::Exploded {
                tile: self.cells[i].id(),
                at,
            });
        }
        first
    }

    /// Remove the tile at `(h, v)`, shift every tile above it down one cell
    /// and fill the top with a fresh tile parked at row `park_v`.
    pub(crate) fn collapse_into(&mut self, h: usize, v: usize, park_v: i32, duration_ms: u32) {
        let height = self.height as usize;
        let removed = self.cells[self.index(h, v)].id();
        self.events.push(GridEvent::Removed { tile: removed });

        for k in v..height - 1 {
            let moved = self.cells[self.index(h, k + 1)];
            let i = self.index(h, k);
            self.cells[i] = moved;
            self.events.push(GridEvent::Moved {
                tile: moved.id(),
                to: self.position_of(h as i32, k as i32),
                duration_ms,
            });
        }

        let kind = self.rng.next_kind(self.kind_count);
        let fresh = self.place_new(kind, h as i32, park_v);
        let top = self.index(h, height - 1);
        self.cells[top] = fresh;
        self.events.push(GridEvent::Moved {
            tile: fresh.id(),
            to: self.position_of(h as i32, height as i32 - 1),
            duration_ms,
        });
    }

    fn place_new(&mut self, kind: TileKind, h: i32, v: i32) -> Tile {
        let id = TileId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.events.push(GridEvent::Spawned {
            tile: id,
            kind,
            at: self.position_of(h, v),
        });
        Tile::new(id, kind)
    }

    /// Get a mutable cell (for testing)
    #[cfg(test)]
    pub(crate) fn tile_mut(&mut self, h: usize, v: usize) -> &mut Tile {
        let i = self.index(h, v);
        &mut self.cells[i]
    }
}
