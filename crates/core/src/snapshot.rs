use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{CellPos, TileId, TileKind};

/// Plain-data copy of the grid for renderers and tooling.
///
/// `kinds` and `tiles` are column-major (`h * height + v`), matching the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: u16,
    pub height: u16,
    pub kinds: Vec<TileKind>,
    pub tiles: Vec<TileId>,
    pub exploded: usize,
    /// FNV-1a 64 over `kinds`; changes whenever the visible board changes
    pub board_hash: u64,
}

impl GridSnapshot {
    pub(crate) fn from_grid(grid: &Grid) -> Self {
        let mut kinds = Vec::with_capacity(grid.width() as usize * grid.height() as usize);
        let mut tiles = Vec::with_capacity(kinds.capacity());
        let mut exploded = 0;
        for (_, tile) in grid.iter() {
            kinds.push(tile.kind());
            tiles.push(tile.id());
            if tile.is_exploded() {
                exploded += 1;
            }
        }
        let board_hash = fnv1a64(kinds.iter().copied());
        Self {
            width: grid.width(),
            height: grid.height(),
            kinds,
            tiles,
            exploded,
            board_hash,
        }
    }

    /// Kind at `pos`, `None` outside the board
    pub fn kind(&self, pos: CellPos) -> Option<TileKind> {
        self.index(pos).map(|i| self.kinds[i])
    }

    pub fn tile(&self, pos: CellPos) -> Option<TileId> {
        self.index(pos).map(|i| self.tiles[i])
    }

    fn index(&self, pos: CellPos) -> Option<usize> {
        if pos.h < 0 || pos.v < 0 || pos.h >= self.width as i32 || pos.v >= self.height as i32 {
            return None;
        }
        Some(pos.h as usize * self.height as usize + pos.v as usize)
    }
}

pub fn fnv1a64(bytes: impl Iterator<Item = u8>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}
