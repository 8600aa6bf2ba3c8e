//! Tile module - a single cell occupant

use crate::types::{TileId, TileKind};

/// A tile on the grid.
///
/// Tiles carry no position: the grid index they occupy is the only source of
/// positional truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    id: TileId,
    kind: TileKind,
    exploded: bool,
}

impl Tile {
    pub fn new(id: TileId, kind: TileKind) -> Self {
        Self {
            id,
            kind,
            exploded: false,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn is_exploded(&self) -> bool {
        self.exploded
    }

    /// Mark the tile as matched.
    ///
    /// Returns `true` only on the first call; marking twice is a no-op.
    pub fn explode(&mut self) -> bool {
        let first = !self.exploded;
        self.exploded = true;
        first
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tile_is_live() {
        let tile = Tile::new(TileId(3), 2);
        assert_eq!(tile.id(), TileId(3));
        assert_eq!(tile.kind(), 2);
        assert!(!tile.is_exploded());
    }

    #[test]
    fn explode_is_idempotent() {
        let mut tile = Tile::new(TileId(1), 0);
        assert!(tile.explode());
        assert!(!tile.explode());
        assert!(tile.is_exploded());
    }
}
