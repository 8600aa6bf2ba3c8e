//! Grid error taxonomy.

use thiserror::Error;

use crate::types::{CellPos, TileKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },

    #[error("at least one tile kind is required")]
    NoTileKinds,

    #[error("tile kind {kind} is outside the configured {kind_count} kinds")]
    KindOutOfRange { kind: TileKind, kind_count: u8 },

    #[error("a single tile kind on a {width}x{height} grid always matches and never settles")]
    NeverSettles { width: u16, height: u16 },

    #[error("cell {pos} is outside the {width}x{height} grid")]
    OutOfBounds {
        pos: CellPos,
        width: u16,
        height: u16,
    },
}

impl GridError {
    /// Construction-time errors; the grid was never built
    pub fn is_config(&self) -> bool {
        !matches!(self, GridError::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_classified() {
        assert!(GridError::NoTileKinds.is_config());
        assert!(GridError::InvalidDimensions {
            width: 0,
            height: 3
        }
        .is_config());
        assert!(!GridError::OutOfBounds {
            pos: CellPos::new(9, 0),
            width: 7,
            height: 7
        }
        .is_config());
    }

    #[test]
    fn out_of_bounds_message_names_the_cell() {
        let err = GridError::OutOfBounds {
            pos: CellPos::new(-1, 4),
            width: 7,
            height: 5,
        };
        assert_eq!(err.to_string(), "cell (-1, 4) is outside the 7x5 grid");
    }
}
