//! Grid construction, coordinates and swaps through the public API

use tui_match3::core::{Grid, GridError, Layout};
use tui_match3::types::{CellPos, GridEvent, Vec3};

fn tilted() -> Layout {
    Layout::new(
        Vec3::new(10.0, 0.0, 5.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
    )
}

#[test]
fn test_position_of_follows_layout() {
    let grid = Grid::create(3, 3, tilted(), 4, 1).unwrap();
    assert_eq!(grid.position_of(0, 0), Vec3::new(10.0, 0.0, 5.0));
    assert_eq!(grid.position_of(2, 1), Vec3::new(8.0, 0.0, 7.0));
    // Defined above the board too, where replacement tiles are parked.
    assert_eq!(grid.position_of(1, 4), Vec3::new(9.0, 0.0, 13.0));
}

#[test]
fn test_layout_inverse_round_trips_every_cell() {
    let layout = tilted();
    for h in -1..5 {
        for v in -1..5 {
            let world = layout.position_of(h, v);
            assert_eq!(layout.nearest_cell(world), Some(CellPos::new(h, v)));
        }
    }
}

#[test]
fn test_initial_fill_spawns_in_place() {
    let mut grid = Grid::create(4, 5, tilted(), 6, 77).unwrap();
    let events: Vec<_> = grid.drain_events().collect();
    assert_eq!(events.len(), 20);
    for (pos, tile) in grid.iter() {
        let expected = grid.position_of(pos.h, pos.v);
        assert!(events.contains(&GridEvent::Spawned {
            tile: tile.id(),
            kind: tile.kind(),
            at: expected
        }));
    }
    assert!(grid.pending_events().is_empty());
}

#[test]
fn test_config_errors() {
    let err = Grid::create(5, 0, Layout::default(), 3, 1).unwrap_err();
    assert!(err.is_config());
    assert_eq!(
        err.to_string(),
        "grid dimensions must be at least 1x1, got 5x0"
    );
    assert_eq!(
        Grid::create(5, 5, Layout::default(), 0, 1).unwrap_err(),
        GridError::NoTileKinds
    );
}

#[test]
fn test_out_of_bounds_is_not_clamped() {
    let mut grid = Grid::create(3, 3, Layout::default(), 3, 1).unwrap();
    let before = grid.kinds();

    let err = grid
        .swap(CellPos::new(-1, 0), CellPos::new(0, 0), 100)
        .unwrap_err();
    assert!(!err.is_config());
    assert_eq!(err.to_string(), "cell (-1, 0) is outside the 3x3 grid");
    assert!(grid.kind_at(CellPos::new(3, 0)).is_err());
    assert_eq!(grid.kinds(), before);
}

#[test]
fn test_swap_twice_restores_kinds() {
    let mut grid = Grid::create(4, 4, Layout::default(), 5, 9).unwrap();
    let before = grid.kinds();
    let a = CellPos::new(1, 1);
    let b = CellPos::new(1, 2);
    grid.swap(a, b, 100).unwrap();
    grid.swap(a, b, 100).unwrap();
    assert_eq!(grid.kinds(), before);
}

#[test]
fn test_seed_changes_fill() {
    let a = Grid::create(7, 7, Layout::default(), 5, 1).unwrap();
    let b = Grid::create(7, 7, Layout::default(), 5, 2).unwrap();
    assert_ne!(a.kinds(), b.kinds());
}
