//! Core grid logic module - pure, deterministic, and testable
//!
//! This crate holds the match-3 board and the two algorithms that act on it.
//! It has **zero dependencies** on terminals, input devices or clocks:
//!
//! - **Deterministic**: the same seed produces the same boards and refills
//! - **Testable**: every rule is exercised by unit tests
//! - **Host-agnostic**: visuals are driven through drained [`GridEvent`]s
//!
//! # Module Structure
//!
//! - [`tile`]: a cell occupant (kind + exploded flag + opaque id)
//! - [`layout`]: cell ↔ world coordinate mapping
//! - [`grid`]: the board, bounds checks, swaps and event buffer
//! - [`matcher`]: run detection and bonus tallies
//! - [`cascade`]: gravity, refill and the combined resolve step
//! - [`rng`]: seeded kind generation
//! - [`snapshot`]: plain-data board copies
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{cascade, Grid, Layout};
//!
//! let mut grid = Grid::create(7, 7, Layout::default(), 5, 12345).unwrap();
//!
//! // Resolve whatever the random fill produced until the board is stable.
//! while cascade::resolve_step(&mut grid, 500).acted() {}
//! assert!(grid.is_stable());
//! ```
//!
//! [`GridEvent`]: tui_match3_types::GridEvent

pub mod cascade;
pub mod error;
pub mod grid;
pub mod layout;
pub mod matcher;
pub mod rng;
pub mod snapshot;
pub mod tile;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use cascade::{collapse, resolve_step, Step};
pub use error::GridError;
pub use grid::Grid;
pub use layout::Layout;
pub use matcher::{find_runs, mark_runs, MatchReport, Run};
pub use rng::SimpleRng;
pub use snapshot::GridSnapshot;
pub use tile::Tile;
