//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behavior beyond small helpers, making them
//! usable in any context (grid logic, turn control, terminal rendering).
//!
//! # Grid Coordinates
//!
//! Cells are addressed by `(h, v)`:
//!
//! - **h**: column, `0..width`, left to right
//! - **v**: row, `0..height`, bottom (`v = 0`) to top
//!
//! Gravity pulls tiles toward `v = 0`; replacement tiles enter above
//! `v = height - 1`.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host loop fixed timestep (~60 FPS) |
//! | `DEFAULT_MOVE_MS` | 500 | Shared duration of one swap or cascade phase |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{CellPos, MatchBonus, Vec3};
//!
//! let a = CellPos::new(2, 3);
//! assert_eq!(a.offset(0, 1), CellPos::new(2, 4));
//!
//! let mut bonus = MatchBonus::default();
//! bonus.record_run(4);
//! assert_eq!(bonus.four, 1);
//!
//! let p = Vec3::new(1.0, 2.0, 0.0) + Vec3::new(0.5, 0.0, 0.0) * 2.0;
//! assert_eq!(p, Vec3::new(2.0, 2.0, 0.0));
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Default grid width in cells
pub const DEFAULT_WIDTH: u16 = 7;

/// Default grid height in cells
pub const DEFAULT_HEIGHT: u16 = 7;

/// Default number of distinct tile kinds
pub const DEFAULT_TILE_KINDS: u8 = 5;

/// Shared animation duration for one swap or one cascade pass
pub const DEFAULT_MOVE_MS: u32 = 500;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Minimum run length that explodes
pub const MIN_RUN: usize = 3;


/// A cell coordinate on the grid.
///
/// Signed so that positions produced outside the board (pointer misses,
/// negative offsets) are representable and can be rejected by bounds checks
/// instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellPos {
    pub h: i32,
    pub v: i32,
}

impl CellPos {
    pub const fn new(h: i32, v: i32) -> Self {
        Self { h, v }
    }

    /// Position shifted by `(dh, dv)`
    pub const fn offset(self, dh: i32, dv: i32) -> Self {
        Self {
            h: self.h + dh,
            v: self.v + dv,
        }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.h, self.v)
    }
}

impl From<(i32, i32)> for CellPos {
    fn from((h, v): (i32, i32)) -> Self {
        Self { h, v }
    }
}

/// Tile kind index, `0..kind_count`
pub type TileKind = u8;

/// Opaque tile handle.
///
/// Ids are allocated monotonically per grid and never reused within an
/// episode, so collaborators can key visuals on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World-space position consumed by visual collaborators
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Linear interpolation, `t` in `[0, 1]`
    pub fn lerp(self, to: Vec3, t: f32) -> Vec3 {
        self + (to - self) * t
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Run-length bonus tallies.
///
/// Each run counts once, bucketed by its final length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MatchBonus {
    /// Runs of exactly 3
    pub three: u32,
    /// Runs of exactly 4
    pub four: u32,
    /// Runs of 5 or more
    pub five_plus: u32,
}

impl MatchBonus {
    /// Count one run of `len` tiles; runs shorter than [`MIN_RUN`] are ignored
    pub fn record_run(&mut self, len: usize) {
        match len {
            0..=2 => {}
            3 => self.three += 1,
            4 => self.four += 1,
            _ => self.five_plus += 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runs() == 0
    }

    /// Total number of runs counted
    pub fn runs(&self) -> u32 {
        self.three + self.four + self.five_plus
    }
}

impl AddAssign for MatchBonus {
    fn add_assign(&mut self, rhs: MatchBonus) {
        self.three += rhs.three;
        self.four += rhs.four;
        self.five_plus += rhs.five_plus;
    }
}

/// Turn controller phase
///
/// - **Idle**: accepting input
/// - **Resolving**: a swap or cascade pass is animating; input is ignored
/// - **AwaitingUndo**: an unproductive swap is being reverted; input is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Resolving,
    AwaitingUndo,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Resolving => "resolving",
            Phase::AwaitingUndo => "awaiting_undo",
        }
    }
}

/// Line direction of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Notifications for the visual collaborators of the grid.
///
/// The grid buffers these while it mutates; hosts drain them after each
/// update and map them onto their tile factory, animator and effect hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridEvent {
    /// A tile was created and placed instantly at `at`
    Spawned {
        tile: TileId,
        kind: TileKind,
        at: Vec3,
    },
    /// A tile should animate from wherever it is to `to`
    Moved {
        tile: TileId,
        to: Vec3,
        duration_ms: u32,
    },
    /// A tile was matched; `at` is its last resting position
    Exploded { tile: TileId, at: Vec3 },
    /// A tile left the grid and its visual can be released
    Removed { tile: TileId },
}

impl GridEvent {
    pub fn tile(&self) -> TileId {
        match *self {
            GridEvent::Spawned { tile, .. }
            | GridEvent::Moved { tile, .. }
            | GridEvent::Exploded { tile, .. }
            | GridEvent::Removed { tile } => tile,
        }
    }
}

/// Gameplay notifications emitted by the turn controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    /// First cell of a swap was chosen
    Selected { at: CellPos },
    /// Two neighbours were swapped optimistically
    SwapPerformed { a: CellPos, b: CellPos },
    /// The second click was not a neighbour; it became the new selection
    SwapRejected { from: CellPos, to: CellPos },
    /// A swap produced no match and was reverted
    SwapUndone { a: CellPos, b: CellPos },
    /// One detect/compact pass found matches
    CascadeRound { round: u32, bonus: MatchBonus },
    /// The grid became stable again after one or more rounds
    CascadeSettled { rounds: u32, bonus: MatchBonus },
}
