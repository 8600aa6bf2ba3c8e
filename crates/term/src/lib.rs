//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It renders into
//! a plain framebuffer that is diffed and flushed to the terminal, without
//! any widget toolkit.
//!
//! - [`animator`] plays the core's spawn/move/explode notifications
//! - [`board_view`] draws a turn snapshot and hit-tests clicks
//! - [`render_throttle`] skips redundant frames of a resting board
//! - [`renderer`] owns the terminal session

pub mod animator;
pub mod board_view;
pub mod fb;
pub mod render_throttle;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_types as types;

pub use animator::{Burst, Sprite, TileAnimator};
pub use board_view::{BoardScene, BoardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use render_throttle::{frame_fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
