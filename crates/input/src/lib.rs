//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework beyond crossterm's event
//! types. It maps key and mouse events into [`HostAction`]s and keeps a
//! keyboard [`Cursor`] for terminals without mouse reporting.

pub mod cursor;
pub mod map;

pub use tui_match3_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, handle_mouse_event, map_event, should_quit, Direction, HostAction};
