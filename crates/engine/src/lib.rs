//! Turn engine: configuration, selection rules and the tick-driven
//! [`TurnController`] that sits on top of the core grid.
//!
//! The engine owns no clock. Hosts call [`TurnController::advance`] with
//! their own monotonic milliseconds and drain the produced events.

pub mod config;
pub mod controller;
pub mod pointer;
pub mod selection;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use config::EngineConfig;
pub use controller::{TurnController, TurnSnapshot};
pub use pointer::{resolve_on_board, Click, LayoutResolver, PointerResolver};
pub use selection::{select, swap_allowed, SelectOutcome};
