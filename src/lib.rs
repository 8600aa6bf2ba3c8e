//! TUI match-3 (workspace facade crate).
//!
//! This package re-exports the workspace crates as
//! `tui_match3::{core,engine,input,term,types}` and hosts the pieces the
//! binary needs on top of them: argument parsing and log setup.

pub mod cli;
pub mod logging;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;
