//! File logging for the terminal host.
//!
//! The terminal owns stdout while playing, so events go to the file named by
//! `MATCH3_LOG_PATH`. Without it nothing is installed and `tracing` calls are
//! no-ops. `MATCH3_LOG_LEVEL` picks the level (default `debug`).

use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::Level;

pub const ENV_LOG_PATH: &str = "MATCH3_LOG_PATH";
pub const ENV_LOG_LEVEL: &str = "MATCH3_LOG_LEVEL";

/// Returns whether a subscriber was installed.
pub fn init_from_env() -> Result<bool> {
    let path = std::env::var(ENV_LOG_PATH)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let Some(path) = path else {
        return Ok(false);
    };

    let level = std::env::var(ENV_LOG_LEVEL)
        .ok()
        .as_deref()
        .map(parse_level)
        .unwrap_or(Level::DEBUG);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {}", e))?;
    Ok(true)
}

/// Unknown names fall back to `debug`.
pub fn parse_level(s: &str) -> Level {
    Level::from_str(s.trim()).unwrap_or(Level::DEBUG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_accepts_names() {
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level(" TRACE "), Level::TRACE);
        assert_eq!(parse_level("loud"), Level::DEBUG);
    }
}
