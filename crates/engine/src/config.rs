//! Engine configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults, a
//! JSON document, then `MATCH3_*` environment variables. A value that fails to
//! parse is ignored and the previous layer's value is kept. [`EngineConfig::validate`]
//! reports bad values as [`GridError`]s.

use serde::{Deserialize, Serialize};

use crate::core::{Grid, GridError, Layout};
use crate::types::{
    Vec3, DEFAULT_HEIGHT, DEFAULT_MOVE_MS, DEFAULT_TILE_KINDS, DEFAULT_WIDTH, MIN_RUN,
};

pub const ENV_WIDTH: &str = "MATCH3_WIDTH";
pub const ENV_HEIGHT: &str = "MATCH3_HEIGHT";
pub const ENV_KINDS: &str = "MATCH3_KINDS";
pub const ENV_MOVE_MS: &str = "MATCH3_MOVE_MS";
pub const ENV_SEED: &str = "MATCH3_SEED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u16,
    pub height: u16,
    pub tile_kinds: u8,
    /// Shared duration of a swap, an undo, or one cascade pass
    pub move_ms: u32,
    pub origin: Vec3,
    /// World offset between neighbouring columns; defaults to +x
    pub step_h: Vec3,
    /// World offset between neighbouring rows; defaults to +y (screen up)
    pub step_v: Vec3,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let layout = Layout::default();
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tile_kinds: DEFAULT_TILE_KINDS,
            move_ms: DEFAULT_MOVE_MS,
            origin: layout.origin,
            step_h: layout.step_h,
            step_v: layout.step_v,
            seed: 1,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Override fields from a variable lookup (the environment in production).
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|s| s.trim().parse().ok())
        }

        if let Some(v) = parsed(&lookup, ENV_WIDTH) {
            self.width = v;
        }
        if let Some(v) = parsed(&lookup, ENV_HEIGHT) {
            self.height = v;
        }
        if let Some(v) = parsed(&lookup, ENV_KINDS) {
            self.tile_kinds = v;
        }
        if let Some(v) = parsed(&lookup, ENV_MOVE_MS) {
            self.move_ms = v;
        }
        if let Some(v) = parsed(&lookup, ENV_SEED) {
            self.seed = v;
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.origin, self.step_h, self.step_v)
    }

    /// Range checks, plus boards that could never settle: with one kind every
    /// line of [`MIN_RUN`] cells is a run, and every refill makes it again.
    pub fn validate(&self) -> Result<(), GridError> {
        Grid::validate(self.width, self.height, self.tile_kinds)?;
        let longest = self.width.max(self.height) as usize;
        if self.tile_kinds == 1 && longest >= MIN_RUN {
            return Err(GridError::NeverSettles {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Fill a fresh random grid with this configuration and `seed`.
    pub fn build_grid(&self, seed: u32) -> Result<Grid, GridError> {
        Grid::create(self.width, self.height, self.layout(), self.tile_kinds, seed)
    }
}
