//! Frame pacing for a mostly static board.
//!
//! While tiles are moving every frame is drawn. Once the board is at rest a
//! frame is only drawn when its fingerprint changes or when the refresh
//! interval has passed.

use crate::engine::TurnSnapshot;
use crate::types::CellPos;

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    refresh_ms: u64,
    last_render_ms: u64,
    last_fingerprint: Option<u64>,
}

impl RenderThrottle {
    pub fn new(refresh_ms: u64) -> Self {
        Self {
            refresh_ms,
            last_render_ms: 0,
            last_fingerprint: None,
        }
    }

    /// Force the next call to render (terminal resize, restart)
    pub fn invalidate(&mut self) {
        self.last_fingerprint = None;
    }

    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, animating: bool) -> bool {
        let changed = self.last_fingerprint != Some(fingerprint);
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.refresh_ms;
        if !(animating || changed || stale) {
            return false;
        }
        self.last_render_ms = now_ms;
        self.last_fingerprint = Some(fingerprint);
        true
    }
}

/// Hash of everything a static frame shows: board, selection, cursor, counters.
pub fn frame_fingerprint(snap: &TurnSnapshot, cursor: Option<CellPos>) -> u64 {
    let mut h = snap.grid.board_hash;
    let mut mix = |x: u64| {
        h ^= x;
        h = h.wrapping_mul(0x00000100000001B3);
    };
    let pos = |p: Option<CellPos>| match p {
        Some(p) => ((p.h as u32 as u64) << 32) | p.v as u32 as u64,
        None => u64::MAX,
    };
    mix(pos(snap.selected));
    mix(pos(cursor));
    mix(snap.phase as u64);
    mix(snap.episode_id as u64);
    mix(snap.swaps_performed as u64);
    mix(snap.swaps_undone as u64);
    mix(snap.total_bonus.runs() as u64);
    h
}
