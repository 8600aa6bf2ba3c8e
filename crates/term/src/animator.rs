//! Tile animator: turns drained [`GridEvent`]s into timed sprite motion.
//!
//! The engine never waits on visuals. A `Moved` event starts a tween from
//! wherever the sprite currently is, so a tile that receives a second target
//! mid-flight simply redirects. Explosions leave a short-lived burst behind.

use std::collections::BTreeMap;

use crate::types::{GridEvent, TileId, TileKind, Vec3};

/// How long an explosion burst stays visible
pub const BURST_MS: u64 = 250;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween {
    from: Vec3,
    to: Vec3,
    start_ms: u64,
    duration_ms: u32,
}

impl Tween {
    fn at_rest(pos: Vec3) -> Self {
        Self {
            from: pos,
            to: pos,
            start_ms: 0,
            duration_ms: 0,
        }
    }

    fn position(&self, now_ms: u64) -> Vec3 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let t = now_ms.saturating_sub(self.start_ms) as f32 / self.duration_ms as f32;
        self.from.lerp(self.to, ease_in_out(t.clamp(0.0, 1.0)))
    }

    fn done(&self, now_ms: u64) -> bool {
        now_ms >= self.start_ms + self.duration_ms as u64
    }
}

fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// A drawable tile at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub tile: TileId,
    pub kind: TileKind,
    pub pos: Vec3,
    pub exploded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    kind: TileKind,
    tween: Tween,
    exploded: bool,
}

/// A removal effect at a world position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub at: Vec3,
    pub until_ms: u64,
}

#[derive(Debug, Default, Clone)]
pub struct TileAnimator {
    entries: BTreeMap<TileId, Entry>,
    bursts: Vec<Burst>,
}

impl TileAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every sprite (new episode)
    pub fn clear(&mut self) {
        self.entries.clear();
        self.bursts.clear();
    }

    pub fn apply(&mut self, event: GridEvent, now_ms: u64) {
        match event {
            GridEvent::Spawned { tile, kind, at } => {
                self.entries.insert(
                    tile,
                    Entry {
                        kind,
                        tween: Tween::at_rest(at),
                        exploded: false,
                    },
                );
            }
            GridEvent::Moved {
                tile,
                to,
                duration_ms,
            } => {
                if let Some(entry) = self.entries.get_mut(&tile) {
                    entry.tween = Tween {
                        from: entry.tween.position(now_ms),
                        to,
                        start_ms: now_ms,
                        duration_ms,
                    };
                }
            }
            GridEvent::Exploded { tile, at } => {
                if let Some(entry) = self.entries.get_mut(&tile) {
                    entry.exploded = true;
                }
                self.bursts.push(Burst {
                    at,
                    until_ms: now_ms + BURST_MS,
                });
            }
            GridEvent::Removed { tile } => {
                self.entries.remove(&tile);
            }
        }
    }

    pub fn apply_all(&mut self, events: impl IntoIterator<Item = GridEvent>, now_ms: u64) {
        for event in events {
            self.apply(event, now_ms);
        }
    }

    /// Forget expired bursts
    pub fn prune(&mut self, now_ms: u64) {
        self.bursts.retain(|b| b.until_ms > now_ms);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Any tween or burst still running at `now_ms`
    pub fn is_animating(&self, now_ms: u64) -> bool {
        self.entries.values().any(|e| !e.tween.done(now_ms))
            || self.bursts.iter().any(|b| b.until_ms > now_ms)
    }

    pub fn position(&self, tile: TileId, now_ms: u64) -> Option<Vec3> {
        self.entries.get(&tile).map(|e| e.tween.position(now_ms))
    }

    /// Sprites ordered by tile id
    pub fn sprites(&self, now_ms: u64) -> impl Iterator<Item = Sprite> + '_ {
        self.entries.iter().map(move |(&tile, e)| Sprite {
            tile,
            kind: e.kind,
            pos: e.tween.position(now_ms),
            exploded: e.exploded,
        })
    }

    pub fn bursts(&self, now_ms: u64) -> impl Iterator<Item = &Burst> + '_ {
        self.bursts.iter().filter(move |b| b.until_ms > now_ms)
    }
}
