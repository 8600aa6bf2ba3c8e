//! BoardView: maps a [`TurnSnapshot`] (plus animated sprites) into a terminal
//! framebuffer, and maps terminal cells back to board cells.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Rows are flipped on screen: board row `v = 0` is the bottom line of the
//! frame, so tiles fall downward as they do in the engine.

use crate::animator::{Burst, Sprite};
use crate::core::Layout;
use crate::engine::TurnSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellPos, Phase, TileKind};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything one frame needs.
///
/// With `sprites: None` the board is drawn statically from the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct BoardScene<'a> {
    pub snap: &'a TurnSnapshot,
    pub layout: &'a Layout,
    pub sprites: Option<&'a [Sprite]>,
    pub bursts: &'a [Burst],
    pub cursor: Option<CellPos>,
}

impl<'a> BoardScene<'a> {
    pub fn new(snap: &'a TurnSnapshot, layout: &'a Layout) -> Self {
        Self {
            snap,
            layout,
            sprites: None,
            bursts: &[],
            cursor: None,
        }
    }
}

/// Screen placement of the board frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SELECTED_BG: Rgb = Rgb::new(90, 90, 120);
const CURSOR_BG: Rgb = Rgb::new(60, 60, 75);

const PALETTE: [(Rgb, char); 8] = [
    (Rgb::new(220, 80, 80), '●'),
    (Rgb::new(80, 200, 120), '■'),
    (Rgb::new(80, 140, 230), '▲'),
    (Rgb::new(240, 210, 80), '◆'),
    (Rgb::new(200, 120, 220), '★'),
    (Rgb::new(80, 220, 220), '♥'),
    (Rgb::new(255, 165, 0), '♣'),
    (Rgb::new(200, 200, 200), '♠'),
];

fn kind_look(kind: TileKind) -> (Rgb, char) {
    PALETTE[kind as usize % PALETTE.len()]
}

/// A terminal renderer for the match-3 board.
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 4x2 keeps cells roughly square and wide enough to click.
        Self {
            cell_w: 4,
            cell_h: 2,
        }
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame(&self, width: u16, height: u16, viewport: Viewport) -> Frame {
        let w = width.saturating_mul(self.cell_w).saturating_add(2);
        let h = height.saturating_mul(self.cell_h).saturating_add(2);
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Board cell under the terminal cell `(column, row)`, if any.
    pub fn cell_at(
        &self,
        width: u16,
        height: u16,
        viewport: Viewport,
        column: u16,
        row: u16,
    ) -> Option<CellPos> {
        let f = self.frame(width, height, viewport);
        let ix = column.checked_sub(f.x + 1)?;
        let iy = row.checked_sub(f.y + 1)?;
        let h = ix / self.cell_w;
        let from_top = iy / self.cell_h;
        if h >= width || from_top >= height {
            return None;
        }
        Some(CellPos::new(h as i32, (height - 1 - from_top) as i32))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, scene: &BoardScene<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let grid = &scene.snap.grid;
        let f = self.frame(grid.width, grid.height, viewport);

        let border = CellStyle::default().on(Rgb::new(0, 0, 0));
        fb.fill_rect(f.x + 1, f.y + 1, f.w - 2, f.h - 2, ' ', CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG));
        draw_border(fb, f, border);

        let dot = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for h in 0..grid.width as i32 {
            for v in 0..grid.height as i32 {
                self.fill_at(fb, f, grid.height, h as f32, v as f32, '·', dot);
            }
        }

        match scene.sprites {
            Some(sprites) => {
                for sprite in sprites {
                    if let Some((fh, fv)) = scene.layout.cell_coords(sprite.pos) {
                        self.draw_tile(fb, f, grid.height, fh, fv, sprite.kind, sprite.exploded);
                    }
                }
            }
            None => {
                for h in 0..grid.width as i32 {
                    for v in 0..grid.height as i32 {
                        if let Some(kind) = grid.kind(CellPos::new(h, v)) {
                            self.draw_tile(fb, f, grid.height, h as f32, v as f32, kind, false);
                        }
                    }
                }
            }
        }

        let burst = CellStyle::new(Rgb::new(255, 240, 150), BOARD_BG).bold();
        for b in scene.bursts {
            if let Some((fh, fv)) = scene.layout.cell_coords(b.at) {
                self.fill_at(fb, f, grid.height, fh, fv, '✶', burst);
            }
        }

        if let Some(pos) = scene.cursor {
            let style = CellStyle::new(Rgb::new(170, 170, 190), CURSOR_BG);
            self.mark_cell(fb, f, grid.height, pos, ('›', '‹'), style);
        }
        if let Some(pos) = scene.snap.selected {
            let style = CellStyle::new(Rgb::new(255, 255, 255), SELECTED_BG).bold();
            self.mark_cell(fb, f, grid.height, pos, ('▶', '◀'), style);
        }

        self.draw_side_panel(fb, scene, viewport, f);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, scene: &BoardScene<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        f: Frame,
        height: u16,
        fh: f32,
        fv: f32,
        kind: TileKind,
        exploded: bool,
    ) {
        let (color, glyph) = kind_look(kind);
        let mut body = CellStyle::new(color, BOARD_BG);
        if exploded {
            body = body.dim();
        }
        self.fill_at(fb, f, height, fh, fv, '█', body);

        // Glyph in the middle so kinds differ without color.
        if let Some((x, y)) = self.screen_origin(f, height, fh, fv) {
            let gx = x + (self.cell_w as i32 - 1) / 2;
            let gy = y + (self.cell_h as i32 - 1) / 2;
            if inside(f, gx, gy) {
                let mark = CellStyle::new(Rgb::new(0, 0, 0), color).bold();
                fb.put_char(gx as u16, gy as u16, glyph, mark);
            }
        }
    }

    /// Bracket a board cell on its glyph row
    fn mark_cell(
        &self,
        fb: &mut FrameBuffer,
        f: Frame,
        height: u16,
        pos: CellPos,
        (left, right): (char, char),
        style: CellStyle,
    ) {
        let Some((x, y)) = self.screen_origin(f, height, pos.h as f32, pos.v as f32) else {
            return;
        };
        let gy = y + (self.cell_h as i32 - 1) / 2;
        let rx = x + self.cell_w as i32 - 1;
        if inside(f, x, gy) {
            fb.put_char(x as u16, gy as u16, left, style);
        }
        if rx != x && inside(f, rx, gy) {
            fb.put_char(rx as u16, gy as u16, right, style);
        }
    }

    /// Top-left screen cell for fractional board coordinates
    fn screen_origin(&self, f: Frame, height: u16, fh: f32, fv: f32) -> Option<(i32, i32)> {
        if !fh.is_finite() || !fv.is_finite() {
            return None;
        }
        let x = f.x as f32 + 1.0 + fh * self.cell_w as f32;
        let y = f.y as f32 + 1.0 + (height as f32 - 1.0 - fv) * self.cell_h as f32;
        Some((x.round() as i32, y.round() as i32))
    }

    /// Fill one cell-sized rectangle, clipped to the board interior.
    fn fill_at(&self, fb: &mut FrameBuffer, f: Frame, height: u16, fh: f32, fv: f32, ch: char, style: CellStyle) {
        let Some((x0, y0)) = self.screen_origin(f, height, fh, fv) else {
            return;
        };
        for dy in 0..self.cell_h as i32 {
            for dx in 0..self.cell_w as i32 {
                let (x, y) = (x0 + dx, y0 + dy);
                if inside(f, x, y) {
                    fb.put_char(x as u16, y as u16, ch, style);
                }
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, scene: &BoardScene<'_>, viewport: Viewport, f: Frame) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();
        let snap = scene.snap;

        let mut y = f.y;
        fb.put_str(panel_x, y, "BONUS", label);
        y = y.saturating_add(1);
        for (name, count) in [
            ("x3 ", snap.total_bonus.three),
            ("x4 ", snap.total_bonus.four),
            ("x5+", snap.total_bonus.five_plus),
        ] {
            let x = fb.put_str(panel_x, y, name, dim);
            fb.put_u32(x + 1, y, count, value);
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "SWAPS", label);
        y = y.saturating_add(1);
        let x = fb.put_u32(panel_x, y, snap.swaps_performed, value);
        let x = fb.put_str(x + 1, y, "undone", dim);
        fb.put_u32(x + 1, y, snap.swaps_undone, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        let phase = match snap.phase {
            Phase::Idle => "your move",
            Phase::Resolving => "resolving",
            Phase::AwaitingUndo => "no match",
        };
        fb.put_str(panel_x, y, phase, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "EPISODE", label);
        y = y.saturating_add(1);
        let x = fb.put_u32(panel_x, y, snap.episode_id, value);
        let x = fb.put_str(x + 1, y, "seed", dim);
        fb.put_u32(x + 1, y, snap.seed, value);
        y = y.saturating_add(2);

        for help in ["click / space: select", "arrows: cursor", "r: restart  q: quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, help, dim);
            y = y.saturating_add(1);
        }
    }
}

fn inside(f: Frame, x: i32, y: i32) -> bool {
    let (left, top) = (f.x as i32, f.y as i32);
    x > left && x < left + f.w as i32 - 1 && y > top && y < top + f.h as i32 - 1
}

fn draw_border(fb: &mut FrameBuffer, f: Frame, style: CellStyle) {
    if f.w < 2 || f.h < 2 {
        return;
    }
    let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

    fb.put_char(f.x, f.y, '┌', style);
    fb.put_char(right, f.y, '┐', style);
    fb.put_char(f.x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for x in f.x + 1..right {
        fb.put_char(x, f.y, '─', style);
        fb.put_char(x, bottom, '─', style);
    }
    for y in f.y + 1..bottom {
        fb.put_char(f.x, y, '│', style);
        fb.put_char(right, y, '│', style);
    }
}
