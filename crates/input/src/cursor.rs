//! Keyboard cursor over the board.

use crate::map::Direction;
use crate::types::CellPos;

/// A cell cursor clamped to a `width x height` board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: CellPos,
    width: u16,
    height: u16,
}

impl Cursor {
    /// Start in the middle of the board
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            pos: CellPos::new(width as i32 / 2, height as i32 / 2),
            width,
            height,
        }
    }

    pub fn pos(&self) -> CellPos {
        self.pos
    }

    pub fn move_by(&mut self, dir: Direction) {
        let (dh, dv) = match dir {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        };
        self.pos = self.clamp(self.pos.offset(dh, dv));
    }

    /// Jump to a cell (e.g. after a mouse click), clamped to the board
    pub fn set(&mut self, pos: CellPos) {
        self.pos = self.clamp(pos);
    }

    /// Follow a board size change
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.pos = self.clamp(self.pos);
    }

    fn clamp(&self, pos: CellPos) -> CellPos {
        let max_h = (self.width as i32 - 1).max(0);
        let max_v = (self.height as i32 - 1).max(0);
        CellPos::new(pos.h.clamp(0, max_h), pos.v.clamp(0, max_v))
    }
}
