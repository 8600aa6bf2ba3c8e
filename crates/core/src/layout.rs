//! Layout module - maps cell coordinates to world positions and back
//!
//! A cell `(h, v)` sits at `origin + h * step_h + v * step_v`. The mapping is
//! defined for any integer pair, including cells outside the grid; spawned
//! tiles are parked above the top row this way before they move in.

use serde::{Deserialize, Serialize};

use crate::types::{CellPos, Vec3};

/// Below this Gram determinant the two step vectors are treated as parallel.
const DEGENERATE_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub origin: Vec3,
    pub step_h: Vec3,
    pub step_v: Vec3,
}

impl Layout {
    pub fn new(origin: Vec3, step_h: Vec3, step_v: Vec3) -> Self {
        Self {
            origin,
            step_h,
            step_v,
        }
    }

    /// World position of the cell `(h, v)`
    #[inline]
    pub fn position_of(&self, h: i32, v: i32) -> Vec3 {
        self.origin + self.step_h * h as f32 + self.step_v * v as f32
    }

    /// Fractional cell coordinates of a world point.
    ///
    /// The point is projected onto the plane spanned by the two step vectors,
    /// so hits slightly in front of or behind the board still resolve.
    /// Returns `None` when the step vectors are parallel or zero.
    pub fn cell_coords(&self, world: Vec3) -> Option<(f32, f32)> {
        let a = self.step_h;
        let b = self.step_v;
        let d = world - self.origin;

        let aa = a.dot(a);
        let bb = b.dot(b);
        let ab = a.dot(b);
        let det = aa * bb - ab * ab;
        if det.abs() < DEGENERATE_EPSILON {
            return None;
        }

        let ad = a.dot(d);
        let bd = b.dot(d);
        let h = (bb * ad - ab * bd) / det;
        let v = (aa * bd - ab * ad) / det;
        Some((h, v))
    }

    /// The cell whose center is closest to `world`, unbounded
    pub fn nearest_cell(&self, world: Vec3) -> Option<CellPos> {
        let (h, v) = self.cell_coords(world)?;
        Some(CellPos::new(h.round() as i32, v.round() as i32))
    }
}

/// Unit cells on the XY plane, `h` along +x and `v` along +y (up), which is
/// the plane a terminal draws in. A board lying on a 3D floor uses e.g.
/// `step_h = (-1, 0, 0)` and `step_v = (0, 0, 1)`; set it through the config.
impl Default for Layout {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            step_h: Vec3::new(1.0, 0.0, 0.0),
            step_v: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn position_of_is_affine() {
        let layout = Layout::new(
            Vec3::new(10.0, 0.0, 5.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        assert_eq!(layout.position_of(0, 0), Vec3::new(10.0, 0.0, 5.0));
        assert_eq!(layout.position_of(3, 2), Vec3::new(7.0, 0.0, 7.0));
        // Above the grid is still well defined.
        assert_eq!(layout.position_of(0, 9), Vec3::new(10.0, 0.0, 14.0));
    }

    #[test]
    fn default_basis_is_screen_plane() {
        let layout = Layout::default();
        assert_eq!(layout.position_of(1, 0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(layout.position_of(0, 1), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(layout.position_of(2, 3).z, 0.0);
    }

    #[test]
    fn cell_coords_inverts_position_of() {
        let layout = Layout::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 1.5),
        );
        for h in -2..6 {
            for v in -2..6 {
                let (fh, fv) = layout.cell_coords(layout.position_of(h, v)).unwrap();
                assert!(approx(fh, h as f32), "h {} -> {}", h, fh);
                assert!(approx(fv, v as f32), "v {} -> {}", v, fv);
            }
        }
    }

    #[test]
    fn cell_coords_ignores_offset_off_the_plane() {
        let layout = Layout::default();
        let hit = layout.position_of(2, 3) + Vec3::new(0.0, 0.0, 4.0);
        assert_eq!(layout.nearest_cell(hit), Some(CellPos::new(2, 3)));
    }

    #[test]
    fn nearest_cell_rounds_to_center() {
        let layout = Layout::default();
        assert_eq!(
            layout.nearest_cell(Vec3::new(1.4, 2.6, 0.0)),
            Some(CellPos::new(1, 3))
        );
        assert_eq!(
            layout.nearest_cell(Vec3::new(-0.6, 0.2, 0.0)),
            Some(CellPos::new(-1, 0))
        );
    }

    #[test]
    fn degenerate_basis_has_no_inverse() {
        let layout = Layout::new(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        );
        assert_eq!(layout.cell_coords(Vec3::new(1.0, 0.0, 0.0)), None);
    }
}
