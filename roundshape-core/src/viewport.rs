/// Mapping from shape coordinates onto a character or pixel grid
use nalgebra::{Matrix3, Point2};
use serde::{Deserialize, Serialize};

use crate::geometry::Bounds;
use crate::transform::Transform2;

/// Target grid with shape-space to screen-space mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Height of one cell divided by its width (terminal cells are ~2:1)
    pub cell_aspect: f32,
    /// Cells left empty on every side
    pub margin: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cell_aspect: 2.0,
            margin: 1,
        }
    }

    /// Matrix that fits `bounds` centered in the grid, y axis pointing down
    pub fn fit_matrix(&self, bounds: &Bounds) -> Matrix3<f32> {
        let usable_w = (self.width.saturating_sub(2 * self.margin)).max(1) as f32;
        let usable_h = (self.height.saturating_sub(2 * self.margin)).max(1) as f32;

        // Shape units per cell along each screen axis
        let sx = usable_w / bounds.width().max(f32::EPSILON);
        let sy = usable_h * self.cell_aspect / bounds.height().max(f32::EPSILON);
        let scale = sx.min(sy);

        let center = bounds.center();
        Transform2::translation_matrix(self.width as f32 * 0.5, self.height as f32 * 0.5)
            * Transform2::scale_matrix(scale, -scale / self.cell_aspect)
            * Transform2::translation_matrix(-center.x, -center.y)
    }

    /// Project a shape-space point with a matrix from [`Viewport::fit_matrix`]
    pub fn to_screen(&self, matrix: &Matrix3<f32>, point: &Point2<f32>) -> (f32, f32) {
        let p = Transform2::apply(matrix, point);
        (p.x, p.y)
    }

    /// True when a screen position falls inside the grid
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::default();
        assert_eq!((viewport.width, viewport.height), (80, 24));
        assert_eq!(viewport.cell_aspect, 2.0);
    }

    #[test]
    fn test_fit_centers_and_flips() {
        let viewport = Viewport::new(40, 20);
        let bounds = Bounds {
            min: Point2::new(-1.0, -1.0),
            max: Point2::new(1.0, 1.0),
        };
        let m = viewport.fit_matrix(&bounds);

        let (cx, cy) = viewport.to_screen(&m, &Point2::new(0.0, 0.0));
        assert!((cx - 20.0).abs() < 1e-4);
        assert!((cy - 10.0).abs() < 1e-4);

        // Up in shape space is up on screen
        let (_, top) = viewport.to_screen(&m, &Point2::new(0.0, 1.0));
        assert!(top < cy);

        for p in [Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0)] {
            let (x, y) = viewport.to_screen(&m, &p);
            assert!(viewport.contains(x, y));
        }
    }
}
