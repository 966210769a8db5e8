//! Triangle rasterization.
//!
//! Triangles arrive in clip space, already inside all six clip planes. They
//! are projected to pixel space as a [`ScreenTriangle`] and scanned by the
//! [`BarycentricRasterizer`], which tests coverage, depth, interpolates
//! attributes and runs the fragment shader.

mod barycentric;

pub use barycentric::{interpolate_attributes, BarycentricRasterizer};

use crate::math::geometry::signed_area;
use crate::math::vec2::Vec2;
use crate::math::vec4::Vec4;

/// Map a clip-space position to pixel coordinates.
///
/// NDC `-1` lands half a pixel before the first pixel center and `+1` half a
/// pixel after the last one. There is no y flip: NDC `y = -1` is row 0.
#[inline]
pub fn project_to_pixel(position: Vec4, width: usize, height: usize) -> Vec2 {
    let half_w = (width / 2) as f32;
    let half_h = (height / 2) as f32;
    Vec2::new(
        half_w * (position.x / position.w) + (half_w - 0.5),
        half_h * (position.y / position.w) + (half_h - 0.5),
    )
}

/// Inclusive pixel bounds of a triangle, clamped to the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl PixelBounds {
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

/// A triangle projected to pixel space, ready for scanning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTriangle {
    pub points: [Vec2; 3],
    /// Signed shoelace area of `points`.
    pub area: f32,
}

impl ScreenTriangle {
    pub fn new(points: [Vec2; 3]) -> Self {
        Self {
            points,
            area: signed_area(points[0], points[1], points[2]),
        }
    }

    pub fn project(positions: [Vec4; 3], width: usize, height: usize) -> Self {
        Self::new(positions.map(|p| project_to_pixel(p, width, height)))
    }

    /// Zero-area (or non-finite) triangles cover no pixels.
    pub fn is_degenerate(&self) -> bool {
        self.area == 0.0 || !self.area.is_finite()
    }

    /// Bounding box of the three points, truncated to integers and clamped
    /// to a `width` x `height` target.
    pub fn bounds(&self, width: usize, height: usize) -> PixelBounds {
        let [a, b, c] = self.points;
        PixelBounds {
            min_x: (a.x.min(b.x).min(c.x) as i32).max(0),
            max_x: (a.x.max(b.x).max(c.x) as i32).min(width as i32 - 1),
            min_y: (a.y.min(b.y).min(c.y) as i32).max(0),
            max_y: (a.y.max(b.y).max(c.y) as i32).min(height as i32 - 1),
        }
    }

    /// Barycentric weights of `p` as ratios of sub-triangle areas to the
    /// full area. All three are non-negative exactly when `p` is covered,
    /// whatever the winding.
    #[inline]
    pub fn weights(&self, p: Vec2) -> [f32; 3] {
        let [a, b, c] = self.points;
        [
            signed_area(p, b, c) / self.area,
            signed_area(p, c, a) / self.area,
            signed_area(p, a, b) / self.area,
        ]
    }
}

/// Coverage test: edges are inclusive and NaN weights never cover.
#[inline]
pub fn is_covered(weights: [f32; 3]) -> bool {
    weights.iter().all(|&w| w >= 0.0)
}
