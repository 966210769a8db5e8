//! Geometry helpers shared by the clipper and the rasterizer.

use super::vec2::Vec2;
use super::vec4::Vec4;

/// Signed area of triangle ABC using the shoelace formula.
///
/// Positive for counter-clockwise winding in a y-up pixel space, negative for
/// clockwise, zero for degenerate triangles.
#[inline]
pub fn signed_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    0.5 * ((b.x * c.y - c.x * b.y) - (a.x * c.y - c.x * a.y) + (a.x * b.y - b.x * a.y))
}

/// Row-major index of pixel `(x, y)` in a buffer `width` pixels wide.
#[inline]
pub fn image_index(x: usize, y: usize, width: usize) -> usize {
    width * y + x
}

/// Parameter `t` at which the segment `inside -> outside` crosses the clip
/// plane `axis = +w` (`positive`) or `axis = -w` (not `positive`).
///
/// The crossing point is `t * inside + (1 - t) * outside`, so `t = 1` is the
/// inside endpoint and `t = 0` the outside one. Grazing edges, where both
/// endpoints sit on the plane, produce a zero denominator and are not guarded.
#[inline]
pub fn plane_intersection(inside: Vec4, outside: Vec4, axis: usize, positive: bool) -> f32 {
    let (pos_in, w_in) = (inside[axis], inside.w);
    let (pos_out, w_out) = (outside[axis], outside.w);
    if positive {
        (w_out - pos_out) / (pos_in - w_in + w_out - pos_out)
    } else {
        (-w_out - pos_out) / (pos_in + w_in - w_out - pos_out)
    }
}
