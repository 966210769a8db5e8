//! Bounding-box rasterization with barycentric coverage.
//!
//! # Algorithm Overview
//!
//! 1. Project the three clip-space vertices to pixel space
//! 2. Truncate their extents to an integer bounding box
//! 3. For each pixel center in the box, compute barycentric weights as ratios
//!    of signed sub-triangle areas to the full signed area
//! 4. Covered pixels (all weights >= 0) interpolate `z / w`, run the depth
//!    test, interpolate attributes and invoke the fragment shader
//!
//! # Attribute Interpolation
//!
//! ```text
//! flat           value = attr_0
//! noperspective  value = sum(l_i * attr_i)
//! smooth         l_i'  = l_i / (w_i * sum(l_j / w_j))
//!                value = sum(l_i' * attr_i)
//! ```
//!
//! The depth buffer is updated as soon as the test passes, before the
//! fragment shader runs.

use super::{is_covered, ScreenTriangle};
use crate::clipper::TriangleSink;
use crate::colors;
use crate::math::vec2::Vec2;
use crate::render::framebuffer::FrameBuffer;
use crate::shader::{
    FragmentInput, FragmentShader, GeometryVertex, InterpolationRule, MAX_FLOATS_PER_VERTEX,
};

/// Rasterizes clipped triangles into a [`FrameBuffer`].
///
/// Holds everything a fragment needs: the target, the fragment shader, the
/// uniform data and one interpolation rule per attribute slot.
pub struct BarycentricRasterizer<'a, U, FS: ?Sized> {
    frame: FrameBuffer<'a>,
    shader: &'a FS,
    uniform: &'a U,
    rules: &'a [InterpolationRule],
}

impl<'a, U, FS> BarycentricRasterizer<'a, U, FS>
where
    FS: FragmentShader<U> + ?Sized,
{
    pub fn new(
        frame: FrameBuffer<'a>,
        shader: &'a FS,
        uniform: &'a U,
        rules: &'a [InterpolationRule],
    ) -> Self {
        debug_assert!(rules.len() <= MAX_FLOATS_PER_VERTEX);
        Self {
            frame,
            shader,
            uniform,
            rules,
        }
    }

    /// Fill a triangle that lies entirely inside the clip volume.
    pub fn fill_triangle(&mut self, triangle: [&GeometryVertex<'_>; 3]) {
        let width = self.frame.width();
        let height = self.frame.height();
        let screen = ScreenTriangle::project(triangle.map(|v| v.position), width, height);
        if screen.is_degenerate() {
            return;
        }

        let bounds = screen.bounds(width, height);
        log::trace!("rasterize {:?} area {}", bounds, screen.area);
        if bounds.is_empty() {
            return;
        }

        let ndc_z = triangle.map(|v| v.position.z / v.position.w);
        let n = self.rules.len();
        let mut attributes = [0.0f32; MAX_FLOATS_PER_VERTEX];

        for y in bounds.min_y..=bounds.max_y {
            for x in bounds.min_x..=bounds.max_x {
                let weights = screen.weights(Vec2::new(x as f32, y as f32));
                if !is_covered(weights) {
                    continue;
                }

                let depth = weights[0] * ndc_z[0] + weights[1] * ndc_z[1] + weights[2] * ndc_z[2];
                if !self.frame.test_and_set_depth(x, y, depth) {
                    continue;
                }

                interpolate_attributes(self.rules, triangle, weights, &mut attributes[..n]);
                let output = self.shader.shade(
                    &FragmentInput {
                        data: &attributes[..n],
                    },
                    self.uniform,
                );
                self.frame.set_pixel(x, y, colors::pack_rgb(output.color));
            }
        }
    }
}

impl<U, FS> TriangleSink for BarycentricRasterizer<'_, U, FS>
where
    FS: FragmentShader<U> + ?Sized,
{
    #[inline]
    fn accept(&mut self, triangle: [&GeometryVertex<'_>; 3]) {
        self.fill_triangle(triangle);
    }
}

/// Interpolate every attribute slot at screen-space barycentric `weights`.
///
/// `out` must have one entry per rule.
pub fn interpolate_attributes(
    rules: &[InterpolationRule],
    triangle: [&GeometryVertex<'_>; 3],
    weights: [f32; 3],
    out: &mut [f32],
) {
    let [a, b, c] = triangle.map(|v| v.attributes());
    let w = triangle.map(|v| v.position.w);

    let inv_w_sum = weights[0] / w[0] + weights[1] / w[1] + weights[2] / w[2];
    let corrected = [
        weights[0] / (w[0] * inv_w_sum),
        weights[1] / (w[1] * inv_w_sum),
        weights[2] / (w[2] * inv_w_sum),
    ];

    for (k, (rule, value)) in rules.iter().zip(out.iter_mut()).enumerate() {
        *value = match rule {
            InterpolationRule::Flat => a[k],
            InterpolationRule::Smooth => {
                corrected[0] * a[k] + corrected[1] * b[k] + corrected[2] * c[k]
            }
            InterpolationRule::NoPerspective => {
                weights[0] * a[k] + weights[1] * b[k] + weights[2] * c[k]
            }
        };
    }
}
