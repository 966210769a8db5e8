//! Recursive homogeneous triangle clipping.
//!
//! A triangle is tested against the six planes of the clip cube one face at a
//! time. At each face the three vertices are classified as inside or outside
//! and the triangle is either forwarded unchanged, split into one or two
//! smaller triangles, or dropped:
//!
//! ```text
//!   3 in          -> recurse with the same triangle
//!   2 in / 1 out  -> two triangles covering the clipped quad
//!   1 in / 2 out  -> one triangle
//!   0 in          -> dropped
//! ```
//!
//! Triangles that survive all six faces are handed to a [`TriangleSink`],
//! normally the rasterizer. Recursion depth is fixed at six, so a single input
//! triangle yields at most 64 output triangles.
//!
//! Vertices created at an intersection live on the stack frame of the face
//! that created them and are only ever borrowed by that frame's children.

pub mod clip_space;

pub use clip_space::{ClipPlane, CLIP_PLANE_COUNT};

use crate::shader::{GeometryVertex, InterpolationRule};

/// Receiver of triangles that lie entirely inside the clip volume.
pub trait TriangleSink {
    fn accept(&mut self, triangle: [&GeometryVertex<'_>; 3]);
}

/// Clips triangles against the canonical clip cube.
///
/// The clipper only needs the interpolation rule of each attribute slot; its
/// length is the number of floats every vertex carries.
pub struct Clipper<'r> {
    rules: &'r [InterpolationRule],
}

impl<'r> Clipper<'r> {
    pub fn new(rules: &'r [InterpolationRule]) -> Self {
        Self { rules }
    }

    /// Clip one triangle and feed every surviving piece to `sink`.
    pub fn clip<S: TriangleSink + ?Sized>(&self, triangle: [&GeometryVertex<'_>; 3], sink: &mut S) {
        self.clip_face(triangle, 0, sink);
    }

    fn clip_face<S: TriangleSink + ?Sized>(
        &self,
        triangle: [&GeometryVertex<'_>; 3],
        face: usize,
        sink: &mut S,
    ) {
        let Some(plane) = ClipPlane::from_face(face) else {
            sink.accept(triangle);
            return;
        };

        let [a, b, c] = triangle;
        let inside = [
            plane.contains(a.position),
            plane.contains(b.position),
            plane.contains(c.position),
        ];
        log::trace!("clip face {face} ({plane:?}): inside {inside:?}");

        let next = face + 1;
        match inside {
            [true, true, true] => self.clip_face(triangle, next, sink),
            [false, true, true] => {
                let ba = self.intersect(b, a, plane);
                let ca = self.intersect(c, a, plane);
                self.clip_face([b, c, &ba], next, sink);
                self.clip_face([c, &ca, &ba], next, sink);
            }
            [true, false, true] => {
                let cb = self.intersect(c, b, plane);
                let ab = self.intersect(a, b, plane);
                self.clip_face([c, a, &cb], next, sink);
                self.clip_face([a, &ab, &cb], next, sink);
            }
            [true, true, false] => {
                let ac = self.intersect(a, c, plane);
                let bc = self.intersect(b, c, plane);
                self.clip_face([a, b, &ac], next, sink);
                self.clip_face([b, &bc, &ac], next, sink);
            }
            [false, false, true] => {
                let ca = self.intersect(c, a, plane);
                let cb = self.intersect(c, b, plane);
                self.clip_face([c, &ca, &cb], next, sink);
            }
            [true, false, false] => {
                let ab = self.intersect(a, b, plane);
                let ac = self.intersect(a, c, plane);
                self.clip_face([a, &ab, &ac], next, sink);
            }
            [false, true, false] => {
                let bc = self.intersect(b, c, plane);
                let ba = self.intersect(b, a, plane);
                self.clip_face([b, &bc, &ba], next, sink);
            }
            [false, false, false] => {}
        }
    }

    /// Build the vertex where the edge `inside -> outside` crosses `plane`.
    ///
    /// The position is the homogeneous lerp at the crossing parameter `t`.
    /// Attributes follow each slot's rule: flat copies the inside vertex,
    /// smooth uses `t` corrected by the endpoint `w` values, and
    /// no-perspective uses `t` directly.
    pub fn intersect(
        &self,
        inside: &GeometryVertex<'_>,
        outside: &GeometryVertex<'_>,
        plane: ClipPlane,
    ) -> GeometryVertex<'static> {
        let t = plane.intersection(inside.position, outside.position);
        let position = outside.position.lerp(inside.position, t);

        let w_in = inside.position.w;
        let w_out = outside.position.w;
        let t_smooth = t * w_in / (t * w_in + (1.0 - t) * w_out);

        let attributes = self
            .rules
            .iter()
            .zip(inside.attributes().iter().zip(outside.attributes()))
            .map(|(rule, (&a_in, &a_out))| match rule {
                InterpolationRule::Flat => a_in,
                InterpolationRule::Smooth => t_smooth * a_in + (1.0 - t_smooth) * a_out,
                InterpolationRule::NoPerspective => t * a_in + (1.0 - t) * a_out,
            })
            .collect();

        GeometryVertex::owned(position, attributes)
    }
}
