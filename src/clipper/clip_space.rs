//! The six half-spaces of the canonical clip volume.
//!
//! Clipping occurs in homogeneous clip space, before the perspective divide.
//! The clip volume is defined by:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w   ([-1, 1] depth range, OpenGL-style)
//! ```

use crate::math::geometry;
use crate::math::vec4::Vec4;

/// Number of clip planes a triangle is tested against.
pub const CLIP_PLANE_COUNT: usize = 6;

/// One plane of the canonical clip cube, in the order faces are processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// Face 0: x <= w
    Right,
    /// Face 1: x >= -w
    Left,
    /// Face 2: y <= w
    Top,
    /// Face 3: y >= -w
    Bottom,
    /// Face 4: z <= w
    Far,
    /// Face 5: z >= -w
    Near,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; CLIP_PLANE_COUNT] = [
        ClipPlane::Right,
        ClipPlane::Left,
        ClipPlane::Top,
        ClipPlane::Bottom,
        ClipPlane::Far,
        ClipPlane::Near,
    ];

    /// The plane processed at recursion depth `face`, or `None` once all six
    /// have been handled.
    pub fn from_face(face: usize) -> Option<Self> {
        Self::ALL.get(face).copied()
    }

    /// Position component the plane bounds: 0 = x, 1 = y, 2 = z.
    pub fn axis(self) -> usize {
        match self {
            Self::Right | Self::Left => 0,
            Self::Top | Self::Bottom => 1,
            Self::Far | Self::Near => 2,
        }
    }

    /// True for the `coord <= w` planes, false for the `coord >= -w` ones.
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Right | Self::Top | Self::Far)
    }

    /// Whether a clip-space position lies in this plane's half-space.
    /// Points exactly on the plane are inside.
    #[inline]
    pub fn contains(self, p: Vec4) -> bool {
        let coord = p[self.axis()];
        if self.is_positive() {
            coord <= p.w
        } else {
            coord >= -p.w
        }
    }

    /// Parameter `t` of the crossing point on the edge `inside -> outside`,
    /// weighted so that `t * inside + (1 - t) * outside` lies on the plane.
    #[inline]
    pub fn intersection(self, inside: Vec4, outside: Vec4) -> f32 {
        geometry::plane_intersection(inside, outside, self.axis(), self.is_positive())
    }
}
