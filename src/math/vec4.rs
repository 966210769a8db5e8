//! 4D vector for homogeneous clip-space positions.

use std::ops::Index;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Build a position from the first four floats of a slice.
    ///
    /// # Panics
    /// Panics if the slice holds fewer than four values.
    pub fn from_slice(values: &[f32]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Linearly interpolate between two vectors.
    ///
    /// `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
            self.w + (other.w - self.w) * t,
        )
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;

    /// Component by axis: 0 = x, 1 = y, 2 = z, 3 = w.
    fn index(&self, axis: usize) -> &f32 {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vec4 axis out of range: {axis}"),
        }
    }
}
