//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a view into color and depth buffers with bounds-checked access.
//! The depth buffer enables hidden surface removal via the z-buffer algorithm.

use crate::math::geometry::image_index;

/// A view into color and depth buffers.
///
/// Wraps 1D slices with width/height metadata to enable 2D pixel access.
/// This is a borrowed view, not an owning type; [`RenderTarget`] hands one
/// out for the duration of a draw.
///
/// # Depth Buffer
///
/// The depth buffer stores post-divide `z` in `[-1, 1]`. Smaller values are
/// closer; a cleared buffer holds 2.0 so the first covering fragment always
/// wins.
///
/// [`RenderTarget`]: super::target::RenderTarget
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: usize,
    height: usize,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: usize,
        height: usize,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            width * height,
            "Color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth_buffer.len(),
            width * height,
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            Some(image_index(x as usize, y as usize, self.width))
        } else {
            None
        }
    }

    /// Depth test at (x, y): closer wins.
    ///
    /// Returns true and stores `depth` if it is strictly less than the value
    /// already in the buffer. Out-of-bounds coordinates always fail.
    #[inline]
    pub fn test_and_set_depth(&mut self, x: i32, y: i32, depth: f32) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.depth_buffer[idx] => {
                self.depth_buffer[idx] = depth;
                true
            }
            _ => false,
        }
    }

    /// Set a pixel without depth testing.
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }
}
