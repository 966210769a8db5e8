//! Owned color and depth storage that draws are rendered into.

use std::path::Path;

use image::{Rgb, RgbImage};

use super::framebuffer::FrameBuffer;
use crate::colors;
use crate::math::geometry::image_index;

/// Initial depth of every pixel. Any post-divide `z` in `[-1, 1]` is closer.
pub const CLEAR_DEPTH: f32 = 2.0;

/// A width x height image with a packed ARGB color buffer and a float depth
/// buffer.
///
/// Row `y` of the buffers is pixel-space row `y`, so row 0 is the bottom of
/// the clip volume.
pub struct RenderTarget {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: usize,
    height: usize,
}

impl RenderTarget {
    /// Allocate buffers cleared to black and [`CLEAR_DEPTH`].
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            color_buffer: vec![colors::BLACK; size],
            depth_buffer: vec![CLEAR_DEPTH; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    /// Restore both buffers to their initial values.
    pub fn clear(&mut self) {
        self.color_buffer.fill(colors::BLACK);
        self.depth_buffer.fill(CLEAR_DEPTH);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// Packed color at (x, y).
    ///
    /// # Panics
    /// Panics if the coordinates are outside the target.
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.color_buffer[image_index(x, y, self.width)]
    }

    /// Stored depth at (x, y).
    ///
    /// # Panics
    /// Panics if the coordinates are outside the target.
    pub fn depth(&self, x: usize, y: usize) -> f32 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.depth_buffer[image_index(x, y, self.width)]
    }

    /// Borrow both buffers as a [`FrameBuffer`] for drawing.
    pub fn frame_buffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }

    /// Convert the color buffer to an RGB image.
    ///
    /// Buffer row 0 is the bottom row, so rows are flipped to put the top of
    /// the clip volume at the top of the image.
    pub fn to_image(&self) -> RgbImage {
        let width = self.width as u32;
        let height = self.height as u32;
        RgbImage::from_fn(width, height, |x, y| {
            let row = (height - 1 - y) as usize;
            Rgb(colors::unpack_rgb(
                self.color_buffer[image_index(x as usize, row, self.width)],
            ))
        })
    }

    /// Write the color buffer to a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.to_image().save_with_format(path, image::ImageFormat::Png)
    }
}
