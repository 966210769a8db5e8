//! Render targets and triangle rasterization.

pub mod framebuffer;
pub mod rasterizer;
pub mod target;

pub use framebuffer::FrameBuffer;
pub use rasterizer::BarycentricRasterizer;
pub use target::{RenderTarget, CLEAR_DEPTH};
