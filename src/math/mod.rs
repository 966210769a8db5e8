//! Small fixed-size vector types and the 2D/homogeneous geometry helpers
//! used by the clipper and rasterizer.

pub mod geometry;
pub mod vec2;
pub mod vec4;
