//! The geometry and rasterization core of a software 3D graphics pipeline.
//!
//! Given a vertex buffer, a vertex shader, a primitive assembly mode and a
//! fragment shader, the pipeline produces a color- and depth-buffered image:
//!
//! ```text
//! DrawCall -> assembler -> clipper (6 planes) -> rasterizer -> RenderTarget
//! ```
//!
//! # Quick Start
//!
//! ```
//! use softpipe::prelude::*;
//!
//! // x, y, z, w per vertex
//! let vertices = [
//!     -0.5, -0.5, 0.0, 1.0,
//!      0.5, -0.5, 0.0, 1.0,
//!      0.0,  0.5, 0.0, 1.0,
//! ];
//! let pipeline = Pipeline::new((), PassthroughShader, ConstantShader::new(1.0, 0.0, 0.0));
//! let mut target = RenderTarget::new(64, 64);
//! pipeline.render(&mut target, &DrawCall::list(&vertices, 4));
//! assert_eq!(target.pixel(32, 32), softpipe::colors::pack_rgb([1.0, 0.0, 0.0]));
//! ```

// Public API - exposed to library consumers
pub mod assembler;
pub mod clipper;
pub mod colors;
pub mod math;
pub mod pipeline;
pub mod render;
pub mod shader;

// Re-export commonly needed types at crate root for convenience
pub use assembler::{AssemblyMode, DrawCall};
pub use pipeline::Pipeline;
pub use render::RenderTarget;
pub use shader::{
    FragmentInput, FragmentOutput, FragmentShader, GeometryVertex, InterpolationRule,
    VertexInput, VertexShader,
};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use softpipe::prelude::*;
/// ```
pub mod prelude {
    // Pipeline
    pub use crate::assembler::{AssemblyMode, DrawCall};
    pub use crate::pipeline::Pipeline;

    // Shaders
    pub use crate::shader::{
        AttributeStorage, ConstantShader, FragmentInput, FragmentOutput, FragmentShader,
        GeometryVertex, InterpolationRule, PassthroughShader, VertexInput, VertexShader,
        MAX_FLOATS_PER_VERTEX,
    };

    // Math
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::render::RenderTarget;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::clipper::{Clipper, TriangleSink};
    pub use crate::render::{BarycentricRasterizer, FrameBuffer};
}
