//! The render context tying the pipeline stages together.
//!
//! A [`Pipeline`] owns the injected vertex and fragment shaders, the uniform
//! data handed to both, and the interpolation rule of every attribute slot.
//! [`Pipeline::render`] runs one [`DrawCall`] through assembly, clipping and
//! rasterization into a [`RenderTarget`].

use crate::assembler::{shade_vertices, DrawCall};
use crate::clipper::Clipper;
use crate::render::rasterizer::BarycentricRasterizer;
use crate::render::target::RenderTarget;
use crate::shader::{FragmentShader, InterpolationRule, VertexShader, MAX_FLOATS_PER_VERTEX};

pub struct Pipeline<U, VS, FS> {
    uniform: U,
    vertex_shader: VS,
    fragment_shader: FS,
    interpolation: [InterpolationRule; MAX_FLOATS_PER_VERTEX],
}

impl<U, VS, FS> Pipeline<U, VS, FS>
where
    VS: VertexShader<U>,
    FS: FragmentShader<U>,
{
    /// Create a pipeline with every attribute slot interpolated smoothly.
    pub fn new(uniform: U, vertex_shader: VS, fragment_shader: FS) -> Self {
        Self {
            uniform,
            vertex_shader,
            fragment_shader,
            interpolation: [InterpolationRule::default(); MAX_FLOATS_PER_VERTEX],
        }
    }

    /// Set the rules of the leading slots, leaving the rest unchanged.
    pub fn with_interpolation(mut self, rules: &[InterpolationRule]) -> Self {
        debug_assert!(rules.len() <= MAX_FLOATS_PER_VERTEX);
        self.interpolation[..rules.len()].copy_from_slice(rules);
        self
    }

    pub fn set_interpolation(&mut self, slot: usize, rule: InterpolationRule) {
        self.interpolation[slot] = rule;
    }

    pub fn interpolation(&self, slot: usize) -> InterpolationRule {
        self.interpolation[slot]
    }

    pub fn uniform(&self) -> &U {
        &self.uniform
    }

    pub fn uniform_mut(&mut self) -> &mut U {
        &mut self.uniform
    }

    pub fn vertex_shader(&self) -> &VS {
        &self.vertex_shader
    }

    pub fn fragment_shader(&self) -> &FS {
        &self.fragment_shader
    }

    /// Render one draw call into `target`.
    ///
    /// Triangles that are clipped away, degenerate, or hidden behind what is
    /// already in the depth buffer leave the target untouched.
    pub fn render(&self, target: &mut RenderTarget, draw: &DrawCall<'_>) {
        let rules = &self.interpolation[..draw.floats_per_vertex()];
        let triangles = draw.triangles();
        log::debug!(
            "render {} draw: {} vertices, {} triangles, {} floats per vertex",
            draw.mode(),
            draw.num_vertices(),
            triangles.len(),
            draw.floats_per_vertex()
        );

        let shaded = shade_vertices(draw, &self.vertex_shader, &self.uniform);
        let clipper = Clipper::new(rules);
        let mut rasterizer = BarycentricRasterizer::new(
            target.frame_buffer(),
            &self.fragment_shader,
            &self.uniform,
            rules,
        );

        for [a, b, c] in triangles {
            clipper.clip([&shaded[a], &shaded[b], &shaded[c]], &mut rasterizer);
        }
    }
}
