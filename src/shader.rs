//! Shader contracts and the per-vertex / per-fragment records that flow
//! through the pipeline.
//!
//! # Architecture
//!
//! The fixed-function stages (assembly, clipping, rasterization) handle:
//! - Index-triple generation
//! - Homogeneous clipping
//! - Coverage, depth testing and attribute interpolation
//!
//! The programmable stages are injected strategies:
//! - [`VertexShader`]: turns raw vertex attributes into a clip-space position
//!   plus the attributes to interpolate
//! - [`FragmentShader`]: turns interpolated attributes into an RGB color
//!
//! Both receive the caller's uniform data unchanged and read-only. Plain
//! functions with the matching signature implement either trait.

use std::ops::Deref;

use crate::math::vec4::Vec4;

/// Upper bound on the number of floats a single vertex may carry.
pub const MAX_FLOATS_PER_VERTEX: usize = 64;

/// How an attribute slot is interpolated across a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationRule {
    /// Every fragment takes the provoking vertex's raw value.
    Flat,
    /// Perspective-correct interpolation.
    #[default]
    Smooth,
    /// Linear interpolation in screen space, ignoring `w`.
    NoPerspective,
}

/// Raw attributes of one vertex, a read-only view into the caller's buffer.
#[derive(Debug, Clone, Copy)]
pub struct VertexInput<'a> {
    pub data: &'a [f32],
}

impl<'a> VertexInput<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self { data }
    }
}

/// Backing storage for a vertex's attributes.
///
/// Vertices produced by the vertex shader usually borrow straight from the
/// source buffer; vertices synthesized by the clipper own a fresh buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeStorage<'a> {
    Borrowed(&'a [f32]),
    Owned(Vec<f32>),
}

impl AttributeStorage<'_> {
    pub fn as_slice(&self) -> &[f32] {
        match self {
            AttributeStorage::Borrowed(data) => data,
            AttributeStorage::Owned(data) => data,
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, AttributeStorage::Owned(_))
    }
}

impl Deref for AttributeStorage<'_> {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        self.as_slice()
    }
}

/// Output of the vertex shader: a clip-space position and its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryVertex<'a> {
    pub position: Vec4,
    pub attributes: AttributeStorage<'a>,
}

impl<'a> GeometryVertex<'a> {
    /// A vertex whose attributes alias an existing buffer.
    pub fn borrowed(position: Vec4, attributes: &'a [f32]) -> Self {
        Self {
            position,
            attributes: AttributeStorage::Borrowed(attributes),
        }
    }

    /// A vertex that owns its attribute buffer.
    pub fn owned(position: Vec4, attributes: Vec<f32>) -> Self {
        Self {
            position,
            attributes: AttributeStorage::Owned(attributes),
        }
    }

    #[inline]
    pub fn attributes(&self) -> &[f32] {
        self.attributes.as_slice()
    }
}

/// Interpolated attributes handed to the fragment shader for one pixel.
///
/// The slice is only valid for the duration of the shader call.
#[derive(Debug, Clone, Copy)]
pub struct FragmentInput<'a> {
    pub data: &'a [f32],
}

/// Color produced by the fragment shader, each channel expected in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FragmentOutput {
    pub color: [f32; 3],
}

impl FragmentOutput {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { color: [r, g, b] }
    }
}

/// Per-vertex programmable stage.
pub trait VertexShader<U> {
    /// Compute the clip-space position and attributes of one vertex.
    ///
    /// The returned vertex may borrow `input.data` directly.
    fn shade<'a>(&self, input: VertexInput<'a>, uniform: &U) -> GeometryVertex<'a>;
}

impl<U, F> VertexShader<U> for F
where
    F: for<'a> Fn(VertexInput<'a>, &U) -> GeometryVertex<'a>,
{
    #[inline]
    fn shade<'a>(&self, input: VertexInput<'a>, uniform: &U) -> GeometryVertex<'a> {
        self(input, uniform)
    }
}

/// Per-pixel programmable stage.
pub trait FragmentShader<U> {
    /// Compute the color of a covered pixel from its interpolated attributes.
    fn shade(&self, input: &FragmentInput<'_>, uniform: &U) -> FragmentOutput;
}

impl<U, F> FragmentShader<U> for F
where
    F: Fn(&FragmentInput<'_>, &U) -> FragmentOutput,
{
    #[inline]
    fn shade(&self, input: &FragmentInput<'_>, uniform: &U) -> FragmentOutput {
        self(input, uniform)
    }
}

/// Vertex shader that reads the first four floats as the clip-space position
/// and passes the whole vertex through as its attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughShader;

impl<U> VertexShader<U> for PassthroughShader {
    #[inline]
    fn shade<'a>(&self, input: VertexInput<'a>, _uniform: &U) -> GeometryVertex<'a> {
        GeometryVertex::borrowed(Vec4::from_slice(input.data), input.data)
    }
}

/// Fragment shader that returns a constant color for all pixels.
#[derive(Debug, Clone, Copy)]
pub struct ConstantShader {
    color: FragmentOutput,
}

impl ConstantShader {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            color: FragmentOutput::new(r, g, b),
        }
    }
}

impl<U> FragmentShader<U> for ConstantShader {
    #[inline]
    fn shade(&self, _input: &FragmentInput<'_>, _uniform: &U) -> FragmentOutput {
        self.color
    }
}
