//! Primitive assembly: turning a vertex buffer into shaded triangles.
//!
//! A [`DrawCall`] describes a flat `f32` vertex buffer and how its vertices
//! form triangles:
//!
//! | Mode    | Triangle `i` uses                          |
//! |---------|--------------------------------------------|
//! | List    | `(3i, 3i+1, 3i+2)`                         |
//! | Indexed | `(idx[3i], idx[3i+1], idx[3i+2])`          |
//! | Fan     | `(0, i, i+1)` for `1 <= i <= n-2`          |
//! | Strip   | `(i, i+1, i+2)` for `0 <= i <= n-3`        |
//!
//! The vertex shader runs once per vertex slot the mode references. For
//! indexed draws that is once per index, even when indices repeat: shader
//! invocations are observable, so nothing is cached.

use std::fmt;

use crate::shader::{GeometryVertex, VertexInput, VertexShader, MAX_FLOATS_PER_VERTEX};

/// How consecutive vertices are grouped into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyMode {
    List,
    Indexed,
    Fan,
    Strip,
}

impl fmt::Display for AssemblyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyMode::List => write!(f, "List"),
            AssemblyMode::Indexed => write!(f, "Indexed"),
            AssemblyMode::Fan => write!(f, "Fan"),
            AssemblyMode::Strip => write!(f, "Strip"),
        }
    }
}

/// One render request: vertex data, its layout and its assembly mode.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    mode: AssemblyMode,
    vertex_data: &'a [f32],
    floats_per_vertex: usize,
    indices: &'a [usize],
}

impl<'a> DrawCall<'a> {
    fn new(
        mode: AssemblyMode,
        vertex_data: &'a [f32],
        floats_per_vertex: usize,
        indices: &'a [usize],
    ) -> Self {
        debug_assert!(
            floats_per_vertex > 0 && floats_per_vertex <= MAX_FLOATS_PER_VERTEX,
            "floats_per_vertex must be in 1..={MAX_FLOATS_PER_VERTEX}"
        );
        debug_assert_eq!(
            vertex_data.len() % floats_per_vertex,
            0,
            "Vertex buffer length is not a multiple of floats_per_vertex"
        );
        Self {
            mode,
            vertex_data,
            floats_per_vertex,
            indices,
        }
    }

    /// Each group of three consecutive vertices is a triangle.
    pub fn list(vertex_data: &'a [f32], floats_per_vertex: usize) -> Self {
        Self::new(AssemblyMode::List, vertex_data, floats_per_vertex, &[])
    }

    /// Each group of three indices names the vertices of a triangle.
    pub fn indexed(vertex_data: &'a [f32], floats_per_vertex: usize, indices: &'a [usize]) -> Self {
        debug_assert_eq!(indices.len() % 3, 0, "Index count is not a multiple of 3");
        Self::new(AssemblyMode::Indexed, vertex_data, floats_per_vertex, indices)
    }

    /// Every triangle shares vertex 0.
    pub fn fan(vertex_data: &'a [f32], floats_per_vertex: usize) -> Self {
        Self::new(AssemblyMode::Fan, vertex_data, floats_per_vertex, &[])
    }

    /// Every run of three consecutive vertices is a triangle.
    pub fn strip(vertex_data: &'a [f32], floats_per_vertex: usize) -> Self {
        Self::new(AssemblyMode::Strip, vertex_data, floats_per_vertex, &[])
    }

    pub fn mode(&self) -> AssemblyMode {
        self.mode
    }

    pub fn floats_per_vertex(&self) -> usize {
        self.floats_per_vertex
    }

    pub fn num_vertices(&self) -> usize {
        self.vertex_data.len() / self.floats_per_vertex
    }

    /// Number of triangles the draw assembles.
    pub fn triangle_count(&self) -> usize {
        let n = self.num_vertices();
        match self.mode {
            AssemblyMode::List => n / 3,
            AssemblyMode::Indexed => self.indices.len() / 3,
            AssemblyMode::Fan | AssemblyMode::Strip => n.saturating_sub(2),
        }
    }

    /// Attributes of vertex `index` in the source buffer.
    pub fn vertex(&self, index: usize) -> VertexInput<'a> {
        let start = index * self.floats_per_vertex;
        VertexInput::new(&self.vertex_data[start..start + self.floats_per_vertex])
    }

    /// Source vertex behind each shading slot, in slot order.
    fn slot_sources(&self) -> impl Iterator<Item = usize> + '_ {
        let direct = match self.mode {
            AssemblyMode::Indexed => 0,
            _ => self.num_vertices(),
        };
        (0..direct).chain(self.indices.iter().copied())
    }

    /// Slot triples forming each triangle, indexing the shaded vertices.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        let count = self.triangle_count();
        match self.mode {
            AssemblyMode::List | AssemblyMode::Indexed => {
                (0..count).map(|i| [3 * i, 3 * i + 1, 3 * i + 2]).collect()
            }
            AssemblyMode::Fan => (1..=count).map(|i| [0, i, i + 1]).collect(),
            AssemblyMode::Strip => (0..count).map(|i| [i, i + 1, i + 2]).collect(),
        }
    }
}

/// Run the vertex shader once per slot of `draw`.
///
/// The result is indexed by the slots returned from [`DrawCall::triangles`].
pub fn shade_vertices<'a, U, VS>(draw: &DrawCall<'a>, shader: &VS, uniform: &U) -> Vec<GeometryVertex<'a>>
where
    VS: VertexShader<U> + ?Sized,
{
    draw.slot_sources()
        .map(|source| shader.shade(draw.vertex(source), uniform))
        .collect()
}
