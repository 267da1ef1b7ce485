/// Sprite vertex layout.
///
/// Each vertex is 8 tightly packed `f32`: position (x, y), uv (u, v),
/// color (r, g, b, a). A quad is two triangles, 6 vertices, no index buffer.

use bytemuck::{Pod, Zeroable};

/// Floats per vertex
pub const FLOATS_PER_VERTEX: usize = 8;
/// Vertices per quad (two triangles)
pub const VERTICES_PER_QUAD: usize = 6;
/// Floats per quad
pub const FLOATS_PER_QUAD: usize = FLOATS_PER_VERTEX * VERTICES_PER_QUAD;
/// Bytes between consecutive vertices
pub const VERTEX_STRIDE_BYTES: usize = FLOATS_PER_VERTEX * std::mem::size_of::<f32>();

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

/// One vertex attribute of the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    /// Shader input location
    pub location: u32,
    /// Number of f32 components
    pub components: u32,
    pub offset_bytes: usize,
}

/// Attribute layout of `SpriteVertex`, for backends building vertex input state
pub const SPRITE_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute { name: "position", location: 0, components: 2, offset_bytes: 0 },
    VertexAttribute { name: "uv", location: 1, components: 2, offset_bytes: 8 },
    VertexAttribute { name: "color", location: 2, components: 4, offset_bytes: 16 },
];

/// View a vertex slice as the flat float stream uploaded to the GPU
pub fn as_floats(vertices: &[SpriteVertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
#[path = "vertex_tests.rs"]
mod tests;
