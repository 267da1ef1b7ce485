//! Render module — quad normalization, sorting, batching, and sprite passes.
//!
//! Everything above `GpuBackend` / `Shader` is API-agnostic: a backend
//! (OpenGL, Vulkan, a recording mock) only has to create and fill a vertex
//! buffer, bind textures and issue triangle-list draws.

mod gpu_backend;
mod vertex;
mod quad;
mod sort;
mod sprite_batch;
mod renderer_2d;

#[cfg(test)]
pub(crate) mod mock_gpu;

pub use gpu_backend::{GpuBackend, BufferHandle, Shader};
pub use vertex::{
    SpriteVertex, VertexAttribute, SPRITE_VERTEX_ATTRIBUTES, as_floats,
    FLOATS_PER_VERTEX, VERTICES_PER_QUAD, FLOATS_PER_QUAD, VERTEX_STRIDE_BYTES,
};
pub use quad::{RenderableQuad, SpriteDraw};
pub use sort::{SortStrategy, merge_sorted, sort_quads};
pub use sprite_batch::{
    SpriteBatch, SpriteBatchConfig, RenderMode, BatchStats,
    UNIFORM_PROJECTION, UNIFORM_VIEW, UNIFORM_TEXTURE_SAMPLER, UNIFORM_MODEL,
    SPRITE_TEXTURE_UNIT,
};
pub use renderer_2d::{Renderer2d, SpritePass, SpritePassDesc, PassTarget, RenderPassKey, FrameStats};
