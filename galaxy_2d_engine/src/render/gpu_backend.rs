/// GPU boundary of the sprite renderer.
///
/// The batch only needs a handful of synchronous operations from a graphics
/// API. Backends (OpenGL, Vulkan, a recording mock) implement `GpuBackend`
/// and `Shader`; the batch holds the backend as `Arc<Mutex<dyn GpuBackend>>`.

use glam::Mat4;
use crate::error::Result;
use crate::sprite::TextureId;
use super::renderer_2d::PassTarget;

slotmap::new_key_type! {
    /// Handle of a vertex buffer created by a backend
    pub struct BufferHandle;
}

/// Operations the sprite batch issues to the GPU.
pub trait GpuBackend: Send + Sync {
    /// Allocate a vertex buffer of `capacity_bytes`
    fn create_buffer(&mut self, capacity_bytes: usize) -> Result<BufferHandle>;

    /// Overwrite part of a buffer, starting `offset_bytes` into it
    fn upload_sub_data(&mut self, buffer: BufferHandle, offset_bytes: usize, data: &[f32]) -> Result<()>;

    /// Bind a texture to a sampler unit
    fn bind_texture(&mut self, unit: u32, texture: TextureId) -> Result<()>;

    /// Draw `vertex_count` vertices from the last uploaded buffer as a triangle list
    fn draw_triangles(&mut self, vertex_count: u32) -> Result<()>;

    /// Release a buffer. Unknown handles are ignored.
    fn destroy_buffer(&mut self, buffer: BufferHandle);

    /// Redirect subsequent draws to `target`
    fn bind_render_target(&mut self, _target: PassTarget) -> Result<()> {
        Ok(())
    }
}

/// Shader program used by a sprite pass.
pub trait Shader: Send {
    /// Make this program current
    fn use_program(&mut self) -> Result<()>;

    fn upload_mat4(&mut self, name: &str, value: &Mat4) -> Result<()>;

    fn upload_int(&mut self, name: &str, value: i32) -> Result<()>;

    /// Unbind this program
    fn detach(&mut self) -> Result<()>;
}
