/// Mock GPU backend and shader for unit tests (no GPU required)
///
/// Both record every call as a string command, plus structured copies of
/// what tests usually assert on (draw sizes, bound textures, uniforms).

#[cfg(test)]
use glam::Mat4;
#[cfg(test)]
use slotmap::SlotMap;

#[cfg(test)]
use crate::error::Result;
#[cfg(test)]
use crate::engine_bail;
#[cfg(test)]
use crate::sprite::TextureId;
#[cfg(test)]
use super::gpu_backend::{BufferHandle, GpuBackend, Shader};
#[cfg(test)]
use super::renderer_2d::PassTarget;

// ============================================================================
// Mock GPU backend
// ============================================================================

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockGpuBackend {
    pub commands: Vec<String>,
    /// Capacity in bytes of each live buffer
    pub buffers: SlotMap<BufferHandle, usize>,
    /// Vertex count of each draw, in order
    pub draws: Vec<u32>,
    /// Texture bound for each draw, in order
    pub draw_textures: Vec<TextureId>,
    /// Float data of each upload, in order
    pub uploads: Vec<Vec<f32>>,
    pub targets: Vec<PassTarget>,
    /// Make `create_buffer` fail
    pub fail_create_buffer: bool,
    bound_texture: Option<TextureId>,
}

#[cfg(test)]
impl MockGpuBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl GpuBackend for MockGpuBackend {
    fn create_buffer(&mut self, capacity_bytes: usize) -> Result<BufferHandle> {
        if self.fail_create_buffer {
            engine_bail!("galaxy2d::MockGpuBackend", "Out of buffer memory ({} bytes)", capacity_bytes);
        }
        self.commands.push(format!("create_buffer({})", capacity_bytes));
        Ok(self.buffers.insert(capacity_bytes))
    }

    fn upload_sub_data(&mut self, buffer: BufferHandle, offset_bytes: usize, data: &[f32]) -> Result<()> {
        let Some(&capacity) = self.buffers.get(buffer) else {
            engine_bail!("galaxy2d::MockGpuBackend", "Upload to unknown buffer");
        };
        if offset_bytes + data.len() * 4 > capacity {
            engine_bail!("galaxy2d::MockGpuBackend", "Upload of {} floats overflows buffer", data.len());
        }
        self.commands.push(format!("upload_sub_data({}, {})", offset_bytes, data.len()));
        self.uploads.push(data.to_vec());
        Ok(())
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureId) -> Result<()> {
        self.commands.push(format!("bind_texture({}, {})", unit, texture.0));
        self.bound_texture = Some(texture);
        Ok(())
    }

    fn draw_triangles(&mut self, vertex_count: u32) -> Result<()> {
        self.commands.push(format!("draw_triangles({})", vertex_count));
        self.draws.push(vertex_count);
        if let Some(texture) = self.bound_texture {
            self.draw_textures.push(texture);
        }
        Ok(())
    }

    fn destroy_buffer(&mut self, buffer: BufferHandle) {
        if self.buffers.remove(buffer).is_some() {
            self.commands.push("destroy_buffer".to_string());
        }
    }

    fn bind_render_target(&mut self, target: PassTarget) -> Result<()> {
        self.commands.push(format!("bind_render_target({:?})", target));
        self.targets.push(target);
        Ok(())
    }
}

// ============================================================================
// Mock Shader
// ============================================================================

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockShader {
    pub commands: Vec<String>,
    pub mat4_uploads: Vec<(String, Mat4)>,
    pub int_uploads: Vec<(String, i32)>,
}

#[cfg(test)]
impl MockShader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploaded matrices named `name`, in order
    pub fn mat4s(&self, name: &str) -> Vec<Mat4> {
        self.mat4_uploads.iter().filter(|(n, _)| n == name).map(|(_, m)| *m).collect()
    }
}

#[cfg(test)]
impl Shader for MockShader {
    fn use_program(&mut self) -> Result<()> {
        self.commands.push("use_program".to_string());
        Ok(())
    }

    fn upload_mat4(&mut self, name: &str, value: &Mat4) -> Result<()> {
        self.commands.push(format!("upload_mat4({})", name));
        self.mat4_uploads.push((name.to_string(), *value));
        Ok(())
    }

    fn upload_int(&mut self, name: &str, value: i32) -> Result<()> {
        self.commands.push(format!("upload_int({}, {})", name, value));
        self.int_uploads.push((name.to_string(), value));
        Ok(())
    }

    fn detach(&mut self) -> Result<()> {
        self.commands.push("detach".to_string());
        Ok(())
    }
}
