/// Renderer2d — ordered sprite passes over one GPU backend.
///
/// Each pass owns a shader, a render target and its own `SpriteBatch`
/// (so each keeps its own static cache). A frame culls the scene once, then
/// every enabled pass, in insertion order, binds its target and draws the
/// visible sprites that carry its required flags.

use std::sync::{Arc, Mutex};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::camera::{Camera, RenderContext};
use crate::culling::{CullStats, FrustumCuller};
use crate::error::{Error, Result};
use crate::sprite::{SceneProvider, SpriteEntity, SpriteFlags, TilemapChunk};
use crate::{engine_debug, engine_err, engine_error, engine_info, engine_warn};
use super::gpu_backend::{GpuBackend, Shader};
use super::sprite_batch::{BatchStats, SpriteBatch, SpriteBatchConfig};

const SOURCE: &str = "galaxy2d::Renderer2d";

slotmap::new_key_type! {
    /// Stable key of a pass in a `Renderer2d`
    pub struct RenderPassKey;
}

/// Where a pass draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassTarget {
    /// Default framebuffer
    Screen,
    /// Offscreen framebuffer, backend-defined id
    Framebuffer(u32),
}

/// Description of a pass to add
pub struct SpritePassDesc {
    pub name: String,
    pub shader: Box<dyn Shader>,
    pub target: PassTarget,
    pub batch_config: SpriteBatchConfig,
    /// Only sprites with all these flags are drawn. Empty draws everything,
    /// tilemap chunks included.
    pub required_flags: SpriteFlags,
}

impl SpritePassDesc {
    /// Unfiltered screen pass with the default batch config
    pub fn new(name: &str, shader: Box<dyn Shader>) -> Self {
        Self {
            name: name.to_string(),
            shader,
            target: PassTarget::Screen,
            batch_config: SpriteBatchConfig::default(),
            required_flags: SpriteFlags::empty(),
        }
    }

    pub fn with_target(mut self, target: PassTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_batch_config(mut self, config: SpriteBatchConfig) -> Self {
        self.batch_config = config;
        self
    }

    pub fn with_required_flags(mut self, flags: SpriteFlags) -> Self {
        self.required_flags = flags;
        self
    }
}

pub struct SpritePass {
    name: String,
    shader: Box<dyn Shader>,
    target: PassTarget,
    batch: SpriteBatch,
    required_flags: SpriteFlags,
    enabled: bool,
}

impl SpritePass {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> PassTarget {
        self.target
    }

    pub fn required_flags(&self) -> SpriteFlags {
        self.required_flags
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn batch(&self) -> &SpriteBatch {
        &self.batch
    }

    pub fn batch_mut(&mut self) -> &mut SpriteBatch {
        &mut self.batch
    }

    /// True if this pass draws `entity`
    fn accepts(&self, entity: &SpriteEntity) -> bool {
        entity.renderer.flags.contains(self.required_flags)
    }
}

/// Counters of one `render_frame`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub passes_rendered: u32,
    /// Dynamic sprites tested against the frustum (static sprites bypass culling)
    pub cull: CullStats,
    pub chunks_visible: usize,
    /// Sum over all rendered passes
    pub batch: BatchStats,
}

pub struct Renderer2d {
    backend: Arc<Mutex<dyn GpuBackend>>,
    passes: SlotMap<RenderPassKey, SpritePass>,
    /// Execution order
    pass_order: Vec<RenderPassKey>,
    pass_names: FxHashMap<String, RenderPassKey>,
}

impl Renderer2d {
    pub fn new(backend: Arc<Mutex<dyn GpuBackend>>) -> Self {
        Self {
            backend,
            passes: SlotMap::with_key(),
            pass_order: Vec::new(),
            pass_names: FxHashMap::default(),
        }
    }

    pub fn backend(&self) -> &Arc<Mutex<dyn GpuBackend>> {
        &self.backend
    }

    // ===== PASSES =====

    /// Append a pass. It runs after every pass already added.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the name is taken, or the batch creation error.
    pub fn add_pass(&mut self, desc: SpritePassDesc) -> Result<RenderPassKey> {
        if self.pass_names.contains_key(&desc.name) {
            engine_error!(SOURCE, "Sprite pass '{}' already exists", desc.name);
            return Err(Error::InvalidResource(format!("sprite pass '{}' already exists", desc.name)));
        }

        let batch = SpriteBatch::new(Arc::clone(&self.backend), desc.batch_config)?;
        let name = desc.name;
        let key = self.passes.insert(SpritePass {
            name: name.clone(),
            shader: desc.shader,
            target: desc.target,
            batch,
            required_flags: desc.required_flags,
            enabled: true,
        });
        self.pass_order.push(key);
        engine_info!(SOURCE, "Added sprite pass '{}' ({:?})", name, desc.target);
        self.pass_names.insert(name, key);
        Ok(key)
    }

    /// Remove a pass; its batch buffer is released.
    pub fn remove_pass(&mut self, key: RenderPassKey) -> Option<SpritePass> {
        let pass = self.passes.remove(key)?;
        self.pass_order.retain(|k| *k != key);
        self.pass_names.remove(&pass.name);
        engine_debug!(SOURCE, "Removed sprite pass '{}'", pass.name);
        Some(pass)
    }

    pub fn pass(&self, key: RenderPassKey) -> Option<&SpritePass> {
        self.passes.get(key)
    }

    pub fn pass_mut(&mut self, key: RenderPassKey) -> Option<&mut SpritePass> {
        self.passes.get_mut(key)
    }

    pub fn pass_key(&self, name: &str) -> Option<RenderPassKey> {
        self.pass_names.get(name).copied()
    }

    pub fn pass_by_name(&self, name: &str) -> Option<&SpritePass> {
        self.pass_key(name).and_then(|key| self.passes.get(key))
    }

    /// Pass keys in execution order
    pub fn pass_keys(&self) -> &[RenderPassKey] {
        &self.pass_order
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    /// Returns false if `key` is unknown
    pub fn set_pass_enabled(&mut self, key: RenderPassKey, enabled: bool) -> bool {
        match self.passes.get_mut(key) {
            Some(pass) => {
                pass.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Invalidate the static cache of every pass
    pub fn mark_static_dirty(&mut self) {
        for pass in self.passes.values_mut() {
            pass.batch.mark_static_batch_dirty();
        }
    }

    // ===== FRAME =====

    /// Render one frame.
    ///
    /// Refreshes `culler` from the active camera (the default camera, with a
    /// warning, if there is none), culls dynamic sprites and tilemap chunks
    /// once, then runs every enabled pass. Static sprites are handed to the
    /// batches without culling: they are only captured when a static cache
    /// is rebuilt.
    pub fn render_frame(
        &mut self,
        ctx: &RenderContext,
        scene: &dyn SceneProvider,
        culler: &mut dyn FrustumCuller,
    ) -> Result<FrameStats> {
        let fallback;
        let camera = match ctx.active_camera() {
            Some(camera) => camera,
            None => {
                engine_warn!(SOURCE, "No active camera, rendering with the default camera");
                fallback = Camera::default();
                &fallback
            }
        };
        culler.update_from_camera(camera, ctx.camera_system());
        let projection = camera.projection_matrix(ctx.game_size());
        let view = camera.view_matrix();

        let mut stats = FrameStats::default();
        let sprites = scene.sprites();
        let mut visible: Vec<&SpriteEntity> = Vec::with_capacity(sprites.len());
        for entity in sprites {
            if entity.renderer.is_static {
                visible.push(entity);
                continue;
            }
            stats.cull.tested += 1;
            if culler.is_visible(&entity.renderer, entity.transform.as_ref()) {
                stats.cull.visible += 1;
                visible.push(entity);
            }
        }
        let chunks: Vec<&TilemapChunk> = scene
            .tilemap_chunks()
            .iter()
            .filter(|chunk| culler.is_chunk_visible(chunk))
            .collect();
        stats.chunks_visible = chunks.len();

        for key in &self.pass_order {
            let Some(pass) = self.passes.get_mut(*key) else {
                continue;
            };
            if !pass.enabled {
                continue;
            }

            // The batch locks the backend itself in `end`
            {
                let mut backend = self.backend.lock()
                    .map_err(|_| engine_err!(SOURCE, "GPU backend lock poisoned"))?;
                backend.bind_render_target(pass.target)?;
            }

            pass.batch.begin(projection, view)?;
            for entity in visible.iter().copied() {
                if pass.accepts(entity) {
                    pass.batch.submit_entity(entity)?;
                }
            }
            if pass.required_flags.is_empty() {
                for chunk in chunks.iter().copied() {
                    pass.batch.submit_tilemap_chunk(chunk)?;
                }
            }
            let batch_stats = pass.batch.end(pass.shader.as_mut())?;
            stats.batch.accumulate(&batch_stats);
            stats.passes_rendered += 1;
        }

        Ok(stats)
    }
}

#[cfg(test)]
#[path = "renderer_2d_tests.rs"]
mod tests;
