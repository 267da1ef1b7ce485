/// SpriteBatch — turns a frame's sprite requests into few draw calls.
///
/// Lifecycle per frame:
///
/// ```text
/// begin(projection, view) → submit_* … → end(shader)
/// ```
///
/// Every submission is normalized to a `RenderableQuad`. `end` sorts the
/// quads with the active `SortStrategy`, then walks them in order and
/// flushes (upload, bind texture, draw) whenever the texture changes or the
/// staging buffer holds `max_batch_size` quads.
///
/// Static sprites (`SpriteRenderer::is_static`) are captured once into a
/// cached, sorted list and reused every frame until
/// `mark_static_batch_dirty` is called. At `end` the cache is merged with
/// the frame's dynamic quads under the same strategy, so draw order does not
/// depend on which list a quad came from. While the cache is valid, static
/// submissions are ignored: moving a static sprite without invalidating
/// the cache keeps drawing it at its old place.

use std::sync::{Arc, Mutex};
use glam::{Mat4, Vec2, Vec4};
use crate::error::{Error, Result};
use crate::sprite::{SpriteEntity, SpriteRenderer, TextureId, TilemapChunk, Transform, UvRect};
use crate::{engine_debug, engine_err, engine_error, engine_info, engine_trace};
use super::gpu_backend::{BufferHandle, GpuBackend, Shader};
use super::quad::{RenderableQuad, SpriteDraw};
use super::sort::{merge_sorted, sort_quads, SortStrategy};
use super::vertex::{as_floats, SpriteVertex, VERTEX_STRIDE_BYTES, VERTICES_PER_QUAD};

const SOURCE: &str = "galaxy2d::SpriteBatch";

/// Uniform names uploaded by the batch
pub const UNIFORM_PROJECTION: &str = "projection";
pub const UNIFORM_VIEW: &str = "view";
pub const UNIFORM_TEXTURE_SAMPLER: &str = "texture_sampler";
pub const UNIFORM_MODEL: &str = "model";

/// Texture unit sprites are sampled from
pub const SPRITE_TEXTURE_UNIT: u32 = 0;

// ===== CONFIG =====

/// How quads reach the GPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderMode {
    /// World-space vertices, one draw per texture run
    #[default]
    Batched,
    /// Local-space vertices and a `model` uniform, one draw per quad
    PerSprite,
}

/// Sprite batch configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteBatchConfig {
    /// Quads per draw call (vertex buffer capacity)
    pub max_batch_size: usize,
    pub sort_strategy: SortStrategy,
    /// Y band width of `SortStrategy::Balanced`, world units
    pub balanced_y_tolerance: f32,
    pub render_mode: RenderMode,
}

impl Default for SpriteBatchConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 1000,
            sort_strategy: SortStrategy::TexturePriority,
            balanced_y_tolerance: 4.0,
            render_mode: RenderMode::Batched,
        }
    }
}

// ===== STATS =====

/// Counters of one `begin`/`end` cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub draw_calls: u32,
    pub quads: u32,
    pub vertices: u32,
    /// Draws whose texture differs from the previous draw's
    pub texture_switches: u32,
    /// Malformed submissions dropped
    pub skipped: u32,
    pub static_quads: u32,
    pub dynamic_quads: u32,
}

impl BatchStats {
    /// Add `other` into `self`
    pub fn accumulate(&mut self, other: &BatchStats) {
        self.draw_calls += other.draw_calls;
        self.quads += other.quads;
        self.vertices += other.vertices;
        self.texture_switches += other.texture_switches;
        self.skipped += other.skipped;
        self.static_quads += other.static_quads;
        self.dynamic_quads += other.dynamic_quads;
    }
}

// ===== FLUSH =====

/// Draw state of one `end` call
struct Flusher<'a> {
    backend: &'a mut dyn GpuBackend,
    buffer: BufferHandle,
    staging: &'a mut Vec<SpriteVertex>,
    stats: &'a mut BatchStats,
    last_bound: Option<TextureId>,
}

impl Flusher<'_> {
    /// Upload the staged vertices, bind `texture`, and draw them
    fn flush(&mut self, texture: TextureId) -> Result<()> {
        if self.staging.is_empty() {
            return Ok(());
        }
        self.backend.upload_sub_data(self.buffer, 0, as_floats(self.staging.as_slice()))?;
        self.bind(texture)?;
        let vertex_count = self.staging.len() as u32;
        self.backend.draw_triangles(vertex_count)?;
        self.stats.draw_calls += 1;
        self.stats.vertices += vertex_count;
        self.staging.clear();
        Ok(())
    }

    fn bind(&mut self, texture: TextureId) -> Result<()> {
        self.backend.bind_texture(SPRITE_TEXTURE_UNIT, texture)?;
        if self.last_bound != Some(texture) {
            self.stats.texture_switches += 1;
            self.last_bound = Some(texture);
        }
        Ok(())
    }

    /// Texture runs, split at `capacity_vertices`
    fn draw_batched<'q>(
        &mut self,
        quads: impl Iterator<Item = &'q RenderableQuad>,
        capacity_vertices: usize,
    ) -> Result<()> {
        let mut current: Option<TextureId> = None;
        for quad in quads {
            if let Some(texture) = current {
                if texture != quad.texture || self.staging.len() >= capacity_vertices {
                    self.flush(texture)?;
                }
            }
            current = Some(quad.texture);
            quad.write_vertices(self.staging);
            self.stats.quads += 1;
        }
        if let Some(texture) = current {
            self.flush(texture)?;
        }
        Ok(())
    }

    /// One draw per quad with its model matrix
    fn draw_per_sprite<'q>(
        &mut self,
        quads: impl Iterator<Item = &'q RenderableQuad>,
        shader: &mut dyn Shader,
    ) -> Result<()> {
        for quad in quads {
            shader.upload_mat4(UNIFORM_MODEL, &quad.model_matrix())?;
            quad.write_local_vertices(self.staging);
            self.stats.quads += 1;
            self.flush(quad.texture)?;
        }
        Ok(())
    }
}

// ===== SPRITE BATCH =====

pub struct SpriteBatch {
    backend: Arc<Mutex<dyn GpuBackend>>,
    buffer: BufferHandle,
    config: SpriteBatchConfig,
    /// Vertex staging area, sized once for `max_batch_size` quads
    staging: Vec<SpriteVertex>,
    dynamic_quads: Vec<RenderableQuad>,
    /// Cached static quads, sorted
    static_quads: Vec<RenderableQuad>,
    static_dirty: bool,
    /// Static submissions are recorded this frame
    capturing_static: bool,
    /// Static cache must be re-sorted (strategy changed)
    static_needs_sort: bool,
    /// First sequence after the static capture; dynamic quads start here
    /// so sequences stay unique across both lists
    static_sequence_end: u64,
    /// Static and dynamic quads in draw order
    merged_quads: Vec<RenderableQuad>,
    in_frame: bool,
    projection: Mat4,
    view: Mat4,
    next_sequence: u64,
    frame_stats: BatchStats,
    last_stats: BatchStats,
}

impl SpriteBatch {
    /// Create a batch and its vertex buffer.
    ///
    /// Fails with `InitializationFailed` on an unusable config, or with the
    /// backend's error if the buffer cannot be created.
    pub fn new(backend: Arc<Mutex<dyn GpuBackend>>, config: SpriteBatchConfig) -> Result<Self> {
        if config.max_batch_size == 0 {
            engine_error!(SOURCE, "max_batch_size must be at least 1");
            return Err(Error::InitializationFailed("max_batch_size must be at least 1".to_string()));
        }
        if !(config.balanced_y_tolerance.is_finite() && config.balanced_y_tolerance >= 0.0) {
            engine_error!(SOURCE, "Invalid balanced_y_tolerance {}", config.balanced_y_tolerance);
            return Err(Error::InitializationFailed(format!(
                "invalid balanced_y_tolerance {}", config.balanced_y_tolerance
            )));
        }

        let capacity_vertices = config.max_batch_size * VERTICES_PER_QUAD;
        let capacity_bytes = capacity_vertices * VERTEX_STRIDE_BYTES;
        let buffer = {
            let mut backend = backend.lock()
                .map_err(|_| engine_err!(SOURCE, "GPU backend lock poisoned"))?;
            backend.create_buffer(capacity_bytes)?
        };

        engine_info!(SOURCE, "Created sprite batch: {} quads, {} bytes",
            config.max_batch_size, capacity_bytes);

        Ok(Self {
            backend,
            buffer,
            config,
            staging: Vec::with_capacity(capacity_vertices),
            dynamic_quads: Vec::new(),
            static_quads: Vec::new(),
            static_dirty: true,
            capturing_static: false,
            static_needs_sort: false,
            static_sequence_end: 0,
            merged_quads: Vec::new(),
            in_frame: false,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            next_sequence: 0,
            frame_stats: BatchStats::default(),
            last_stats: BatchStats::default(),
        })
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &SpriteBatchConfig {
        &self.config
    }

    pub fn sort_strategy(&self) -> SortStrategy {
        self.config.sort_strategy
    }

    /// Change the sort strategy. Takes effect at the next `end`.
    pub fn set_sort_strategy(&mut self, strategy: SortStrategy) {
        if strategy != self.config.sort_strategy {
            self.config.sort_strategy = strategy;
            self.static_needs_sort = true;
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        self.config.render_mode
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.config.render_mode = mode;
    }

    /// True between `begin` and `end`
    pub fn is_active(&self) -> bool {
        self.in_frame
    }

    /// Stats of the last completed frame
    pub fn stats(&self) -> BatchStats {
        self.last_stats
    }

    pub fn static_quad_count(&self) -> usize {
        self.static_quads.len()
    }

    /// Drop the static cache; static sprites are recaptured next frame.
    pub fn mark_static_batch_dirty(&mut self) {
        self.static_dirty = true;
    }

    // ===== LIFECYCLE =====

    fn lifecycle_error(&self, message: &str) -> Error {
        engine_error!(SOURCE, "{}", message);
        Error::InvalidState(message.to_string())
    }

    fn ensure_in_frame(&self, operation: &str) -> Result<()> {
        if self.in_frame {
            Ok(())
        } else {
            Err(self.lifecycle_error(&format!("{} called outside begin()/end()", operation)))
        }
    }

    /// Start a frame with the camera matrices uploaded at `end`.
    pub fn begin(&mut self, projection: Mat4, view: Mat4) -> Result<()> {
        if self.in_frame {
            return Err(self.lifecycle_error("begin() called twice without end()"));
        }
        self.in_frame = true;
        self.projection = projection;
        self.view = view;
        self.frame_stats = BatchStats::default();
        self.dynamic_quads.clear();

        if self.static_dirty {
            self.next_sequence = 0;
            self.static_quads.clear();
            self.capturing_static = true;
            self.static_dirty = false;
            engine_debug!(SOURCE, "Recapturing static sprites");
        } else {
            self.next_sequence = self.static_sequence_end;
        }
        Ok(())
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    fn push(&mut self, quad: Option<RenderableQuad>, is_static: bool, what: &str) {
        match quad {
            Some(quad) if is_static => self.static_quads.push(quad),
            Some(quad) => self.dynamic_quads.push(quad),
            None => {
                self.frame_stats.skipped += 1;
                engine_trace!(SOURCE, "Skipped malformed {} submission", what);
            }
        }
    }

    // ===== SUBMISSION =====

    /// Submit an entity sprite with an extra `tint`.
    ///
    /// A missing sprite, texture or transform is skipped and counted.
    pub fn submit_sprite(
        &mut self,
        renderer: &SpriteRenderer,
        transform: Option<&Transform>,
        tint: Vec4,
    ) -> Result<()> {
        self.ensure_in_frame("submit_sprite()")?;
        if renderer.is_static && !self.capturing_static {
            return Ok(());
        }
        let sequence = self.next_sequence();
        let quad = RenderableQuad::from_sprite(renderer, transform, tint, sequence);
        self.push(quad, renderer.is_static, "sprite");
        Ok(())
    }

    /// Submit an entity with a white submission tint
    pub fn submit_entity(&mut self, entity: &SpriteEntity) -> Result<()> {
        self.submit_sprite(&entity.renderer, entity.transform.as_ref(), Vec4::ONE)
    }

    /// Submit one tile: bottom-left anchored, unrotated.
    pub fn submit_tile(
        &mut self,
        texture: TextureId,
        position: Vec2,
        size: Vec2,
        uv: UvRect,
        z_index: i32,
        tint: Vec4,
    ) -> Result<()> {
        self.ensure_in_frame("submit_tile()")?;
        let sequence = self.next_sequence();
        let quad = RenderableQuad::from_tile(texture, position, size, uv, z_index, tint, sequence);
        self.push(quad, false, "tile");
        Ok(())
    }

    /// Submit every tile of a chunk. An untextured chunk is skipped.
    pub fn submit_tilemap_chunk(&mut self, chunk: &TilemapChunk) -> Result<()> {
        self.ensure_in_frame("submit_tilemap_chunk()")?;
        let Some(texture) = chunk.texture else {
            self.frame_stats.skipped += 1;
            engine_trace!(SOURCE, "Skipped untextured tilemap chunk");
            return Ok(());
        };
        for tile in &chunk.tiles {
            self.submit_tile(texture, tile.position, tile.size, tile.uv, chunk.z_index, chunk.tint)?;
        }
        Ok(())
    }

    /// Submit a free-form quad
    pub fn submit_quad(&mut self, draw: &SpriteDraw) -> Result<()> {
        self.ensure_in_frame("submit_quad()")?;
        let sequence = self.next_sequence();
        let quad = RenderableQuad::from_draw(draw, sequence);
        self.push(quad, false, "quad");
        Ok(())
    }

    // ===== END =====

    /// Sort and draw the frame.
    ///
    /// Uploads `projection`, `view` and `texture_sampler` once, then issues
    /// the draws. The batch is ready for the next `begin` even if a backend
    /// call fails.
    pub fn end(&mut self, shader: &mut dyn Shader) -> Result<BatchStats> {
        self.ensure_in_frame("end()")?;
        self.in_frame = false;

        let strategy = self.config.sort_strategy;
        let tolerance = self.config.balanced_y_tolerance;
        sort_quads(&mut self.dynamic_quads, strategy, tolerance);
        if self.capturing_static || self.static_needs_sort {
            sort_quads(&mut self.static_quads, strategy, tolerance);
            if self.capturing_static {
                self.static_sequence_end = self.next_sequence;
            }
            self.capturing_static = false;
            self.static_needs_sort = false;
        }

        merge_sorted(&self.static_quads, &self.dynamic_quads, strategy, tolerance, &mut self.merged_quads);

        let result = self.draw_frame(shader);
        self.dynamic_quads.clear();
        self.merged_quads.clear();
        self.staging.clear();
        result?;

        let mut stats = self.frame_stats;
        stats.static_quads = self.static_quads.len() as u32;
        stats.dynamic_quads = stats.quads - stats.static_quads;
        self.last_stats = stats;
        engine_trace!(SOURCE, "Frame: {} quads, {} draw calls", stats.quads, stats.draw_calls);
        Ok(stats)
    }

    fn draw_frame(&mut self, shader: &mut dyn Shader) -> Result<()> {
        shader.use_program()?;
        shader.upload_mat4(UNIFORM_PROJECTION, &self.projection)?;
        shader.upload_mat4(UNIFORM_VIEW, &self.view)?;
        shader.upload_int(UNIFORM_TEXTURE_SAMPLER, SPRITE_TEXTURE_UNIT as i32)?;

        let mut backend = self.backend.lock()
            .map_err(|_| engine_err!(SOURCE, "GPU backend lock poisoned"))?;
        let quads = self.merged_quads.iter();
        let mut flusher = Flusher {
            backend: &mut *backend,
            buffer: self.buffer,
            staging: &mut self.staging,
            stats: &mut self.frame_stats,
            last_bound: None,
        };
        match self.config.render_mode {
            RenderMode::Batched => {
                flusher.draw_batched(quads, self.config.max_batch_size * VERTICES_PER_QUAD)?
            }
            RenderMode::PerSprite => flusher.draw_per_sprite(quads, shader)?,
        }
        drop(backend);

        shader.detach()
    }
}

impl Drop for SpriteBatch {
    fn drop(&mut self) {
        if let Ok(mut backend) = self.backend.lock() {
            backend.destroy_buffer(self.buffer);
        }
    }
}

#[cfg(test)]
#[path = "sprite_batch_tests.rs"]
mod tests;
