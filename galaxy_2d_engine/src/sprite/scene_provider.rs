/// SceneProvider — read-only access to the entities rendered this frame.

use super::sprite_renderer::SpriteEntity;
use super::tilemap::TilemapChunk;

/// Source of per-frame render data.
///
/// The renderer never mutates what it reads through this trait.
pub trait SceneProvider {
    /// Active sprite entities
    fn sprites(&self) -> &[SpriteEntity];

    /// Active tilemap chunks
    fn tilemap_chunks(&self) -> &[TilemapChunk] {
        &[]
    }
}

/// Plain owned scene data, enough for tools and tests.
#[derive(Debug, Clone, Default)]
pub struct FrameScene {
    pub sprites: Vec<SpriteEntity>,
    pub tilemap_chunks: Vec<TilemapChunk>,
}

impl SceneProvider for FrameScene {
    fn sprites(&self) -> &[SpriteEntity] {
        &self.sprites
    }

    fn tilemap_chunks(&self) -> &[TilemapChunk] {
        &self.tilemap_chunks
    }
}
