/// SpriteRenderer — binds a sprite to its tint, z-index, pivot, and flags.

use std::sync::Arc;
use bitflags::bitflags;
use glam::{Vec2, Vec4};
use super::sprite::Sprite;
use super::transform::Transform;

bitflags! {
    /// Per-renderer flags read by the batch and by pass filters
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpriteFlags: u32 {
        /// Mirror the UV rectangle horizontally
        const FLIP_X   = 1 << 0;
        /// Mirror the UV rectangle vertically
        const FLIP_Y   = 1 << 1;
        /// Also drawn by passes that filter on EMISSIVE (glow framebuffer)
        const EMISSIVE = 1 << 2;
    }
}

/// Render request attached to an entity.
///
/// `sprite == None` is an entity whose sprite was never assigned; it is
/// skipped by culling and batching.
#[derive(Debug, Clone)]
pub struct SpriteRenderer {
    pub sprite: Option<Arc<Sprite>>,
    /// RGBA multiplier, components in [0, 1]
    pub tint: Vec4,
    pub z_index: i32,
    /// Pivot as a fraction of the final (scaled) size, in [0, 1]²
    origin: Vec2,
    /// Batched once and cached until `SpriteBatch::mark_static_batch_dirty`
    pub is_static: bool,
    pub flags: SpriteFlags,
}

impl SpriteRenderer {
    /// Renderer with white tint, z-index 0, bottom-left origin, dynamic
    pub fn new(sprite: Arc<Sprite>) -> Self {
        Self {
            sprite: Some(sprite),
            tint: Vec4::ONE,
            z_index: 0,
            origin: Vec2::ZERO,
            is_static: false,
            flags: SpriteFlags::empty(),
        }
    }

    /// Renderer with no sprite assigned
    pub fn empty() -> Self {
        Self {
            sprite: None,
            tint: Vec4::ONE,
            z_index: 0,
            origin: Vec2::ZERO,
            is_static: false,
            flags: SpriteFlags::empty(),
        }
    }

    pub fn with_tint(mut self, tint: Vec4) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.set_origin(origin);
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_flags(mut self, flags: SpriteFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Set the pivot, clamped into [0, 1]²
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin.clamp(Vec2::ZERO, Vec2::ONE);
    }

    /// The sprite, if it is assigned and renderable
    pub fn renderable_sprite(&self) -> Option<&Sprite> {
        self.sprite.as_deref().filter(|s| s.is_renderable())
    }

    /// World size of the sprite after applying the transform scale
    pub fn world_size(&self, transform: &Transform) -> Option<Vec2> {
        self.renderable_sprite().map(|s| s.size() * transform.scale_xy())
    }
}

/// One entity as seen by the renderer: optional transform + renderer.
///
/// `transform == None` mirrors an entity whose Transform component is
/// missing; it is skipped like a missing sprite.
#[derive(Debug, Clone)]
pub struct SpriteEntity {
    pub transform: Option<Transform>,
    pub renderer: SpriteRenderer,
}

impl SpriteEntity {
    pub fn new(transform: Transform, renderer: SpriteRenderer) -> Self {
        Self {
            transform: Some(transform),
            renderer,
        }
    }
}

#[cfg(test)]
#[path = "sprite_renderer_tests.rs"]
mod tests;
