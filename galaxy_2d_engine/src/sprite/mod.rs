//! Sprite module — the read-only data the renderer consumes.
//!
//! Sprites are long-lived and shared (`Arc<Sprite>`). Transforms and
//! sprite renderers belong to entities outside the engine; the renderer
//! only reads them once per frame.

mod sprite;
mod transform;
mod sprite_renderer;
mod tilemap;
mod scene_provider;

pub use sprite::{TextureId, UvRect, Sprite};
pub use transform::Transform;
pub use sprite_renderer::{SpriteRenderer, SpriteFlags, SpriteEntity};
pub use tilemap::{Tile, TilemapChunk};
pub use scene_provider::{SceneProvider, FrameScene};
