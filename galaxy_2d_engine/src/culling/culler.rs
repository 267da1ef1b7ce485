/// Sprite frustum culling.
///
/// A `FrustumCuller` caches the visible region of a camera once per frame
/// (`update_from_camera`) and then answers pure visibility queries for
/// sprites and tilemap chunks. Two implementations exist, one per camera
/// projection kind; `create_culler` picks one from a `CullerKind`.

use crate::camera::{Camera, CameraSystem};
use crate::sprite::{SpriteEntity, SpriteRenderer, TilemapChunk, Transform};
use super::aabb::Aabb2d;
use super::orthographic::OrthographicFrustumCuller;
use super::perspective::PerspectiveFrustumCuller;

/// Which culler implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullerKind {
    /// World-rectangle test (orthographic cameras)
    Orthographic,
    /// Six-plane test (perspective cameras)
    Perspective,
}

impl CullerKind {
    /// Kind matching a camera's projection
    pub fn for_camera(camera: &Camera) -> Self {
        if camera.is_orthographic() {
            CullerKind::Orthographic
        } else {
            CullerKind::Perspective
        }
    }
}

/// Result counters of a `cull` pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    /// Entities tested
    pub tested: usize,
    /// Entities found visible
    pub visible: usize,
}

impl CullStats {
    pub fn culled(&self) -> usize {
        self.tested - self.visible
    }
}

/// Visibility test against a camera frustum.
///
/// Until the first `update_from_camera`, every well-formed sprite is visible.
pub trait FrustumCuller: Send + Sync {
    /// Implementation kind
    fn kind(&self) -> CullerKind;

    /// Refresh the cached frustum. Called once per frame, before any query.
    fn update_from_camera(&mut self, camera: &Camera, camera_system: &CameraSystem);

    /// True if a world box at depth `z` may be visible
    fn is_region_visible(&self, aabb: &Aabb2d, z: f32) -> bool;

    /// True if the sprite may be visible.
    ///
    /// A missing sprite, missing texture, or missing transform is never visible.
    fn is_visible(&self, renderer: &SpriteRenderer, transform: Option<&Transform>) -> bool;

    /// True if any tile of the chunk may be visible. Untextured or empty
    /// chunks are never visible.
    fn is_chunk_visible(&self, chunk: &TilemapChunk) -> bool {
        if chunk.texture.is_none() {
            return false;
        }
        match chunk.bounds() {
            Some(bounds) => self.is_region_visible(&bounds, 0.0),
            None => false,
        }
    }

    /// Indices of the visible entities, in input order
    fn cull(&self, sprites: &[SpriteEntity]) -> (Vec<usize>, CullStats) {
        let visible: Vec<usize> = sprites
            .iter()
            .enumerate()
            .filter(|(_, entity)| self.is_visible(&entity.renderer, entity.transform.as_ref()))
            .map(|(index, _)| index)
            .collect();
        let stats = CullStats { tested: sprites.len(), visible: visible.len() };
        (visible, stats)
    }
}

/// World box and depth of a well-formed sprite, or `None` if it cannot be drawn
pub(super) fn sprite_aabb(
    renderer: &SpriteRenderer,
    transform: Option<&Transform>,
    rotation_padding: bool,
) -> Option<(Aabb2d, f32)> {
    let transform = transform?;
    let size = renderer.world_size(transform)?;
    let aabb = Aabb2d::from_sprite(
        transform.position.truncate(),
        size,
        renderer.origin(),
        rotation_padding,
    );
    Some((aabb, transform.position.z))
}

/// Create a culler of the requested kind
pub fn create_culler(kind: CullerKind) -> Box<dyn FrustumCuller> {
    match kind {
        CullerKind::Orthographic => Box::new(OrthographicFrustumCuller::new()),
        CullerKind::Perspective => Box::new(PerspectiveFrustumCuller::new()),
    }
}
