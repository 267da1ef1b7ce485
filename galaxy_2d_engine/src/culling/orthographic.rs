/// Orthographic culler: one rectangle-vs-rectangle test per sprite.
///
/// Sprite boxes are always rotation-padded, so rotation never causes a
/// visible sprite to be culled.

use crate::camera::{Camera, CameraSystem};
use crate::sprite::{SpriteRenderer, Transform};
use super::aabb::Aabb2d;
use super::culler::{sprite_aabb, CullerKind, FrustumCuller};

#[derive(Debug, Clone, Default)]
pub struct OrthographicFrustumCuller {
    /// Visible world rectangle, `None` until the first update
    bounds: Option<Aabb2d>,
}

impl OrthographicFrustumCuller {
    pub fn new() -> Self {
        Self { bounds: None }
    }

    /// Cached world rectangle
    pub fn bounds(&self) -> Option<&Aabb2d> {
        self.bounds.as_ref()
    }
}

impl FrustumCuller for OrthographicFrustumCuller {
    fn kind(&self) -> CullerKind {
        CullerKind::Orthographic
    }

    fn update_from_camera(&mut self, camera: &Camera, camera_system: &CameraSystem) {
        self.bounds = Some(camera_system.world_bounds(camera).aabb());
    }

    fn is_region_visible(&self, aabb: &Aabb2d, _z: f32) -> bool {
        match &self.bounds {
            Some(bounds) => bounds.intersects(aabb),
            None => true,
        }
    }

    fn is_visible(&self, renderer: &SpriteRenderer, transform: Option<&Transform>) -> bool {
        match sprite_aabb(renderer, transform, true) {
            Some((aabb, z)) => self.is_region_visible(&aabb, z),
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "orthographic_tests.rs"]
mod tests;
