/// Perspective culler: six planes from the camera view-projection.
///
/// Sprites are flat, so their 2D box is extruded into a thin slab around the
/// sprite depth before the positive-vertex test. Unrotated sprites are tested
/// with their exact box; rotated ones get rotation padding.

use crate::camera::{Camera, CameraSystem, Frustum};
use crate::sprite::{SpriteRenderer, Transform};
use super::aabb::Aabb2d;
use super::culler::{sprite_aabb, CullerKind, FrustumCuller};

/// Half thickness of the slab a sprite occupies along Z
pub const SPRITE_SLAB_HALF_DEPTH: f32 = 0.01;

#[derive(Debug, Clone, Default)]
pub struct PerspectiveFrustumCuller {
    /// Cached planes, `None` until the first update
    frustum: Option<Frustum>,
}

impl PerspectiveFrustumCuller {
    pub fn new() -> Self {
        Self { frustum: None }
    }

    /// Cached frustum
    pub fn frustum(&self) -> Option<&Frustum> {
        self.frustum.as_ref()
    }
}

impl FrustumCuller for PerspectiveFrustumCuller {
    fn kind(&self) -> CullerKind {
        CullerKind::Perspective
    }

    fn update_from_camera(&mut self, camera: &Camera, camera_system: &CameraSystem) {
        let vp = camera.view_projection_matrix(camera_system.game_size());
        self.frustum = Some(Frustum::from_view_projection(&vp));
    }

    fn is_region_visible(&self, aabb: &Aabb2d, z: f32) -> bool {
        match &self.frustum {
            Some(frustum) => frustum.intersects_aabb(&aabb.extruded(z, SPRITE_SLAB_HALF_DEPTH)),
            None => true,
        }
    }

    fn is_visible(&self, renderer: &SpriteRenderer, transform: Option<&Transform>) -> bool {
        let rotated = transform.is_some_and(|t| t.rotation_z() != 0.0);
        match sprite_aabb(renderer, transform, rotated) {
            Some((aabb, z)) => self.is_region_visible(&aabb, z),
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "perspective_tests.rs"]
mod tests;
