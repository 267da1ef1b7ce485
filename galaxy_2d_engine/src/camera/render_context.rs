/// RenderContext — the camera state a frame is rendered with.
///
/// Owned and passed explicitly; several contexts (editor preview, gameplay)
/// can coexist, each with its own camera system and active camera.

use glam::{Mat4, Vec2};
use crate::engine_warn;
use super::camera::Camera;
use super::camera_system::{CameraSystem, WorldBounds};

#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    camera_system: CameraSystem,
    active_camera: Option<Camera>,
}

impl RenderContext {
    pub fn new(camera_system: CameraSystem) -> Self {
        Self { camera_system, active_camera: None }
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.active_camera = Some(camera);
        self
    }

    // ===== ACCESSORS =====

    pub fn camera_system(&self) -> &CameraSystem {
        &self.camera_system
    }

    pub fn camera_system_mut(&mut self) -> &mut CameraSystem {
        &mut self.camera_system
    }

    pub fn active_camera(&self) -> Option<&Camera> {
        self.active_camera.as_ref()
    }

    pub fn active_camera_mut(&mut self) -> Option<&mut Camera> {
        self.active_camera.as_mut()
    }

    pub fn set_active_camera(&mut self, camera: Option<Camera>) {
        self.active_camera = camera;
    }

    pub fn game_size(&self) -> Vec2 {
        self.camera_system.game_size()
    }

    // ===== FRAME MATRICES =====

    /// View matrix of the active camera, identity without one
    pub fn view_matrix(&self) -> Mat4 {
        match &self.active_camera {
            Some(camera) => camera.view_matrix(),
            None => Mat4::IDENTITY,
        }
    }

    /// Projection of the active camera at game resolution.
    /// Falls back to the camera system projection without a camera.
    pub fn projection_matrix(&self) -> Mat4 {
        match &self.active_camera {
            Some(camera) => camera.projection_matrix(self.camera_system.game_size()),
            None => self.camera_system.projection_matrix(),
        }
    }

    /// Visible world area. Without an active camera, logs and returns game space.
    pub fn world_bounds(&self) -> WorldBounds {
        match &self.active_camera {
            Some(camera) => self.camera_system.world_bounds(camera),
            None => {
                engine_warn!("galaxy2d::RenderContext", "No active camera, using game-space bounds");
                self.camera_system.default_world_bounds()
            }
        }
    }
}

#[cfg(test)]
#[path = "render_context_tests.rs"]
mod tests;
