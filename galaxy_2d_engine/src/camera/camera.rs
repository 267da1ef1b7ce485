/// Camera — position, zoom, clip planes, and projection kind.
///
/// Unlike the game-resolution projection owned by `CameraSystem`, the camera
/// projection depends on its kind: orthographic cameras reuse the
/// game-resolution box, perspective cameras build a frustum from their FOV.
///
/// Orthographic convention: `position` is the world point shown at the
/// top-left corner of the game resolution, and zoom scales around it.
/// World units map 1:1 to game pixels at zoom 1, with Y growing downward.
///
/// Perspective convention: the camera looks down -Z from `position`.

use glam::{Mat4, Vec2, Vec3};
use crate::engine_warn;

/// Projection kind of a camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraProjection {
    /// Box projection spanning the game resolution
    Orthographic,
    /// Vertical field of view in degrees
    Perspective { fov_y_degrees: f32 },
}

/// 2D/2.5D camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    zoom: f32,
    near: f32,
    far: f32,
    projection: CameraProjection,
}

impl Camera {
    /// Orthographic camera at `position` (z = 0), zoom 1, clip [0, 100]
    pub fn orthographic(position: Vec2) -> Self {
        Self {
            position: position.extend(0.0),
            zoom: 1.0,
            near: 0.0,
            far: 100.0,
            projection: CameraProjection::Orthographic,
        }
    }

    /// Perspective camera at `position` looking down -Z, clip [0.1, 1000]
    pub fn perspective(position: Vec3, fov_y_degrees: f32) -> Self {
        Self {
            position,
            zoom: 1.0,
            near: 0.1,
            far: 1000.0,
            projection: CameraProjection::Perspective { fov_y_degrees },
        }
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn projection(&self) -> CameraProjection {
        self.projection
    }

    pub fn is_orthographic(&self) -> bool {
        matches!(self.projection, CameraProjection::Orthographic)
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the zoom factor. Non-positive or non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if !(zoom.is_finite() && zoom > 0.0) {
            engine_warn!("galaxy2d::Camera", "Ignoring invalid zoom {}", zoom);
            return;
        }
        self.zoom = zoom;
    }

    /// Set near/far planes. Ignored unless `near < far` (and `near > 0` for
    /// perspective cameras).
    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        let perspective_ok = self.is_orthographic() || near > 0.0;
        if !(near.is_finite() && far.is_finite() && near < far && perspective_ok) {
            engine_warn!("galaxy2d::Camera", "Ignoring invalid clip planes near={} far={}", near, far);
            return;
        }
        self.near = near;
        self.far = far;
    }

    // ===== MATRICES =====

    /// World → view matrix
    pub fn view_matrix(&self) -> Mat4 {
        match self.projection {
            CameraProjection::Orthographic => {
                Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0))
                    * Mat4::from_translation(-self.position)
            }
            CameraProjection::Perspective { .. } => Mat4::from_translation(-self.position),
        }
    }

    /// Projection matrix for a target of `game_size` pixels.
    ///
    /// Perspective zoom narrows the field of view.
    pub fn projection_matrix(&self, game_size: Vec2) -> Mat4 {
        match self.projection {
            CameraProjection::Orthographic => {
                Mat4::orthographic_rh(0.0, game_size.x, game_size.y, 0.0, self.near, self.far)
            }
            CameraProjection::Perspective { fov_y_degrees } => {
                let fov = (fov_y_degrees.to_radians() / self.zoom)
                    .clamp(f32::EPSILON, std::f32::consts::PI - 0.01);
                let aspect = if game_size.y > 0.0 { game_size.x / game_size.y } else { 1.0 };
                Mat4::perspective_rh(fov, aspect, self.near, self.far)
            }
        }
    }

    /// Combined view-projection matrix (projection * view)
    pub fn view_projection_matrix(&self, game_size: Vec2) -> Mat4 {
        self.projection_matrix(game_size) * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::orthographic(Vec2::ZERO)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
