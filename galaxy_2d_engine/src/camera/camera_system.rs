/// CameraSystem — fixed game resolution vs. variable viewport.
///
/// The game resolution is the engine's internal render size; the viewport is
/// the physical window area it is presented in. All coordinate conversions
/// go through this type:
///
/// ```text
/// viewport ──scale──▶ game ──NDC──▶ inverse projection ──▶ inverse view ──▶ world
/// ```
///
/// The projection and view of that chain are the supplied camera's, the ones
/// it is rendered with. The system's own projection, described next, serves
/// callers without a camera.
///
/// The projection spans `[0, game_width] × [game_height, 0]` so game-space Y
/// grows downward. It depends only on the game resolution and the clip planes
/// and is rebuilt lazily when one of them changes.

use std::cell::Cell;
use glam::{Mat4, Vec2, Vec3};
use crate::culling::Aabb2d;
use crate::error::{Error, Result};
use crate::{engine_error, engine_warn};
use super::camera::Camera;

const SOURCE: &str = "galaxy2d::CameraSystem";

/// Smallest |determinant| accepted before a view matrix is treated as singular
const SINGULAR_EPSILON: f32 = 1e-12;

// ===== CONFIG =====

/// Initial state of a camera system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSystemConfig {
    /// Internal render resolution (pixels)
    pub game_width: f32,
    pub game_height: f32,
    /// Window / viewport size (pixels)
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Clip planes of the game-resolution projection
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSystemConfig {
    fn default() -> Self {
        Self {
            game_width: 640.0,
            game_height: 480.0,
            viewport_width: 640.0,
            viewport_height: 480.0,
            near: 0.0,
            far: 100.0,
        }
    }
}

// ===== VIEWPORT =====

/// Rectangle in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ===== WORLD BOUNDS =====

/// World-space area visible to a camera.
///
/// Corners are the game-resolution corners unprojected onto the `z = 0`
/// sprite plane, in order
/// top-left, top-right, bottom-right, bottom-left (game space).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub corners: [Vec2; 4],
}

impl WorldBounds {
    /// Axis-aligned box enclosing the four corners
    pub fn aabb(&self) -> Aabb2d {
        let mut aabb = Aabb2d::new(self.corners[0], self.corners[0]);
        for &corner in &self.corners[1..] {
            aabb = aabb.union(&Aabb2d::new(corner, corner));
        }
        aabb
    }
}

// ===== CAMERA SYSTEM =====

fn valid_size(width: f32, height: f32) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

fn valid_clip(near: f32, far: f32) -> bool {
    near.is_finite() && far.is_finite() && near < far
}

/// Game resolution, viewport and coordinate conversions.
#[derive(Debug, Clone)]
pub struct CameraSystem {
    game_size: Vec2,
    viewport_size: Vec2,
    near: f32,
    far: f32,
    projection: Cell<Mat4>,
    projection_dirty: Cell<bool>,
}

impl CameraSystem {
    /// Create a camera system. Fails with `InitializationFailed` on
    /// non-positive sizes or an empty clip range.
    pub fn new(config: CameraSystemConfig) -> Result<Self> {
        if !valid_size(config.game_width, config.game_height) {
            engine_error!(SOURCE, "Invalid game resolution {}x{}", config.game_width, config.game_height);
            return Err(Error::InitializationFailed(format!(
                "invalid game resolution {}x{}", config.game_width, config.game_height
            )));
        }
        if !valid_size(config.viewport_width, config.viewport_height) {
            engine_error!(SOURCE, "Invalid viewport {}x{}", config.viewport_width, config.viewport_height);
            return Err(Error::InitializationFailed(format!(
                "invalid viewport {}x{}", config.viewport_width, config.viewport_height
            )));
        }
        if !valid_clip(config.near, config.far) {
            engine_error!(SOURCE, "Invalid clip planes near={} far={}", config.near, config.far);
            return Err(Error::InitializationFailed(format!(
                "invalid clip planes near={} far={}", config.near, config.far
            )));
        }

        Ok(Self {
            game_size: Vec2::new(config.game_width, config.game_height),
            viewport_size: Vec2::new(config.viewport_width, config.viewport_height),
            near: config.near,
            far: config.far,
            projection: Cell::new(Mat4::IDENTITY),
            projection_dirty: Cell::new(true),
        })
    }

    // ===== GETTERS =====

    pub fn game_size(&self) -> Vec2 {
        self.game_size
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    // ===== SETTERS =====

    /// Resize the viewport. Invalid sizes are logged and ignored.
    /// The projection is unaffected.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        if !valid_size(width, height) {
            engine_warn!(SOURCE, "Ignoring invalid viewport size {}x{}", width, height);
            return;
        }
        self.viewport_size = Vec2::new(width, height);
    }

    /// Change the internal render resolution. Invalid sizes are logged and ignored.
    pub fn set_game_resolution(&mut self, width: f32, height: f32) {
        if !valid_size(width, height) {
            engine_warn!(SOURCE, "Ignoring invalid game resolution {}x{}", width, height);
            return;
        }
        self.game_size = Vec2::new(width, height);
        self.projection_dirty.set(true);
    }

    /// Change the projection clip planes. Ignored unless `near < far`.
    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        if !valid_clip(near, far) {
            engine_warn!(SOURCE, "Ignoring invalid clip planes near={} far={}", near, far);
            return;
        }
        self.near = near;
        self.far = far;
        self.projection_dirty.set(true);
    }

    // ===== PROJECTION =====

    /// Game-resolution orthographic projection (returned by value).
    pub fn projection_matrix(&self) -> Mat4 {
        if self.projection_dirty.get() {
            self.projection.set(Mat4::orthographic_rh(
                0.0, self.game_size.x,
                self.game_size.y, 0.0,
                self.near, self.far,
            ));
            self.projection_dirty.set(false);
        }
        self.projection.get()
    }

    /// Viewport pixels per game pixel, per axis
    pub fn scale_factor(&self) -> Vec2 {
        self.viewport_size / self.game_size
    }

    /// Largest viewport rectangle with the game aspect ratio, centred
    /// (letterbox / pillarbox).
    pub fn aspect_fit_viewport(&self) -> Viewport {
        let scale = self.scale_factor().min_element();
        let size = self.game_size * scale;
        let offset = (self.viewport_size - size) * 0.5;
        Viewport { x: offset.x, y: offset.y, width: size.x, height: size.y }
    }

    // ===== VIEWPORT <-> GAME =====

    pub fn viewport_to_game(&self, point: Vec2) -> Vec2 {
        point * self.game_size / self.viewport_size
    }

    pub fn game_to_viewport(&self, point: Vec2) -> Vec2 {
        point * self.viewport_size / self.game_size
    }

    // ===== GAME <-> NDC =====

    /// Game pixels to normalized device coordinates (Y flipped)
    pub fn game_to_ndc(&self, point: Vec2, depth: f32) -> Vec3 {
        Vec3::new(
            2.0 * point.x / self.game_size.x - 1.0,
            1.0 - 2.0 * point.y / self.game_size.y,
            depth,
        )
    }

    pub fn ndc_to_game(&self, ndc: Vec3) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.game_size.x,
            (1.0 - ndc.y) * 0.5 * self.game_size.y,
        )
    }

    // ===== GAME <-> WORLD =====

    /// Inverse of the camera view, or identity if the view is singular.
    fn inverse_view(&self, camera: &Camera) -> Mat4 {
        let view = camera.view_matrix();
        let det = view.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            engine_warn!(SOURCE, "Singular camera view matrix, falling back to identity");
            return Mat4::IDENTITY;
        }
        view.inverse()
    }

    /// Game pixels to world space through `camera`'s own projection and
    /// view. `depth` is the NDC depth (0 = near plane, 1 = far plane).
    pub fn game_to_world(&self, camera: &Camera, point: Vec2, depth: f32) -> Vec3 {
        let ndc = self.game_to_ndc(point, depth);
        let view_space = camera.projection_matrix(self.game_size).inverse().project_point3(ndc);
        self.inverse_view(camera).transform_point3(view_space)
    }

    /// World space to game pixels (exact inverse of `game_to_world`)
    pub fn world_to_game(&self, camera: &Camera, world: Vec3) -> Vec2 {
        let ndc = camera.view_projection_matrix(self.game_size).project_point3(world);
        self.ndc_to_game(ndc)
    }

    pub fn viewport_to_world(&self, camera: &Camera, point: Vec2, depth: f32) -> Vec3 {
        self.game_to_world(camera, self.viewport_to_game(point), depth)
    }

    pub fn world_to_viewport(&self, camera: &Camera, world: Vec3) -> Vec2 {
        self.game_to_viewport(self.world_to_game(camera, world))
    }

    /// World point under a game-resolution pixel on the `z = 0` sprite plane.
    ///
    /// Orthographic cameras unproject at the near plane. Perspective cameras
    /// cast the pixel's ray from the near to the far plane; if the ray never
    /// reaches `z = 0` inside the clip range, the near-plane point is used.
    fn game_to_sprite_plane(&self, camera: &Camera, point: Vec2) -> Vec2 {
        let near = self.game_to_world(camera, point, 0.0);
        if camera.is_orthographic() {
            return near.truncate();
        }
        let far = self.game_to_world(camera, point, 1.0);
        let t = -near.z / (far.z - near.z);
        if t.is_finite() && (0.0..=1.0).contains(&t) {
            near.lerp(far, t).truncate()
        } else {
            near.truncate()
        }
    }

    /// World-space corners visible to `camera` on the sprite plane, from
    /// the four game-resolution corners.
    pub fn world_bounds(&self, camera: &Camera) -> WorldBounds {
        let (w, h) = (self.game_size.x, self.game_size.y);
        let corners = [Vec2::ZERO, Vec2::new(w, 0.0), Vec2::new(w, h), Vec2::new(0.0, h)]
            .map(|corner| self.game_to_sprite_plane(camera, corner));
        WorldBounds { corners }
    }

    /// World bounds with no camera: game space itself.
    pub fn default_world_bounds(&self) -> WorldBounds {
        let (w, h) = (self.game_size.x, self.game_size.y);
        WorldBounds {
            corners: [Vec2::ZERO, Vec2::new(w, 0.0), Vec2::new(w, h), Vec2::new(0.0, h)],
        }
    }
}

impl Default for CameraSystem {
    fn default() -> Self {
        let config = CameraSystemConfig::default();
        Self {
            game_size: Vec2::new(config.game_width, config.game_height),
            viewport_size: Vec2::new(config.viewport_width, config.viewport_height),
            near: config.near,
            far: config.far,
            projection: Cell::new(Mat4::IDENTITY),
            projection_dirty: Cell::new(true),
        }
    }
}

#[cfg(test)]
#[path = "camera_system_tests.rs"]
mod tests;
