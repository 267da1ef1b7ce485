//! Camera module — cameras, the game-resolution camera system, and frustums.
//!
//! Cameras are passive data owned by the caller. A `RenderContext` bundles a
//! `CameraSystem` with the active camera for one render target.

mod camera;
mod camera_system;
mod frustum;
mod render_context;

pub use camera::{Camera, CameraProjection};
pub use camera_system::{CameraSystem, CameraSystemConfig, Viewport, WorldBounds};
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use render_context::RenderContext;
