use std::sync::Arc;
use glam::{Vec2, Vec3};
use crate::sprite::{Sprite, TextureId};
use super::*;

const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;
const EYE_Z: f32 = 10.0;

fn updated_culler() -> PerspectiveFrustumCuller {
    let mut camera = Camera::perspective(Vec3::new(0.0, 0.0, EYE_Z), 60.0);
    camera.set_clip_planes(NEAR, FAR);
    let mut culler = PerspectiveFrustumCuller::new();
    culler.update_from_camera(&camera, &CameraSystem::default());
    culler
}

/// A near-point sprite centred on its position
fn point_sprite() -> SpriteRenderer {
    SpriteRenderer::new(Arc::new(Sprite::new(TextureId(1), 0.001, 0.001))).with_origin(Vec2::splat(0.5))
}

fn at(x: f32, y: f32, z: f32) -> Transform {
    Transform::from_position(Vec3::new(x, y, z))
}

#[test]
fn test_update_builds_frustum() {
    let culler = updated_culler();
    assert!(culler.frustum().is_some());
    assert_eq!(culler.kind(), CullerKind::Perspective);
}

#[test]
fn test_point_at_near_plane_is_visible() {
    let culler = updated_culler();
    assert!(culler.is_visible(&point_sprite(), Some(&at(0.0, 0.0, EYE_Z - NEAR))));
}

#[test]
fn test_point_beyond_far_plane_is_not_visible() {
    let culler = updated_culler();
    assert!(!culler.is_visible(&point_sprite(), Some(&at(0.0, 0.0, EYE_Z - FAR - 50.0))));
}

#[test]
fn test_point_behind_camera_is_not_visible() {
    let culler = updated_culler();
    assert!(!culler.is_visible(&point_sprite(), Some(&at(0.0, 0.0, EYE_Z + 1.0))));
}

#[test]
fn test_lateral_visibility() {
    let culler = updated_culler();
    let sprite = point_sprite();
    assert!(culler.is_visible(&sprite, Some(&at(2.0, -2.0, 0.0))));
    assert!(!culler.is_visible(&sprite, Some(&at(100.0, 0.0, 0.0))));
    assert!(!culler.is_visible(&sprite, Some(&at(0.0, -100.0, 0.0))));
}

#[test]
fn test_large_sprite_straddling_side_plane_is_visible() {
    let culler = updated_culler();
    // 40 units wide, centred 20 units off-axis: its left edge is on screen
    let wide = SpriteRenderer::new(Arc::new(Sprite::new(TextureId(1), 40.0, 1.0))).with_origin(Vec2::splat(0.5));
    assert!(culler.is_visible(&wide, Some(&at(20.0, 0.0, 0.0))));
}

#[test]
fn test_malformed_entities_are_not_visible() {
    let culler = updated_culler();
    let origin = at(0.0, 0.0, 0.0);
    assert!(!culler.is_visible(&SpriteRenderer::empty(), Some(&origin)));
    let untextured = SpriteRenderer::new(Arc::new(Sprite::untextured(1.0, 1.0)));
    assert!(!culler.is_visible(&untextured, Some(&origin)));
    assert!(!culler.is_visible(&point_sprite(), None));
}

#[test]
fn test_not_updated_reports_visible() {
    let culler = PerspectiveFrustumCuller::new();
    assert!(culler.is_visible(&point_sprite(), Some(&at(0.0, 0.0, 1.0e6))));
}
