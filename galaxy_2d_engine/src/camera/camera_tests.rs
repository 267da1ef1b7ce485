use glam::{Mat4, Vec2, Vec3, Vec4};
use super::*;

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_orthographic_defaults() {
    let camera = Camera::orthographic(Vec2::new(5.0, 6.0));
    assert_eq!(camera.position(), Vec3::new(5.0, 6.0, 0.0));
    assert_eq!(camera.zoom(), 1.0);
    assert!(camera.is_orthographic());
    assert!(camera.near() < camera.far());
}

#[test]
fn test_perspective_defaults() {
    let camera = Camera::perspective(Vec3::new(0.0, 0.0, 10.0), 60.0);
    assert!(!camera.is_orthographic());
    assert_eq!(camera.projection(), CameraProjection::Perspective { fov_y_degrees: 60.0 });
    assert!(camera.near() > 0.0);
}

// ============================================================================
// Setters
// ============================================================================

#[test]
fn test_set_zoom_rejects_invalid_values() {
    let mut camera = Camera::default();
    camera.set_zoom(2.0);
    assert_eq!(camera.zoom(), 2.0);
    camera.set_zoom(0.0);
    camera.set_zoom(-1.0);
    camera.set_zoom(f32::NAN);
    assert_eq!(camera.zoom(), 2.0);
}

#[test]
fn test_set_clip_planes_rejects_inverted_range() {
    let mut camera = Camera::default();
    camera.set_clip_planes(-10.0, 10.0);
    assert_eq!((camera.near(), camera.far()), (-10.0, 10.0));
    camera.set_clip_planes(5.0, 1.0);
    assert_eq!((camera.near(), camera.far()), (-10.0, 10.0));
}

#[test]
fn test_perspective_rejects_non_positive_near() {
    let mut camera = Camera::perspective(Vec3::ZERO, 45.0);
    camera.set_clip_planes(0.0, 50.0);
    assert_eq!(camera.near(), 0.1);
    camera.set_clip_planes(1.0, 50.0);
    assert_eq!((camera.near(), camera.far()), (1.0, 50.0));
}

// ============================================================================
// Matrices
// ============================================================================

#[test]
fn test_orthographic_view_translates_and_zooms() {
    let mut camera = Camera::orthographic(Vec2::new(100.0, 50.0));
    camera.set_zoom(2.0);
    let view = camera.view_matrix();
    let p = view.transform_point3(Vec3::new(110.0, 60.0, 0.0));
    assert_eq!(p, Vec3::new(20.0, 20.0, 0.0));
}

#[test]
fn test_orthographic_projection_flips_y() {
    let camera = Camera::default();
    let proj = camera.projection_matrix(Vec2::new(640.0, 480.0));
    let top_left = proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
    let bottom_right = proj * Vec4::new(640.0, 480.0, 0.0, 1.0);
    assert!((top_left.x + 1.0).abs() < 1e-5 && (top_left.y - 1.0).abs() < 1e-5);
    assert!((bottom_right.x - 1.0).abs() < 1e-5 && (bottom_right.y + 1.0).abs() < 1e-5);
}

#[test]
fn test_view_projection_matrix() {
    let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 45.0);
    let size = Vec2::new(1920.0, 1080.0);
    let expected: Mat4 = camera.projection_matrix(size) * camera.view_matrix();
    assert_eq!(camera.view_projection_matrix(size), expected);
}

#[test]
fn test_perspective_zoom_narrows_fov() {
    let mut camera = Camera::perspective(Vec3::ZERO, 60.0);
    let size = Vec2::new(800.0, 600.0);
    let wide = camera.projection_matrix(size);
    camera.set_zoom(2.0);
    let narrow = camera.projection_matrix(size);
    // A narrower FOV yields a larger Y scale term
    assert!(narrow.y_axis.y > wide.y_axis.y);
}
