/// Transform — spatial placement of a sprite entity.

use glam::{Vec2, Vec3};

/// Position, rotation (degrees), and scale.
///
/// Only `rotation.z` is used by the 2D renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in degrees
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    /// Transform at `position` with no rotation and unit scale
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Transform at (x, y, 0)
    pub fn from_xy(x: f32, y: f32) -> Self {
        Self::from_position(Vec3::new(x, y, 0.0))
    }

    pub fn with_rotation_z(mut self, degrees: f32) -> Self {
        self.rotation.z = degrees;
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale = Vec3::new(x, y, self.scale.z);
        self
    }

    /// 2D rotation in degrees
    pub fn rotation_z(&self) -> f32 {
        self.rotation.z
    }

    /// 2D scale
    pub fn scale_xy(&self) -> Vec2 {
        self.scale.truncate()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO)
    }
}
