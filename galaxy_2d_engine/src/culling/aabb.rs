/// Axis-aligned bounding boxes used by culling.
///
/// `Aabb2d` is the sprite-space box (world X/Y). `AABB` is the 3D box the
/// perspective frustum tests against; a sprite box becomes one by extruding
/// it into a thin slab around the sprite depth.

use glam::{Vec2, Vec3};

/// Axis-aligned 2D box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2d {
    /// Minimum corner (x, y)
    pub min: Vec2,
    /// Maximum corner (x, y)
    pub max: Vec2,
}

impl Aabb2d {
    /// Box from two corners, in any order
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Bounding box of a sprite.
    ///
    /// `size` is the final world size (sprite size * transform scale) and
    /// `origin` the normalized pivot: `min = position - size * origin`,
    /// `max = min + size`. Negative sizes (mirrored scale) are reordered.
    ///
    /// With `rotation_padding`, the box grows on every side so that it
    /// encloses the sprite at any rotation about its centre: each half extent
    /// becomes half the diagonal. This replaces the uniform
    /// `(diagonal - max(w, h)) / 2` padding, which it equals for squares and
    /// which leaves a thin bar rotated by 90 degrees outside its box.
    pub fn from_sprite(position: Vec2, size: Vec2, origin: Vec2, rotation_padding: bool) -> Self {
        let corner = position - size * origin;
        let mut aabb = Self::new(corner, corner + size);
        if rotation_padding {
            let padding = Self::rotation_padding(size);
            aabb.min -= padding;
            aabb.max += padding;
        }
        aabb
    }

    /// Per-axis padding that makes a `size` box rotation-safe
    pub fn rotation_padding(size: Vec2) -> Vec2 {
        let half_diagonal = size.length() * 0.5;
        (Vec2::splat(half_diagonal) - size.abs() * 0.5).max(Vec2::ZERO)
    }

    /// Separating-axis test. Touching boxes intersect.
    pub fn intersects(&self, other: &Aabb2d) -> bool {
        !(self.max.x < other.min.x
            || other.max.x < self.min.x
            || self.max.y < other.min.y
            || other.max.y < self.min.y)
    }

    /// True if `other` lies entirely within `self`
    pub fn contains(&self, other: &Aabb2d) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
            && self.min.y <= other.min.y && self.max.y >= other.max.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Smallest box enclosing both
    pub fn union(&self, other: &Aabb2d) -> Aabb2d {
        Aabb2d { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Thin 3D slab `[z - half_depth, z + half_depth]` around this box
    pub fn extruded(&self, z: f32, half_depth: f32) -> AABB {
        AABB {
            min: self.min.extend(z - half_depth),
            max: self.max.extend(z + half_depth),
        }
    }
}

/// Axis-aligned 3D box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Positive vertex: the corner furthest along `normal`
    pub fn positive_vertex(&self, normal: Vec3) -> Vec3 {
        Vec3::new(
            if normal.x >= 0.0 { self.max.x } else { self.min.x },
            if normal.y >= 0.0 { self.max.y } else { self.min.y },
            if normal.z >= 0.0 { self.max.z } else { self.min.z },
        )
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
