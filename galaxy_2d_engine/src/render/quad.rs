/// RenderableQuad — the single normalized form of every draw request.
///
/// Entity sprites, tilemap tiles and free-form draws are all converted to a
/// `RenderableQuad` before sorting, so vertex generation has one code path.
///
/// Corner naming uses the box itself: "bottom-left" is the `min` corner
/// (`position - size * origin`), "top-right" the `min + size` corner. UVs
/// follow positions: `(u0, v0)` at bottom-left, `(u1, v1)` at top-right.

use glam::{Mat4, Vec2, Vec4};
use crate::sprite::{SpriteFlags, SpriteRenderer, TextureId, Transform, UvRect};
use super::vertex::SpriteVertex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderableQuad {
    pub texture: TextureId,
    /// Pivot position in world space
    pub position: Vec2,
    /// Final world size (may be negative on a mirrored axis)
    pub size: Vec2,
    /// Rotation about the quad centre, degrees
    pub rotation: f32,
    /// Normalized pivot
    pub origin: Vec2,
    pub uv: UvRect,
    pub z_index: i32,
    /// Y sort key
    pub sort_y: f32,
    pub color: Vec4,
    /// Submission order within the frame, the last sort tie-break
    pub sequence: u64,
}

/// Free-form draw request: a textured quad with explicit placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub texture: TextureId,
    pub position: Vec2,
    pub size: Vec2,
    /// Degrees
    pub rotation: f32,
    pub origin: Vec2,
    pub uv: UvRect,
    pub z_index: i32,
    pub tint: Vec4,
}

impl SpriteDraw {
    /// Unrotated, bottom-left anchored, full texture, white tint, z-index 0
    pub fn new(texture: TextureId, position: Vec2, size: Vec2) -> Self {
        Self {
            texture,
            position,
            size,
            rotation: 0.0,
            origin: Vec2::ZERO,
            uv: UvRect::FULL,
            z_index: 0,
            tint: Vec4::ONE,
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_uv(mut self, uv: UvRect) -> Self {
        self.uv = uv;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_tint(mut self, tint: Vec4) -> Self {
        self.tint = tint;
        self
    }
}

fn finite_size(size: Vec2) -> bool {
    size.is_finite() && size.x != 0.0 && size.y != 0.0
}

impl RenderableQuad {
    /// Quad of an entity sprite. `None` if the sprite, its texture, or the
    /// transform is missing.
    ///
    /// Size is the sprite size times the transform scale; tint is the
    /// renderer tint times `tint`, component-wise.
    pub fn from_sprite(
        renderer: &SpriteRenderer,
        transform: Option<&Transform>,
        tint: Vec4,
        sequence: u64,
    ) -> Option<Self> {
        let transform = transform?;
        let sprite = renderer.renderable_sprite()?;
        let texture = sprite.texture()?;
        let size = sprite.size() * transform.scale_xy();
        if !finite_size(size) || !transform.position.is_finite() {
            return None;
        }

        let mut uv = *sprite.uv();
        if renderer.flags.contains(SpriteFlags::FLIP_X) {
            uv = uv.flipped_x();
        }
        if renderer.flags.contains(SpriteFlags::FLIP_Y) {
            uv = uv.flipped_y();
        }

        let position = transform.position.truncate();
        Some(Self {
            texture,
            position,
            size,
            rotation: transform.rotation_z(),
            origin: renderer.origin(),
            uv,
            z_index: renderer.z_index,
            sort_y: position.y,
            color: renderer.tint * tint,
            sequence,
        })
    }

    /// Quad of a tile: bottom-left anchored, never rotated.
    pub fn from_tile(
        texture: TextureId,
        position: Vec2,
        size: Vec2,
        uv: UvRect,
        z_index: i32,
        tint: Vec4,
        sequence: u64,
    ) -> Option<Self> {
        if !finite_size(size) || !position.is_finite() {
            return None;
        }
        Some(Self {
            texture,
            position,
            size,
            rotation: 0.0,
            origin: Vec2::ZERO,
            uv,
            z_index,
            sort_y: position.y,
            color: tint,
            sequence,
        })
    }

    /// Quad of a free-form draw request
    pub fn from_draw(draw: &SpriteDraw, sequence: u64) -> Option<Self> {
        if !finite_size(draw.size) || !draw.position.is_finite() || !draw.rotation.is_finite() {
            return None;
        }
        Some(Self {
            texture: draw.texture,
            position: draw.position,
            size: draw.size,
            rotation: draw.rotation,
            origin: draw.origin.clamp(Vec2::ZERO, Vec2::ONE),
            uv: draw.uv,
            z_index: draw.z_index,
            sort_y: draw.position.y,
            color: draw.tint,
            sequence,
        })
    }

    // ===== GEOMETRY =====

    /// Origin-adjusted `min` corner, before rotation
    pub fn min_corner(&self) -> Vec2 {
        self.position - self.size * self.origin
    }

    pub fn center(&self) -> Vec2 {
        self.min_corner() + self.size * 0.5
    }

    /// World corners: bottom-left, top-left, top-right, bottom-right.
    /// Rotated about the centre when rotation is non-zero.
    pub fn corners(&self) -> [Vec2; 4] {
        let min = self.min_corner();
        let corners = [
            min,
            min + Vec2::new(0.0, self.size.y),
            min + self.size,
            min + Vec2::new(self.size.x, 0.0),
        ];
        if self.rotation == 0.0 {
            return corners;
        }

        let center = self.center();
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        corners.map(|corner| {
            let d = corner - center;
            center + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
        })
    }

    /// Corners relative to the centre, unrotated (per-sprite render mode)
    pub fn local_corners(&self) -> [Vec2; 4] {
        let half = self.size * 0.5;
        [
            Vec2::new(-half.x, -half.y),
            Vec2::new(-half.x, half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(half.x, -half.y),
        ]
    }

    /// Model matrix placing `local_corners` in the world
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.center().extend(0.0))
            * Mat4::from_rotation_z(self.rotation.to_radians())
    }

    /// Append the 6 vertices of this quad in world space
    pub fn write_vertices(&self, out: &mut Vec<SpriteVertex>) {
        self.emit(self.corners(), out);
    }

    /// Append the 6 vertices of this quad in local space
    pub fn write_local_vertices(&self, out: &mut Vec<SpriteVertex>) {
        self.emit(self.local_corners(), out);
    }

    /// Two triangles: BL, TL, TR / BL, TR, BR
    fn emit(&self, corners: [Vec2; 4], out: &mut Vec<SpriteVertex>) {
        let uv = &self.uv;
        let uvs = [[uv.u0, uv.v0], [uv.u0, uv.v1], [uv.u1, uv.v1], [uv.u1, uv.v0]];
        let color = self.color.to_array();
        for i in [0, 1, 2, 0, 2, 3] {
            out.push(SpriteVertex {
                position: corners[i].to_array(),
                uv: uvs[i],
                color,
            });
        }
    }
}

#[cfg(test)]
#[path = "quad_tests.rs"]
mod tests;
