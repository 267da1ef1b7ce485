/// Sprite — the visual source of a quad: texture, UV rectangle, world size.

use glam::Vec2;

/// GPU texture identifier, as handed out by the texture loader.
///
/// The batch only compares and binds these; it never owns textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Normalized UV rectangle. Always within [0, 1].
///
/// `u0 > u1` (or `v0 > v1`) is allowed and means the image is mirrored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    /// The whole texture
    pub const FULL: UvRect = UvRect { u0: 0.0, v0: 0.0, u1: 1.0, v1: 1.0 };

    /// Create a UV rectangle, clamping every coordinate into [0, 1].
    ///
    /// Non-finite coordinates collapse to 0.
    pub fn new(u0: f32, v0: f32, u1: f32, v1: f32) -> Self {
        let clamp = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self { u0: clamp(u0), v0: clamp(v0), u1: clamp(u1), v1: clamp(v1) }
    }

    /// UV rectangle of a pixel region inside a texture atlas.
    ///
    /// Returns `FULL` when the atlas size is zero.
    pub fn from_pixels(atlas_width: u32, atlas_height: u32, x: u32, y: u32, width: u32, height: u32) -> Self {
        if atlas_width == 0 || atlas_height == 0 {
            return Self::FULL;
        }
        let aw = atlas_width as f32;
        let ah = atlas_height as f32;
        Self::new(
            x as f32 / aw,
            y as f32 / ah,
            x.saturating_add(width) as f32 / aw,
            y.saturating_add(height) as f32 / ah,
        )
    }

    /// Same rectangle mirrored horizontally
    pub fn flipped_x(&self) -> Self {
        Self { u0: self.u1, u1: self.u0, ..*self }
    }

    /// Same rectangle mirrored vertically
    pub fn flipped_y(&self) -> Self {
        Self { v0: self.v1, v1: self.v0, ..*self }
    }
}

impl Default for UvRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// Sprite: texture reference + UV rect + base world size.
///
/// `texture == None` is a sprite whose texture failed to load. Such sprites
/// are never drawn and never reported visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    texture: Option<TextureId>,
    width: f32,
    height: f32,
    uv: UvRect,
}

impl Sprite {
    /// Sprite covering the whole texture
    pub fn new(texture: TextureId, width: f32, height: f32) -> Self {
        Self {
            texture: Some(texture),
            width,
            height,
            uv: UvRect::FULL,
        }
    }

    /// Sprite without a texture (placeholder for a failed load)
    pub fn untextured(width: f32, height: f32) -> Self {
        Self {
            texture: None,
            width,
            height,
            uv: UvRect::FULL,
        }
    }

    /// Replace the UV rectangle (builder style)
    pub fn with_uv(mut self, uv: UvRect) -> Self {
        self.uv = uv;
        self
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Base world size (before transform scale)
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn uv(&self) -> &UvRect {
        &self.uv
    }

    /// True when the sprite can produce a quad: it has a texture and a
    /// finite, strictly positive size.
    pub fn is_renderable(&self) -> bool {
        self.texture.is_some()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

#[cfg(test)]
#[path = "sprite_tests.rs"]
mod tests;
