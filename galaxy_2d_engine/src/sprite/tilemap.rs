/// Tilemap chunks — groups of axis-aligned tiles sharing one texture.

use glam::{Vec2, Vec4};
use crate::culling::Aabb2d;
use super::sprite::{TextureId, UvRect};

/// One tile: bottom-left anchored, never rotated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub position: Vec2,
    pub size: Vec2,
    pub uv: UvRect,
}

/// A chunk of tiles drawn with one texture, z-index, and tint.
#[derive(Debug, Clone)]
pub struct TilemapChunk {
    pub texture: Option<TextureId>,
    pub z_index: i32,
    pub tint: Vec4,
    pub tiles: Vec<Tile>,
}

impl TilemapChunk {
    pub fn new(texture: TextureId, z_index: i32) -> Self {
        Self {
            texture: Some(texture),
            z_index,
            tint: Vec4::ONE,
            tiles: Vec::new(),
        }
    }

    /// Lay out a `columns` x `rows` grid of `tile_size` tiles starting at `origin`.
    ///
    /// `uv_for` picks the atlas cell of each (column, row).
    pub fn grid<F>(texture: TextureId, z_index: i32, origin: Vec2, tile_size: Vec2, columns: u32, rows: u32, mut uv_for: F) -> Self
    where
        F: FnMut(u32, u32) -> UvRect,
    {
        let mut chunk = Self::new(texture, z_index);
        chunk.tiles.reserve(columns.saturating_mul(rows) as usize);
        for row in 0..rows {
            for column in 0..columns {
                chunk.tiles.push(Tile {
                    position: origin + Vec2::new(column as f32, row as f32) * tile_size,
                    size: tile_size,
                    uv: uv_for(column, row),
                });
            }
        }
        chunk
    }

    /// Bounding box of all tiles, `None` for an empty chunk
    pub fn bounds(&self) -> Option<Aabb2d> {
        self.tiles
            .iter()
            .map(|t| Aabb2d::new(t.position, t.position + t.size))
            .reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
#[path = "tilemap_tests.rs"]
mod tests;
