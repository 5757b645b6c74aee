//! Flat pixel atlas and the per-face tile rectangles placed in it.

use glam::DVec2;

/// Pixel dimensions of the flat atlas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AtlasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl AtlasSize {
    /// Construct an atlas size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A pixel rectangle in the flat atlas. `(x, y)` is the top-left corner,
/// with `y` growing downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Left edge in pixels.
    pub x: i64,
    /// Top edge in pixels.
    pub y: i64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Tile {
    /// Place a `width`×`height` tile at the top-left corner of a UV quad.
    ///
    /// Texture `v` grows upward while pixel rows grow downward, so the top
    /// edge comes from the largest `v`.
    pub fn from_uv(uvs: &[DVec2; 4], atlas: AtlasSize, width: u32, height: u32) -> Self {
        let min_u = uvs.iter().map(|uv| uv.x).fold(f64::INFINITY, f64::min);
        let max_v = uvs.iter().map(|uv| uv.y).fold(f64::NEG_INFINITY, f64::max);
        Self {
            x: (min_u * atlas.width as f64).round() as i64,
            y: ((1.0 - max_v) * atlas.height as f64).round() as i64,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }

    /// Whether the tile lies entirely inside `atlas`.
    pub fn fits(&self, atlas: AtlasSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.right() <= atlas.width as i64
            && self.bottom() <= atlas.height as i64
    }
}

/// Ordered tile rectangles: entry `i` describes the same surface patch as
/// mesh face `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileLayout {
    tiles: Vec<Tile>,
    atlas: AtlasSize,
}

impl TileLayout {
    /// An empty layout for the given atlas.
    pub fn new(atlas: AtlasSize) -> Self {
        Self {
            tiles: Vec::new(),
            atlas,
        }
    }

    /// Replace the atlas dimensions.
    pub fn set_atlas(&mut self, atlas: AtlasSize) {
        self.atlas = atlas;
    }

    /// Append one tile.
    pub fn push(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// The atlas every tile is placed in.
    pub fn atlas(&self) -> AtlasSize {
        self.atlas
    }

    /// All tiles in emission order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true if no tile has been placed.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_uv_uses_min_u_and_max_v() {
        let atlas = AtlasSize::new(40, 40);
        let uvs = [
            DVec2::new(0.5, 0.25),
            DVec2::new(0.25, 0.25),
            DVec2::new(0.25, 0.5),
            DVec2::new(0.5, 0.5),
        ];
        let tile = Tile::from_uv(&uvs, atlas, 10, 10);
        assert_eq!((tile.x, tile.y), (10, 20));
        assert!(tile.fits(atlas));
    }

    #[test]
    fn test_from_uv_rounds_float_noise() {
        let atlas = AtlasSize::new(30, 10);
        let third = 1.0 / 3.0;
        let uvs = [DVec2::new(third, 1.0); 4];
        assert_eq!(Tile::from_uv(&uvs, atlas, 10, 10).x, 10);
    }

    #[test]
    fn test_fits_rejects_overhang() {
        let atlas = AtlasSize::new(20, 20);
        let tile = Tile {
            x: 15,
            y: 0,
            width: 10,
            height: 10,
        };
        assert!(!tile.fits(atlas));
        assert_eq!(tile.right(), 25);
    }

    #[test]
    fn test_layout_keeps_order() {
        let mut layout = TileLayout::new(AtlasSize::new(10, 10));
        assert!(layout.is_empty());
        for x in 0..3 {
            layout.push(Tile {
                x,
                y: 0,
                width: 1,
                height: 1,
            });
        }
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.tiles()[2].x, 2);
    }
}
