//! Open-fronted cube tessellation.
//!
//! The five walls are unwrapped into a cross-shaped atlas:
//!
//! ```text
//!              +--------+
//!              |  top   |
//!     +--------+--------+--------+
//!     | right  |  back  |  left  |
//!     +--------+--------+--------+
//!              | bottom |
//!              +--------+
//! ```
//!
//! Each wall is a [`Plane`] descriptor; one generic sweep walks any of them.

use glam::{DVec2, DVec3};
use tracing::debug;

use crate::config::CubeConfig;
use crate::error::{Result, ShapeError, require_pixels, require_positive, tile_span};
use crate::layout::{AtlasSize, Tile};
use crate::patch::{Patch, PatchSink};
use crate::registry::ShapeKind;
use crate::shape::Shape;

/// Largest relative distance from a whole number still accepted as one.
const WHOLE_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn set(self, point: &mut DVec3, value: f64) {
        match self {
            Axis::X => point.x = value,
            Axis::Y => point.y = value,
            Axis::Z => point.z = value,
        }
    }
}

/// Tile steps along one in-plane axis.
#[derive(Clone, Copy, Debug)]
struct Sweep {
    axis: Axis,
    tiles: usize,
    pitch: f64,
    /// Atlas position runs opposite to the 3D axis.
    reversed: bool,
}

impl Sweep {
    /// Atlas offset, in tiles, of tile edge `edge` (`0..=tiles`).
    fn atlas_edge(&self, edge: usize) -> usize {
        if self.reversed {
            self.tiles - edge
        } else {
            edge
        }
    }
}

/// One wall of the cube and its place in the unwrapped atlas.
#[derive(Clone, Copy, Debug)]
struct Plane {
    name: &'static str,
    fixed: Axis,
    offset: f64,
    /// Sweep mapped to atlas columns.
    across: Sweep,
    /// Sweep mapped to atlas rows.
    up: Sweep,
    /// Atlas tile column and row (from the bottom) of the wall's corner.
    origin: (usize, usize),
}

impl Plane {
    fn tile_count(&self) -> usize {
        self.across.tiles * self.up.tiles
    }

    fn point(&self, a: usize, b: usize) -> DVec3 {
        let mut p = DVec3::ZERO;
        self.fixed.set(&mut p, self.offset);
        self.across.axis.set(&mut p, a as f64 * self.across.pitch);
        self.up.axis.set(&mut p, b as f64 * self.up.pitch);
        p
    }

    fn uv(&self, a: usize, b: usize, columns: usize, rows: usize) -> DVec2 {
        DVec2::new(
            (self.origin.0 + self.across.atlas_edge(a)) as f64 / columns as f64,
            (self.origin.1 + self.up.atlas_edge(b)) as f64 / rows as f64,
        )
    }
}

/// Tile counts of a validated cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CubeGrid {
    width_tiles: usize,
    height_tiles: usize,
    depth_across: usize,
    depth_up: usize,
}

impl CubeGrid {
    fn columns(&self) -> usize {
        self.width_tiles.saturating_add(self.depth_across.saturating_mul(2))
    }

    fn rows(&self) -> usize {
        self.height_tiles.saturating_add(self.depth_up.saturating_mul(2))
    }
}

/// `extent / pitch` when it is a whole number of tiles.
fn whole_tiles(extent: f64, pitch: f64) -> Option<usize> {
    let ratio = extent / pitch;
    let whole = ratio.round();
    if whole >= 1.0 && (ratio - whole).abs() <= whole * WHOLE_TOLERANCE {
        Some(whole as usize)
    } else {
        None
    }
}

impl CubeConfig {
    fn check_multiple(
        pitch_name: &'static str,
        pitch: f64,
        extent_name: &'static str,
        extent: f64,
    ) -> Result<usize> {
        whole_tiles(extent, pitch).ok_or(ShapeError::NotIntegerMultiple {
            pitch_name,
            pitch,
            extent_name,
            extent,
        })
    }

    fn grid(&self) -> Result<CubeGrid> {
        require_positive("tileWidth", self.tile_width)?;
        require_positive("tileHeight", self.tile_height)?;
        require_positive("cubeWidth", self.cube_width)?;
        require_positive("cubeHeight", self.cube_height)?;
        require_positive("cubeDepth", self.cube_depth)?;
        require_pixels("dx", self.dx)?;
        require_pixels("dy", self.dy)?;

        Ok(CubeGrid {
            width_tiles: Self::check_multiple("width", self.tile_width, "cube width", self.cube_width)?,
            height_tiles: Self::check_multiple(
                "height",
                self.tile_height,
                "cube height",
                self.cube_height,
            )?,
            depth_across: Self::check_multiple("width", self.tile_width, "cube depth", self.cube_depth)?,
            depth_up: Self::check_multiple("height", self.tile_height, "cube depth", self.cube_depth)?,
        })
    }

    fn planes(&self, grid: &CubeGrid) -> [Plane; 5] {
        let (tw, th) = (self.tile_width, self.tile_height);
        let height = Sweep {
            axis: Axis::Z,
            tiles: grid.height_tiles,
            pitch: th,
            reversed: false,
        };
        let width = Sweep {
            axis: Axis::Y,
            tiles: grid.width_tiles,
            pitch: tw,
            reversed: true,
        };
        let depth_across = Sweep {
            axis: Axis::X,
            tiles: grid.depth_across,
            pitch: tw,
            reversed: false,
        };
        let depth_up = Sweep {
            axis: Axis::X,
            tiles: grid.depth_up,
            pitch: th,
            reversed: false,
        };

        [
            Plane {
                name: "left",
                fixed: Axis::Y,
                offset: 0.0,
                across: Sweep {
                    reversed: true,
                    ..depth_across
                },
                up: height,
                origin: (grid.depth_across + grid.width_tiles, grid.depth_up),
            },
            Plane {
                name: "right",
                fixed: Axis::Y,
                offset: self.cube_width,
                across: depth_across,
                up: height,
                origin: (0, grid.depth_up),
            },
            Plane {
                name: "back",
                fixed: Axis::X,
                offset: self.cube_depth,
                across: width,
                up: height,
                origin: (grid.depth_across, grid.depth_up),
            },
            Plane {
                name: "top",
                fixed: Axis::Z,
                offset: self.cube_height,
                across: width,
                up: Sweep {
                    reversed: true,
                    ..depth_up
                },
                origin: (grid.depth_across, grid.depth_up + grid.height_tiles),
            },
            Plane {
                name: "bottom",
                fixed: Axis::Z,
                offset: 0.0,
                across: width,
                up: depth_up,
                origin: (grid.depth_across, 0),
            },
        ]
    }

    /// Total number of tiles over all five walls.
    pub fn tile_count(&self) -> Result<usize> {
        let grid = self.grid()?;
        Ok(self.planes(&grid).iter().map(Plane::tile_count).sum())
    }

    /// Flat atlas size: the cross layout measured in tiles, times pixels per tile.
    pub fn atlas(&self) -> Result<AtlasSize> {
        self.atlas_for(&self.grid()?)
    }

    fn atlas_for(&self, grid: &CubeGrid) -> Result<AtlasSize> {
        Ok(AtlasSize::new(
            tile_span("dx", grid.columns(), self.dx)?,
            tile_span("dy", grid.rows(), self.dy)?,
        ))
    }
}

impl Shape for CubeConfig {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cube
    }

    fn validate(&self) -> Result<()> {
        self.grid().map(|_| ())
    }

    fn tessellate_into<S: PatchSink>(&self, sink: &mut S) -> Result<AtlasSize> {
        let grid = self.grid()?;
        let (columns, rows) = (grid.columns(), grid.rows());
        let atlas = self.atlas_for(&grid)?;
        sink.begin(atlas);

        for plane in self.planes(&grid) {
            debug!(plane = plane.name, tiles = plane.tile_count(), "sweeping cube wall");
            for a in 0..plane.across.tiles {
                for b in 0..plane.up.tiles {
                    let edges = [(a, b), (a + 1, b), (a + 1, b + 1), (a, b + 1)];
                    let corners = edges.map(|(ea, eb)| plane.point(ea, eb));
                    let uvs = edges.map(|(ea, eb)| plane.uv(ea, eb, columns, rows));
                    let tile = Tile::from_uv(&uvs, atlas, self.dx, self.dy);
                    sink.emit(Patch {
                        corners,
                        uvs,
                        tile,
                    });
                }
            }
        }
        Ok(atlas)
    }
}
