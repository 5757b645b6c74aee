//! Cylindrical wall tessellation.
//!
//! The wall is swept in azimuth from `-azimuthMaxAngle` and in height from
//! zero. Every tile subtends the same chord angle, so the atlas is a regular
//! grid of `columns × rows` tiles with no correction needed.

use glam::DVec2;
use tracing::debug;
use tsig_math::{chord_angle, cylindrical_to_cartesian, step_count};

use crate::config::CurveConfig;
use crate::error::{Result, ShapeError, require_pixels, require_positive, tile_span};
use crate::layout::{AtlasSize, Tile};
use crate::patch::{Patch, PatchSink};
use crate::registry::ShapeKind;
use crate::shape::Shape;

/// The regular grid a curve is cut into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveGrid {
    /// Azimuth subtended by one tile.
    pub azimuth_step: f64,
    /// Tiles around the wall.
    pub columns: usize,
    /// Tiles up the wall.
    pub rows: usize,
    /// Flat atlas size.
    pub atlas: AtlasSize,
}

impl CurveConfig {
    /// Validate and derive the tile grid.
    pub fn grid(&self) -> Result<CurveGrid> {
        require_positive("tileWidth", self.tile_width)?;
        require_positive("tileHeight", self.tile_height)?;
        require_positive("cylinderRadius", self.radius)?;
        require_positive("cylinderHeight", self.height)?;
        require_positive("azimuthMaxAngle", self.azimuth_max)?;
        require_pixels("dx", self.dx)?;
        require_pixels("dy", self.dy)?;

        let azimuth_step =
            chord_angle(self.tile_width, self.radius).ok_or(ShapeError::TileTooLarge {
                pitch_name: "width",
                pitch: self.tile_width,
                radius: self.radius,
            })?;
        let columns = step_count(2.0 * self.azimuth_max, azimuth_step);
        let rows = step_count(self.height, self.tile_height);

        Ok(CurveGrid {
            azimuth_step,
            columns,
            rows,
            atlas: AtlasSize::new(
                tile_span("dx", columns, self.dx)?,
                tile_span("dy", rows, self.dy)?,
            ),
        })
    }
}

impl Shape for CurveConfig {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Curve
    }

    fn validate(&self) -> Result<()> {
        self.grid().map(|_| ())
    }

    fn tessellate_into<S: PatchSink>(&self, sink: &mut S) -> Result<AtlasSize> {
        let grid = self.grid()?;
        let atlas = grid.atlas;
        sink.begin(atlas);
        debug!(
            columns = grid.columns,
            rows = grid.rows,
            azimuth_step = grid.azimuth_step,
            "sweeping curve"
        );

        let u_width = 1.0 / grid.columns as f64;
        let v_height = 1.0 / grid.rows as f64;
        let r = self.radius;

        for row in 0..grid.rows {
            let z0 = row as f64 * self.tile_height;
            let z1 = z0 + self.tile_height;
            let v0 = row as f64 * v_height;
            let v1 = v0 + v_height;

            for column in 0..grid.columns {
                let az0 = -self.azimuth_max + column as f64 * grid.azimuth_step;
                let az1 = az0 + grid.azimuth_step;
                // The atlas runs right to left as azimuth increases.
                let u0 = 1.0 - column as f64 * u_width;
                let u1 = u0 - u_width;

                let corners = [
                    cylindrical_to_cartesian(r, z0, az0),
                    cylindrical_to_cartesian(r, z0, az1),
                    cylindrical_to_cartesian(r, z1, az1),
                    cylindrical_to_cartesian(r, z1, az0),
                ];
                let uvs = [
                    DVec2::new(u0, v0),
                    DVec2::new(u1, v0),
                    DVec2::new(u1, v1),
                    DVec2::new(u0, v1),
                ];
                let tile = Tile::from_uv(&uvs, atlas, self.dx, self.dy);
                sink.emit(Patch {
                    corners,
                    uvs,
                    tile,
                });
            }
        }
        Ok(atlas)
    }
}
