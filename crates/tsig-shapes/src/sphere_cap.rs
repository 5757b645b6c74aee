//! Spherical cap tessellation with per-row drift correction.
//!
//! The cap is centred on the +X axis (inclination π/2, azimuth 0) and is cut
//! into rows of constant inclination pitch, working outward from the equator
//! towards both poles. Within a row, keeping a tile's chord equal to its
//! physical width needs an azimuth step of `chord / sin θ`, which differs
//! between a row's near (equator-side) and far (pole-side) edge. Laid flat,
//! a tile therefore leans sideways a little more with every column.
//!
//! Two passes keep the flat atlas rectangular and gap free:
//!
//! 1. [`SphereCapConfig::plan`] walks every row first, converts the lean of
//!    that row into a whole-pixel `shift`, and pads the atlas width so that the
//!    widest sheared row still fits.
//! 2. Emission splits each cell into `shift + 1` horizontal strips. Strip `i`
//!    is pushed outward by `(shift - i)·(1 + 2·column)` pixels; the last strip
//!    absorbs the rounding remainder of the cell height. 3D corners are
//!    interpolated linearly between the cell's near and far edge.
//!
//! The four quadrants (upper/lower half × increasing/decreasing azimuth)
//! share each row's plan and differ only in sign.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DVec2, DVec3};
use tracing::debug;
use tsig_math::{chord_angle, polar_to_cartesian, step_count};

use crate::config::SphereCapConfig;
use crate::error::{
    Result, ShapeError, pixels, require_pixels, require_positive, tile_span,
};
use crate::layout::{AtlasSize, Tile};
use crate::patch::{Patch, PatchSink};
use crate::registry::ShapeKind;
use crate::shape::Shape;

/// Which side of the equator a quadrant covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hemisphere {
    /// Inclination decreasing from π/2; texture `v` increasing from 0.5.
    Upper,
    /// Inclination increasing from π/2; texture `v` decreasing from 0.5.
    Lower,
}

impl Hemisphere {
    fn sign(self) -> f64 {
        match self {
            Hemisphere::Upper => 1.0,
            Hemisphere::Lower => -1.0,
        }
    }
}

/// Direction of the azimuth sweep within a quadrant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sweep {
    /// Azimuth increasing from zero; texture `u` decreasing from 0.5.
    Increasing,
    /// Azimuth decreasing from zero; texture `u` increasing from 0.5.
    Decreasing,
}

impl Sweep {
    fn sign(self) -> f64 {
        match self {
            Sweep::Increasing => 1.0,
            Sweep::Decreasing => -1.0,
        }
    }
}

/// Emission order of the quadrants within one hemisphere.
pub const SWEEPS: [Sweep; 2] = [Sweep::Increasing, Sweep::Decreasing];

/// Emission order of the hemispheres.
pub const HEMISPHERES: [Hemisphere; 2] = [Hemisphere::Upper, Hemisphere::Lower];

/// Quantities of one row, shared by all four quadrants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapRow {
    /// Row number counted outward from the equator.
    pub index: usize,
    /// Azimuth step at the row's equator-side edge.
    pub near_step: f64,
    /// Azimuth step at the row's pole-side edge; also the column pitch.
    pub far_step: f64,
    /// Cells per quadrant in this row.
    pub columns: usize,
    /// Whole-pixel lean of the row; each cell becomes `shift + 1` strips.
    pub shift: u32,
}

impl CapRow {
    /// Height in pixels of every strip except the last.
    pub fn strip_height(&self, dy: u32) -> u32 {
        dy / (self.shift + 1)
    }

    /// Height in pixels of the last strip of a cell.
    pub fn remainder_height(&self, dy: u32) -> u32 {
        dy - self.shift * self.strip_height(dy)
    }

    /// Patches emitted per cell.
    pub fn strips(&self) -> usize {
        self.shift as usize + 1
    }
}

/// Result of the pre-scan: row geometry and the final atlas.
#[derive(Clone, Debug, PartialEq)]
pub struct CapPlan {
    /// Inclination covered by one row.
    pub theta_step: f64,
    /// Azimuth step at the equator.
    pub base_step: f64,
    /// Tile columns per half of the unpadded atlas.
    pub half_columns: usize,
    /// Pixels added on each side of the atlas to absorb the row lean.
    pub padding: u32,
    /// Final atlas size.
    pub atlas: AtlasSize,
    /// One entry per row, equator first.
    pub rows: Vec<CapRow>,
}

impl CapPlan {
    /// Total number of patches the cap emits.
    pub fn patch_count(&self) -> usize {
        let per_quadrant: usize = self.rows.iter().map(|r| r.columns * r.strips()).sum();
        per_quadrant * HEMISPHERES.len() * SWEEPS.len()
    }
}

impl SphereCapConfig {
    fn check_parameters(&self) -> Result<()> {
        require_positive("tileWidth", self.tile_width)?;
        require_positive("tileHeight", self.tile_height)?;
        require_positive("radius", self.radius)?;
        require_positive("thetaMaxAngle", self.theta_max)?;
        require_positive("azimuthMaxAngle", self.azimuth_max)?;
        if self.azimuth_max > PI {
            return Err(ShapeError::invalid_param(
                "azimuthMaxAngle",
                self.azimuth_max,
                "must not exceed pi",
            ));
        }
        require_pixels("dx", self.dx)?;
        require_pixels("dy", self.dy)
    }

    /// Whole-pixel lean of a row whose edges sit at `sin_near` and `sin_far`.
    fn row_shift(&self, near_step: f64, far_step: f64, sin_near: f64) -> u32 {
        let drift = 2.0 * self.radius * ((far_step - near_step) / 2.0).sin() * sin_near;
        let shift = (drift / (self.tile_width / self.dx as f64)) as u32 / 2;
        // Keep at least one pixel row per strip.
        shift.min(self.dy - 1)
    }

    /// Validate and run the pre-scan.
    pub fn plan(&self) -> Result<CapPlan> {
        self.check_parameters()?;

        let theta_step =
            chord_angle(self.tile_height, self.radius).ok_or(ShapeError::TileTooLarge {
                pitch_name: "height",
                pitch: self.tile_height,
                radius: self.radius,
            })?;
        let base_step =
            chord_angle(self.tile_width, self.radius).ok_or(ShapeError::TileTooLarge {
                pitch_name: "width",
                pitch: self.tile_width,
                radius: self.radius,
            })?;

        let row_count = step_count(self.theta_max, theta_step);
        if row_count as f64 * theta_step >= FRAC_PI_2 {
            return Err(ShapeError::ReachesPole {
                rows: row_count,
                theta_step,
            });
        }
        let half_columns = step_count(self.azimuth_max, base_step);

        let dx = u64::from(self.dx);
        let mut widest = 0_u64;
        let rows: Vec<CapRow> = (0..row_count)
            .map(|index| {
                let near = FRAC_PI_2 - index as f64 * theta_step;
                let far = near - theta_step;
                let near_step = base_step / near.sin();
                let far_step = base_step / far.sin();
                let shift = self.row_shift(near_step, far_step, near.sin());
                let columns = step_count(self.azimuth_max, far_step);

                // Outermost pixel reached by this row's sheared strips.
                widest = widest.max(columns as u64 * (dx + 2 * u64::from(shift)));
                CapRow {
                    index,
                    near_step,
                    far_step,
                    columns,
                    shift,
                }
            })
            .collect();

        let half_width = half_columns as u64 * dx;
        let padding = widest.saturating_sub(half_width);
        let atlas = AtlasSize::new(
            pixels("dx", 2 * (half_width + padding))?,
            tile_span("dy", row_count.saturating_mul(2), self.dy)?,
        );
        debug!(
            rows = row_count,
            half_columns,
            padding,
            width = atlas.width,
            height = atlas.height,
            "sphere cap pre-scan"
        );

        Ok(CapPlan {
            theta_step,
            base_step,
            half_columns,
            padding: pixels("dx", padding)?,
            atlas,
            rows,
        })
    }

    /// Emit the strips of one cell.
    fn emit_cell<S: PatchSink>(
        &self,
        plan: &CapPlan,
        row: &CapRow,
        hemisphere: Hemisphere,
        sweep: Sweep,
        column: usize,
        sink: &mut S,
    ) {
        let sv = hemisphere.sign();
        let sa = sweep.sign();
        let r = self.radius;
        let width = plan.atlas.width as f64;
        let height = plan.atlas.height as f64;

        let theta_near = FRAC_PI_2 - sv * row.index as f64 * plan.theta_step;
        let theta_far = theta_near - sv * plan.theta_step;
        let az = sa * column as f64 * row.far_step;

        let near_left = polar_to_cartesian(r, theta_near, az);
        let near_right = polar_to_cartesian(r, theta_near, az + sa * row.near_step);
        let far_right = polar_to_cartesian(r, theta_far, az + sa * row.far_step);
        let far_left = polar_to_cartesian(r, theta_far, az);

        let strip = row.strip_height(self.dy);
        let fraction = strip as f64 / self.dy as f64;
        let left_step: DVec3 = (far_left - near_left) * fraction;
        let right_step: DVec3 = (far_right - near_right) * fraction;

        let u_tile = self.dx as f64 / width;
        let u_pixel = 1.0 / width;
        let v_strip = strip as f64 / height;
        let v_row = 0.5 + sv * row.index as f64 * (self.dy as f64 / height);
        let u_base = 0.5 + sa * column as f64 * u_tile;
        let radial = 2 * column as u64;

        let strip_uvs = |offset: f64, v_near: f64, v_far: f64| {
            let u_left = 1.0 - (u_base + offset);
            let u_right = 1.0 - (u_base + sa * u_tile + offset);
            [
                DVec2::new(u_left, v_near),
                DVec2::new(u_right, v_near),
                DVec2::new(u_right, v_far),
                DVec2::new(u_left, v_far),
            ]
        };

        let mut left = near_left;
        let mut right = near_right;
        for i in 0..row.shift {
            let pos = u64::from(row.shift - i);
            let offset = sa * (pos * (1 + radial)) as f64 * u_pixel;
            let v_near = v_row + sv * f64::from(i) * v_strip;
            let v_far = v_row + sv * f64::from(i + 1) * v_strip;
            let uvs = strip_uvs(offset, v_near, v_far);

            let next_left = left + left_step;
            let next_right = right + right_step;
            sink.emit(Patch {
                corners: [left, right, next_right, next_left],
                uvs,
                tile: Tile::from_uv(&uvs, plan.atlas, self.dx, strip),
            });
            left = next_left;
            right = next_right;
        }

        let v_near = v_row + sv * f64::from(row.shift) * v_strip;
        let v_far = v_row + sv * (self.dy as f64 / height);
        let uvs = strip_uvs(0.0, v_near, v_far);
        sink.emit(Patch {
            corners: [left, right, far_right, far_left],
            uvs,
            tile: Tile::from_uv(&uvs, plan.atlas, self.dx, row.remainder_height(self.dy)),
        });
    }
}

impl Shape for SphereCapConfig {
    fn kind(&self) -> ShapeKind {
        ShapeKind::SphereCap
    }

    fn validate(&self) -> Result<()> {
        self.plan().map(|_| ())
    }

    fn tessellate_into<S: PatchSink>(&self, sink: &mut S) -> Result<AtlasSize> {
        let plan = self.plan()?;
        sink.begin(plan.atlas);

        for hemisphere in HEMISPHERES {
            for row in &plan.rows {
                debug!(
                    ?hemisphere,
                    row = row.index,
                    columns = row.columns,
                    shift = row.shift,
                    "sweeping sphere cap row"
                );
                for sweep in SWEEPS {
                    for column in 0..row.columns {
                        self.emit_cell(&plan, row, hemisphere, sweep, column, sink);
                    }
                }
            }
        }
        Ok(plan.atlas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Tessellation;

    fn cap() -> SphereCapConfig {
        SphereCapConfig {
            tile_width: 1.0,
            tile_height: 1.0,
            radius: 10.0,
            theta_max: 0.5,
            azimuth_max: 0.5,
            dx: 100,
            dy: 100,
        }
    }

    /// Walks the tiles of a tessellation cell by cell, in emission order.
    fn cells<'a>(plan: &'a CapPlan, t: &'a Tessellation) -> Vec<(&'a CapRow, &'a [Tile])> {
        let mut out = Vec::new();
        let mut at = 0;
        for _ in HEMISPHERES {
            for row in &plan.rows {
                for _ in 0..SWEEPS.len() * row.columns {
                    out.push((row, &t.layout.tiles()[at..at + row.strips()]));
                    at += row.strips();
                }
            }
        }
        assert_eq!(at, t.layout.len());
        out
    }

    #[test]
    fn test_lean_grows_away_from_equator() {
        let plan = cap().plan().unwrap();
        assert_eq!(plan.rows.len(), 5);
        assert_eq!(plan.rows[0].shift, 0);
        assert!(plan.rows.last().unwrap().shift > 0);
        for pair in plan.rows.windows(2) {
            assert!(pair[1].shift >= pair[0].shift);
            assert!(pair[1].far_step > pair[0].far_step);
        }
    }

    #[test]
    fn test_padding_covers_widest_row() {
        let config = cap();
        let plan = config.plan().unwrap();
        let half = plan.half_columns as u64 * 100 + u64::from(plan.padding);
        for row in &plan.rows {
            assert!(row.columns as u64 * (100 + 2 * u64::from(row.shift)) <= half);
        }
        assert_eq!(u64::from(plan.atlas.width), 2 * half);
        assert_eq!(plan.atlas.height, 2 * 5 * 100);
    }

    #[test]
    fn test_patch_count_matches_plan() {
        let config = cap();
        let plan = config.plan().unwrap();
        let t = config.tessellate().unwrap();
        assert_eq!(t.len(), plan.patch_count());
        assert_eq!(t.layout.len(), t.mesh.face_count());
    }

    #[test]
    fn test_strip_heights_sum_to_tile_height() {
        let config = cap();
        let plan = config.plan().unwrap();
        let t = config.tessellate().unwrap();
        for (row, tiles) in cells(&plan, &t) {
            let total: u32 = tiles.iter().map(|tile| tile.height).sum();
            assert_eq!(total, config.dy, "row {} cell heights {tiles:?}", row.index);
        }
    }

    #[test]
    fn test_strips_of_a_cell_stack_without_gaps() {
        let config = cap();
        let plan = config.plan().unwrap();
        let t = config.tessellate().unwrap();
        for (_, tiles) in cells(&plan, &t) {
            let top = tiles.iter().map(|tile| tile.y).min().unwrap();
            let bottom = tiles.iter().map(Tile::bottom).max().unwrap();
            assert_eq!(bottom - top, i64::from(config.dy));
            for pair in tiles.windows(2) {
                let touching = pair[0].y == pair[1].bottom() || pair[1].y == pair[0].bottom();
                assert!(touching, "strips {pair:?} do not touch");
            }
        }
    }

    #[test]
    fn test_every_tile_inside_padded_atlas() {
        for config in [
            cap(),
            SphereCapConfig {
                azimuth_max: PI,
                theta_max: 1.2,
                ..cap()
            },
            SphereCapConfig {
                dx: 7,
                dy: 3,
                ..cap()
            },
        ] {
            let t = config.tessellate().unwrap();
            let atlas = t.layout.atlas();
            for tile in t.layout.tiles() {
                assert!(tile.fits(atlas), "{tile:?} outside {atlas:?}");
                assert!(tile.height >= 1);
            }
        }
    }

    #[test]
    fn test_hemispheres_mirror_about_atlas_middle() {
        let config = cap();
        let t = config.tessellate().unwrap();
        let half = t.len() / 2;
        let height = i64::from(t.layout.atlas().height);
        let (upper, lower) = t.layout.tiles().split_at(half);
        for (u, l) in upper.iter().zip(lower) {
            assert_eq!(u.x, l.x);
            assert_eq!(u.height, l.height);
            assert_eq!(u.bottom(), height - l.y);
        }
    }

    #[test]
    fn test_sweeps_mirror_about_atlas_centre() {
        let config = cap();
        let plan = config.plan().unwrap();
        let t = config.tessellate().unwrap();
        let width = i64::from(plan.atlas.width);
        let row = &plan.rows[0];
        let per_sweep = row.columns * row.strips();
        let tiles = t.layout.tiles();
        for k in 0..per_sweep {
            let inc = tiles[k];
            let dec = tiles[per_sweep + k];
            assert_eq!(inc.y, dec.y);
            assert_eq!(inc.right(), width - dec.x);
        }
    }

    #[test]
    fn test_corners_stay_on_or_inside_sphere() {
        let config = cap();
        let plan = config.plan().unwrap();
        let t = config.tessellate().unwrap();
        // Interpolated corners sit on chords spanning less than two row pitches.
        let inner = config.radius * plan.theta_step.cos();
        for v in t.mesh.vertices() {
            let len = v.length();
            assert!(len <= config.radius + 1e-9, "{v:?}");
            assert!(len >= inner, "{v:?} is {len}");
            assert!(v.x > 0.0);
        }
    }

    #[test]
    fn test_no_lean_means_one_patch_per_cell() {
        let config = SphereCapConfig {
            dx: 2,
            dy: 2,
            ..cap()
        };
        let plan = config.plan().unwrap();
        assert!(plan.rows.iter().all(|r| r.shift == 0));
        assert_eq!(plan.padding, 0);
        let cells: usize = plan.rows.iter().map(|r| r.columns).sum();
        assert_eq!(config.tessellate().unwrap().len(), 4 * cells);
    }

    #[test]
    fn test_tile_larger_than_diameter_rejected() {
        let config = SphereCapConfig {
            tile_width: 20.0,
            ..cap()
        };
        assert!(matches!(
            config.validate(),
            Err(ShapeError::TileTooLarge { pitch_name: "width", .. })
        ));
    }

    #[test]
    fn test_cap_reaching_pole_rejected() {
        let config = SphereCapConfig {
            theta_max: 1.6,
            ..cap()
        };
        assert!(matches!(
            config.validate(),
            Err(ShapeError::ReachesPole { .. })
        ));
    }

    #[test]
    fn test_azimuth_beyond_pi_rejected() {
        let config = SphereCapConfig {
            azimuth_max: 3.5,
            ..cap()
        };
        assert!(matches!(
            config.validate(),
            Err(ShapeError::InvalidParameter {
                name: "azimuthMaxAngle",
                ..
            })
        ));
    }
}
