//! Immutable per-surface configuration records.
//!
//! Field names serialize in camelCase so that existing shape files
//! (`tileWidth`, `cylinderRadius`, `thetaMaxAngle`, ...) decode unchanged.
//! All lengths share one physical unit; all angles are radians.

use serde::{Deserialize, Serialize};

use crate::registry::ShapeKind;

/// An open-fronted box: left, right, back, top and bottom walls.
///
/// Axes: X runs front to back (depth), Y runs across (width), Z runs up (height).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CubeConfig {
    /// Physical tile width.
    pub tile_width: f64,
    /// Physical tile height.
    pub tile_height: f64,
    /// Extent along Y.
    pub cube_width: f64,
    /// Extent along Z.
    pub cube_height: f64,
    /// Extent along X.
    pub cube_depth: f64,
    /// Horizontal pixels per tile.
    pub dx: u32,
    /// Vertical pixels per tile.
    pub dy: u32,
}

/// A segment of a cylindrical wall centred on the origin, standing on Z = 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveConfig {
    /// Physical tile width (chord length along the wall).
    pub tile_width: f64,
    /// Physical tile height.
    pub tile_height: f64,
    /// Radius of the wall.
    #[serde(rename = "cylinderRadius")]
    pub radius: f64,
    /// Height of the wall.
    #[serde(rename = "cylinderHeight")]
    pub height: f64,
    /// Azimuth swept on each side of +X; the wall spans twice this angle.
    #[serde(rename = "azimuthMaxAngle")]
    pub azimuth_max: f64,
    /// Horizontal pixels per tile.
    pub dx: u32,
    /// Vertical pixels per tile.
    pub dy: u32,
}

/// A spherical cap centred on +X (inclination π/2, azimuth 0).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SphereCapConfig {
    /// Physical tile width.
    pub tile_width: f64,
    /// Physical tile height.
    pub tile_height: f64,
    /// Sphere radius.
    pub radius: f64,
    /// Inclination swept above and below the equator.
    #[serde(rename = "thetaMaxAngle")]
    pub theta_max: f64,
    /// Azimuth swept on each side of +X, at most π.
    #[serde(rename = "azimuthMaxAngle")]
    pub azimuth_max: f64,
    /// Horizontal pixels per tile.
    pub dx: u32,
    /// Vertical pixels per tile.
    pub dy: u32,
}

/// A validated-on-use description of one display surface.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeConfig {
    /// Open-fronted box.
    Cube(CubeConfig),
    /// Cylindrical wall segment.
    Curve(CurveConfig),
    /// Spherical cap.
    SphereCap(SphereCapConfig),
}

impl ShapeConfig {
    /// Which registered shape this configuration describes.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Cube(_) => ShapeKind::Cube,
            Self::Curve(_) => ShapeKind::Curve,
            Self::SphereCap(_) => ShapeKind::SphereCap,
        }
    }
}

impl From<CubeConfig> for ShapeConfig {
    fn from(config: CubeConfig) -> Self {
        Self::Cube(config)
    }
}

impl From<CurveConfig> for ShapeConfig {
    fn from(config: CurveConfig) -> Self {
        Self::Curve(config)
    }
}

impl From<SphereCapConfig> for ShapeConfig {
    fn from(config: SphereCapConfig) -> Self {
        Self::SphereCap(config)
    }
}
