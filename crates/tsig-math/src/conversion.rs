//! Spherical, cylindrical and cartesian coordinate conversions.
//!
//! Angles are in radians. Spherical coordinates use the physics convention:
//! `theta` is the inclination measured from +Z and `phi` the azimuth measured
//! from +X towards +Y.

use glam::DVec3;

/// A point in cylindrical coordinates around the Z axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cylindrical {
    /// Distance from the Z axis.
    pub radius: f64,
    /// Position along the Z axis.
    pub height: f64,
    /// Angle around the Z axis, from +X towards +Y.
    pub azimuth: f64,
}

impl Cylindrical {
    /// Convert to a cartesian point.
    #[inline]
    #[must_use]
    pub fn to_cartesian(self) -> DVec3 {
        cylindrical_to_cartesian(self.radius, self.height, self.azimuth)
    }
}

/// Convert spherical `(r, theta, phi)` to cartesian XYZ.
#[inline]
#[must_use]
pub fn polar_to_cartesian(r: f64, theta: f64, phi: f64) -> DVec3 {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    DVec3::new(r * sin_theta * cos_phi, r * sin_theta * sin_phi, r * cos_theta)
}

/// Convert spherical `(r, theta, phi)` to cylindrical coordinates.
#[inline]
#[must_use]
pub fn polar_to_cylindrical(r: f64, theta: f64, phi: f64) -> Cylindrical {
    Cylindrical {
        radius: r * theta.sin(),
        height: r * theta.cos(),
        azimuth: phi,
    }
}

/// Convert cylindrical `(r, z, azimuth)` to cartesian XYZ.
#[inline]
#[must_use]
pub fn cylindrical_to_cartesian(r: f64, z: f64, azimuth: f64) -> DVec3 {
    let (sin_az, cos_az) = azimuth.sin_cos();
    DVec3::new(r * cos_az, r * sin_az, z)
}

/// Straight-line distance between two points.
#[inline]
#[must_use]
pub fn distance(a: DVec3, b: DVec3) -> f64 {
    a.distance(b)
}
