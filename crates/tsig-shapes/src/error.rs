//! Error types for shape validation, tessellation and output.

use thiserror::Error;

/// Result type alias using [`ShapeError`].
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Errors that abort a shape generation call.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// A surface extent is not swept by a whole number of tiles.
    #[error("tile {pitch_name} of {pitch} is not an integer multiple of a {extent_name} of {extent}")]
    NotIntegerMultiple {
        /// Which tile pitch was used, e.g. "width".
        pitch_name: &'static str,
        /// The tile pitch.
        pitch: f64,
        /// Which extent was swept, e.g. "cube depth".
        extent_name: &'static str,
        /// The extent.
        extent: f64,
    },

    /// A tile does not fit on a circle of the given radius.
    #[error("tile {pitch_name} of {pitch} does not fit on a radius of {radius}")]
    TileTooLarge {
        /// Which tile pitch was used.
        pitch_name: &'static str,
        /// The tile pitch.
        pitch: f64,
        /// The surface radius.
        radius: f64,
    },

    /// The cap's outermost row of tiles would reach or cross the pole.
    #[error("{rows} rows of {theta_step} rad reach the pole; reduce thetaMaxAngle or the tile height")]
    ReachesPole {
        /// Number of rows needed to cover the inclination range.
        rows: usize,
        /// Inclination pitch of one row.
        theta_step: f64,
    },

    /// A configuration value is out of range.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name as it appears in the configuration file.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// Writing to an output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the tile layout failed.
    #[error("failed to encode tile layout: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ShapeError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        ShapeError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Reject non-finite or non-positive lengths.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::invalid_param(name, value, "must be a positive number"))
    }
}

/// Reject zero pixel counts.
pub(crate) fn require_pixels(name: &'static str, value: u32) -> Result<()> {
    if value == 0 {
        Err(ShapeError::invalid_param(name, value, "must be at least one pixel"))
    } else {
        Ok(())
    }
}

/// Narrow a pixel extent to `u32`.
pub(crate) fn pixels(name: &'static str, value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| ShapeError::invalid_param(name, value, "atlas too large"))
}

/// Pixel extent of `tiles` tiles that are `size` pixels each.
pub(crate) fn tile_span(name: &'static str, tiles: usize, size: u32) -> Result<u32> {
    u64::try_from(tiles)
        .ok()
        .and_then(|tiles| tiles.checked_mul(u64::from(size)))
        .ok_or_else(|| ShapeError::invalid_param(name, tiles, "atlas too large"))
        .and_then(|value| pixels(name, value))
}
