//! Coordinate conversions and chord-angle helpers shared by every display surface.

mod chord;
mod conversion;

pub use chord::{STEP_TOLERANCE, chord_angle, step_count};
pub use conversion::{
    Cylindrical, cylindrical_to_cartesian, distance, polar_to_cartesian, polar_to_cylindrical,
};
