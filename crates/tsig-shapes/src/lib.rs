//! Tile meshes and tile layouts for tiled display surfaces.
//!
//! A surface (cube interior, cylinder section or sphere cap) is cut into
//! quadrilateral tiles of a given physical size. Every tile becomes one face
//! of a Wavefront OBJ mesh and one pixel rectangle of a flat texture atlas,
//! written as a TSIG JSON document. Face `i` of the mesh and tile `i` of the
//! layout always describe the same patch of surface.

mod config;
mod cube;
mod curve;
mod error;
mod layout;
mod mesh;
mod obj;
mod patch;
mod registry;
mod shape;
mod sphere_cap;
mod tsig;

pub use config::{CubeConfig, CurveConfig, ShapeConfig, SphereCapConfig};
pub use curve::CurveGrid;
pub use error::{Result, ShapeError};
pub use layout::{AtlasSize, Tile, TileLayout};
pub use mesh::{Face, MeshDocument};
pub use obj::write_obj;
pub use patch::{Patch, PatchSink, Tessellation};
pub use registry::{ConfigFormat, RegistryError, ShapeEntry, ShapeKind, ShapeRegistry};
pub use shape::{GenerateSummary, Shape};
pub use sphere_cap::{CapPlan, CapRow, HEMISPHERES, Hemisphere, SWEEPS, Sweep};
pub use tsig::{Bounds, Dimensions, Positions, TileEntry, TsigDocument, Xy, write_tsig};
