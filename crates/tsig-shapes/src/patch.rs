//! The unit of tessellation output and the sinks that consume it.
//!
//! Each engine emits one [`Patch`] per tile. A sink receives the mesh quad,
//! its UV quad and its pixel rectangle in a single call, which is what keeps
//! face `i` and tile `i` describing the same piece of surface.

use glam::{DVec2, DVec3};

use crate::layout::{AtlasSize, Tile, TileLayout};
use crate::mesh::MeshDocument;

/// One tile of surface: four 3D corners, four texture coordinates, one
/// pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Patch {
    /// Corner positions in winding order.
    pub corners: [DVec3; 4],
    /// Texture coordinates matching `corners` one-to-one.
    pub uvs: [DVec2; 4],
    /// Pixel rectangle in the flat atlas.
    pub tile: Tile,
}

/// Receives the patches of a tessellation, in order.
pub trait PatchSink {
    /// Called once, before the first patch, with the final atlas size.
    fn begin(&mut self, atlas: AtlasSize);

    /// Called once per tile.
    fn emit(&mut self, patch: Patch);
}

/// A finished tessellation: the mesh and the tile layout built in lockstep.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tessellation {
    /// Mesh faces, one per patch.
    pub mesh: MeshDocument,
    /// Tile rectangles, one per patch.
    pub layout: TileLayout,
}

impl Tessellation {
    /// Creates an empty tessellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of patches emitted.
    pub fn len(&self) -> usize {
        self.mesh.face_count()
    }

    /// Returns true if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.mesh.face_count() == 0
    }
}

impl PatchSink for Tessellation {
    fn begin(&mut self, atlas: AtlasSize) {
        self.layout.set_atlas(atlas);
    }

    fn emit(&mut self, patch: Patch) {
        self.mesh.push_quad(patch.corners, patch.uvs);
        self.layout.push(patch.tile);
        debug_assert_eq!(self.mesh.face_count(), self.layout.len());
    }
}
