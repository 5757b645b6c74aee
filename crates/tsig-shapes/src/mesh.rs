//! Append-only quad mesh with per-corner texture coordinates.

use glam::{DVec2, DVec3};

/// One quadrilateral face: four vertex indices and four texture-coordinate
/// indices, 0-based, in winding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    /// Indices into [`MeshDocument::vertices`].
    pub vertices: [usize; 4],
    /// Indices into [`MeshDocument::tex_coords`].
    pub tex_coords: [usize; 4],
}

/// The mesh side of a tessellation.
///
/// Every face owns its four corners: vertices are never shared between tiles,
/// so vertex and texture-coordinate indices both advance by four per face.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshDocument {
    vertices: Vec<DVec3>,
    tex_coords: Vec<DVec2>,
    faces: Vec<Face>,
}

impl MeshDocument {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one quad and returns its face index.
    pub fn push_quad(&mut self, corners: [DVec3; 4], uvs: [DVec2; 4]) -> usize {
        let base = self.vertices.len();
        let uv_base = self.tex_coords.len();
        self.vertices.extend_from_slice(&corners);
        self.tex_coords.extend_from_slice(&uvs);
        self.faces.push(Face {
            vertices: [base, base + 1, base + 2, base + 3],
            tex_coords: [uv_base, uv_base + 1, uv_base + 2, uv_base + 3],
        });
        self.faces.len() - 1
    }

    /// All vertex positions in emission order.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// All texture coordinates in emission order.
    pub fn tex_coords(&self) -> &[DVec2] {
        &self.tex_coords
    }

    /// All faces in emission order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The four corner positions of a face.
    pub fn face_corners(&self, face: usize) -> [DVec3; 4] {
        self.faces[face].vertices.map(|i| self.vertices[i])
    }

    /// The four texture coordinates of a face.
    pub fn face_uvs(&self, face: usize) -> [DVec2; 4] {
        self.faces[face].tex_coords.map(|i| self.tex_coords[i])
    }
}
