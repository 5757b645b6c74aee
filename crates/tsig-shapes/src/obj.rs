//! Wavefront OBJ output.
//!
//! Faces are written as independent quads: four `v` lines, four `vt` lines,
//! then one `f` line with 1-based `vertex/texcoord` pairs.

use std::io::Write;

use crate::mesh::MeshDocument;

/// Write `mesh` as OBJ text, prefixed by a comment naming the shape.
pub fn write_obj<W: Write>(mesh: &MeshDocument, kind: &str, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "# {kind}: {} faces", mesh.face_count())?;
    for face in 0..mesh.face_count() {
        for v in mesh.face_corners(face) {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for vt in mesh.face_uvs(face) {
            writeln!(out, "vt {} {}", vt.x, vt.y)?;
        }
        let [a, b, c, d] = mesh.faces()[face].vertices.map(|i| i + 1);
        let [ta, tb, tc, td] = mesh.faces()[face].tex_coords.map(|i| i + 1);
        writeln!(out, "f {a}/{ta} {b}/{tb} {c}/{tc} {d}/{td}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use glam::{DVec2, DVec3};

    use super::*;

    #[test]
    fn test_two_faces_use_one_based_indices() {
        let mut mesh = MeshDocument::new();
        let corners = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y];
        let uvs = [DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y];
        mesh.push_quad(corners, uvs);
        mesh.push_quad(corners, uvs);

        let mut buf = Vec::new();
        write_obj(&mesh, "cube", &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# cube: 2 faces");
        assert_eq!(lines[1], "v 0 0 0");
        assert_eq!(lines[5], "vt 0 0");
        assert_eq!(lines[9], "f 1/1 2/2 3/3 4/4");
        assert_eq!(lines[18], "f 5/5 6/6 7/7 8/8");
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 8);
        assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 8);
    }

    #[test]
    fn test_empty_mesh_writes_header_only() {
        let mut buf = Vec::new();
        write_obj(&MeshDocument::new(), "curve", &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "# curve: 0 faces\n");
    }
}
