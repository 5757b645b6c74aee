//! The contract every display surface implements.

use std::io::Write;

use tracing::info;

use crate::config::ShapeConfig;
use crate::error::Result;
use crate::layout::AtlasSize;
use crate::obj::write_obj;
use crate::patch::{PatchSink, Tessellation};
use crate::registry::ShapeKind;
use crate::tsig::write_tsig;

/// What a successful [`Shape::generate`] produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerateSummary {
    /// The generated shape.
    pub kind: ShapeKind,
    /// Number of mesh faces, equal to the number of tiles.
    pub faces: usize,
    /// Flat atlas size.
    pub atlas: AtlasSize,
}

/// A surface that can be cut into tiles.
pub trait Shape {
    /// Registry entry for this surface.
    fn kind(&self) -> ShapeKind;

    /// Check the geometric preconditions of the configuration.
    fn validate(&self) -> Result<()>;

    /// Validate, then stream every tile into `sink` in emission order.
    ///
    /// The atlas size is passed to [`PatchSink::begin`] before the first
    /// patch and returned on success.
    fn tessellate_into<S: PatchSink>(&self, sink: &mut S) -> Result<AtlasSize>;

    /// Short name used in shape files, e.g. `"cube"`.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Tessellate into a fresh mesh and tile layout.
    fn tessellate(&self) -> Result<Tessellation> {
        let mut tessellation = Tessellation::new();
        self.tessellate_into(&mut tessellation)?;
        Ok(tessellation)
    }

    /// Write the OBJ mesh to `mesh_out` and the TSIG layout to `layout_out`.
    ///
    /// The whole tessellation is built before either sink is touched, so an
    /// invalid configuration never produces partial output. A write failure
    /// aborts immediately; whatever reached the sinks must then be discarded.
    fn generate<M: Write, L: Write>(
        &self,
        mesh_out: &mut M,
        layout_out: &mut L,
    ) -> Result<GenerateSummary> {
        let tessellation = self.tessellate()?;
        write_obj(&tessellation.mesh, self.name(), mesh_out)?;
        write_tsig(&tessellation.layout, layout_out)?;

        let summary = GenerateSummary {
            kind: self.kind(),
            faces: tessellation.len(),
            atlas: tessellation.layout.atlas(),
        };
        info!(
            shape = self.name(),
            faces = summary.faces,
            "Generated {}x{} atlas",
            summary.atlas.width,
            summary.atlas.height
        );
        Ok(summary)
    }
}

impl Shape for ShapeConfig {
    fn kind(&self) -> ShapeKind {
        ShapeConfig::kind(self)
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Cube(cube) => cube.validate(),
            Self::Curve(curve) => curve.validate(),
            Self::SphereCap(cap) => cap.validate(),
        }
    }

    fn tessellate_into<S: PatchSink>(&self, sink: &mut S) -> Result<AtlasSize> {
        match self {
            Self::Cube(cube) => cube.tessellate_into(sink),
            Self::Curve(curve) => curve.tessellate_into(sink),
            Self::SphereCap(cap) => cap.tessellate_into(sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::config::CubeConfig;
    use crate::error::ShapeError;

    fn cube() -> ShapeConfig {
        ShapeConfig::Cube(CubeConfig {
            tile_width: 1.0,
            tile_height: 1.0,
            cube_width: 2.0,
            cube_height: 2.0,
            cube_depth: 1.0,
            dx: 10,
            dy: 10,
        })
    }

    /// A sink that accepts `budget` bytes and then fails.
    struct FailingWriter {
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.len() > self.budget {
                return Err(io::Error::other("disk full"));
            }
            self.budget -= buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_generate_writes_both_artifacts() {
        let mut obj = Vec::new();
        let mut tsig = Vec::new();
        let summary = cube().generate(&mut obj, &mut tsig).unwrap();

        assert_eq!(summary.kind, ShapeKind::Cube);
        assert_eq!(summary.atlas, AtlasSize::new(40, 40));
        let obj = String::from_utf8(obj).unwrap();
        assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), summary.faces);
        let doc: serde_json::Value = serde_json::from_slice(&tsig).unwrap();
        assert_eq!(doc["tileLayout"].as_array().unwrap().len(), summary.faces);
    }

    #[test]
    fn test_discarded_sink_leaves_other_unchanged() {
        let mut both_obj = Vec::new();
        let mut both_tsig = Vec::new();
        cube().generate(&mut both_obj, &mut both_tsig).unwrap();

        let mut only_obj = Vec::new();
        cube().generate(&mut only_obj, &mut io::sink()).unwrap();
        let mut only_tsig = Vec::new();
        cube().generate(&mut io::sink(), &mut only_tsig).unwrap();

        assert_eq!(both_obj, only_obj);
        assert_eq!(both_tsig, only_tsig);
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let mut obj = FailingWriter { budget: 64 };
        let err = cube().generate(&mut obj, &mut io::sink()).unwrap_err();
        assert!(matches!(err, ShapeError::Io(_)), "{err:?}");
    }

    #[test]
    fn test_layout_write_failure_is_io_error() {
        let mut tsig = FailingWriter { budget: 64 };
        let err = cube().generate(&mut io::sink(), &mut tsig).unwrap_err();
        match err {
            ShapeError::Io(err) => assert_eq!(err.to_string(), "disk full"),
            other => panic!("Expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let mut bad = cube();
        if let ShapeConfig::Cube(c) = &mut bad {
            c.tile_width = 1.5;
        }
        let mut obj = Vec::new();
        let mut tsig = Vec::new();
        let err = bad.generate(&mut obj, &mut tsig).unwrap_err();
        assert!(matches!(err, ShapeError::NotIntegerMultiple { .. }));
        assert!(obj.is_empty());
        assert!(tsig.is_empty());
    }

    #[test]
    fn test_name_matches_kind() {
        assert_eq!(cube().name(), "cube");
    }
}
