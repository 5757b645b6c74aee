//! Tile generator entry point.
//!
//! Reads a shape file, tessellates it, and writes `<stem>.obj` and/or
//! `<stem>.json` depending on the subcommand.
//!
//! Run with: `cargo run -p tsig-gen -- --conf room.ron --output-file out/room`

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tsig_config::{CliArgs, Command, ConfigError, load_shape_file};
use tsig_shapes::{GenerateSummary, Shape, ShapeError, ShapeRegistry};

#[derive(Debug, thiserror::Error)]
enum GenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("failed to print shape list: {0}")]
    List(#[source] io::Error),
}

/// An output file, or a sink when the artifact was not requested.
struct Output {
    path: Option<PathBuf>,
    writer: Box<dyn Write>,
}

impl Output {
    fn open(path: PathBuf, wanted: bool) -> Result<Self, GenError> {
        if !wanted {
            return Ok(Self {
                path: None,
                writer: Box::new(io::sink()),
            });
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| GenError::Create {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = File::create(&path).map_err(|source| GenError::Create {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path: Some(path),
            writer: Box::new(BufWriter::new(file)),
        })
    }

    /// Remove a partially written file.
    fn discard(self) {
        let Self { path, writer } = self;
        drop(writer);
        if let Some(path) = path
            && let Err(err) = std::fs::remove_file(&path)
        {
            warn!("could not remove partial output {}: {err}", path.display());
        }
    }
}

fn list_shapes(registry: &ShapeRegistry, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Available shapes are:")?;
    for entry in registry.iter() {
        writeln!(out, " - {}: {}", entry.name(), entry.description())?;
    }
    Ok(())
}

fn generate(
    conf: &Path,
    command: Command,
    args: &CliArgs,
    registry: &ShapeRegistry,
) -> Result<GenerateSummary, GenError> {
    let shape = load_shape_file(conf, registry)?;
    // Reject bad geometry before any output file is created.
    shape.validate()?;

    let mut mesh = Output::open(args.mesh_path(), command.writes_mesh())?;
    let mut layout = match Output::open(args.layout_path(), command.writes_layout()) {
        Ok(layout) => layout,
        Err(err) => {
            mesh.discard();
            return Err(err);
        }
    };

    match shape.generate(&mut mesh.writer, &mut layout.writer) {
        Ok(summary) => Ok(summary),
        Err(err) => {
            mesh.discard();
            layout.discard();
            Err(err.into())
        }
    }
}

fn run(args: &CliArgs) -> Result<(), GenError> {
    let registry = ShapeRegistry::builtin();
    let command = args.command();

    if command == Command::List {
        return list_shapes(&registry, &mut io::stdout().lock()).map_err(GenError::List);
    }

    let conf = args.config_path()?;
    let summary = generate(conf, command, args, &registry)?;
    info!("Generated {} object", summary.kind);
    if command.writes_mesh() {
        info!("Mesh written to {}", args.mesh_path().display());
    }
    if command.writes_layout() {
        info!("Layout written to {}", args.layout_path().display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    tsig_log::init_logging(args.log_level.as_deref());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP_RON: &str = r#"(
    shape: "spherecap",
    tileWidth: 1.0,
    tileHeight: 1.0,
    radius: 10.0,
    thetaMaxAngle: 0.5,
    azimuthMaxAngle: 0.5,
    dx: 100,
    dy: 100,
)"#;

    fn args(dir: &Path, command: &str, conf: &Path) -> CliArgs {
        let stem = dir.join("out").join("cap");
        CliArgs::try_parse_from([
            "tsig-gen",
            command,
            "--conf",
            conf.to_str().unwrap(),
            "--output-file",
            stem.to_str().unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_both_writes_two_files() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("cap.ron");
        std::fs::write(&conf, CAP_RON).unwrap();
        let args = args(dir.path(), "both", &conf);

        run(&args).unwrap();
        let obj = std::fs::read_to_string(args.mesh_path()).unwrap();
        let tsig = std::fs::read_to_string(args.layout_path()).unwrap();
        assert!(obj.starts_with("# spherecap:"));
        assert!(tsig.contains("\"tileLayout\""));
    }

    #[test]
    fn test_obj_only_skips_layout() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("cap.ron");
        std::fs::write(&conf, CAP_RON).unwrap();
        let args = args(dir.path(), "obj", &conf);

        run(&args).unwrap();
        assert!(args.mesh_path().exists());
        assert!(!args.layout_path().exists());
    }

    #[test]
    fn test_invalid_shape_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("cap.ron");
        std::fs::write(&conf, CAP_RON.replace("thetaMaxAngle: 0.5", "thetaMaxAngle: 1.6"))
            .unwrap();
        let args = args(dir.path(), "both", &conf);

        let err = run(&args).unwrap_err();
        assert!(matches!(err, GenError::Shape(ShapeError::ReachesPole { .. })));
        assert!(!args.mesh_path().exists());
        assert!(!args.layout_path().exists());
    }

    #[test]
    fn test_missing_conf_is_an_error() {
        let args = CliArgs::try_parse_from(["tsig-gen", "tsig"]).unwrap();
        assert!(matches!(
            run(&args),
            Err(GenError::Config(ConfigError::MissingConfigPath))
        ));
    }

    #[test]
    fn test_list_names_every_shape() {
        let mut out = Vec::new();
        list_shapes(&ShapeRegistry::builtin(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Available shapes are:"));
        for name in ["cube", "curve", "spherecap"] {
            assert!(text.contains(&format!(" - {name}: ")), "{text}");
        }
    }
}
