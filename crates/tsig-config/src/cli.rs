//! Command-line argument parsing for the tile generator.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::ConfigError;

/// Which artifacts to produce.
#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Build the OBJ mesh and the TSIG layout (default).
    #[default]
    Both,
    /// Build only the OBJ mesh.
    Obj,
    /// Build only the TSIG layout.
    Tsig,
    /// List the shape names that can be generated.
    List,
}

impl Command {
    /// Whether `<stem>.obj` is written.
    pub fn writes_mesh(self) -> bool {
        matches!(self, Command::Both | Command::Obj)
    }

    /// Whether `<stem>.json` is written.
    pub fn writes_layout(self) -> bool {
        matches!(self, Command::Both | Command::Tsig)
    }
}

/// Tile generator command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "tsig-gen", about = "TSIG and OBJ builder", version)]
pub struct CliArgs {
    /// What to build; both artifacts when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// The shape file (.ron or .json).
    #[arg(long, global = true)]
    pub conf: Option<PathBuf>,

    /// Output path without extension.
    #[arg(long, global = true, default_value = "./output")]
    pub output_file: PathBuf,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// The selected command, defaulting to [`Command::Both`].
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }

    /// The shape file, which every command except `list` needs.
    pub fn config_path(&self) -> Result<&Path, ConfigError> {
        self.conf.as_deref().ok_or(ConfigError::MissingConfigPath)
    }

    /// Where the OBJ mesh goes.
    pub fn mesh_path(&self) -> PathBuf {
        self.output_with_suffix(".obj")
    }

    /// Where the TSIG layout goes.
    pub fn layout_path(&self) -> PathBuf {
        self.output_with_suffix(".json")
    }

    /// The output stem with `suffix` appended; dots in the stem are kept.
    fn output_with_suffix(&self, suffix: &str) -> PathBuf {
        let mut path = self.output_file.as_os_str().to_os_string();
        path.push(suffix);
        PathBuf::from(path)
    }
}
