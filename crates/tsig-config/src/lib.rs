//! Command-line and shape-file handling for the tile generator.
//!
//! Shape files are RON or JSON documents carrying a `shape` name plus that
//! shape's parameters. The file extension picks the encoding; the shape
//! registry picks the parameter type.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, Command};
pub use config::{format_for_path, load_shape_file, parse_shape};
pub use error::ConfigError;
