//! Configuration error types.

use std::path::PathBuf;

use tsig_shapes::RegistryError;

/// Errors that can occur when locating, reading, or decoding a shape file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No shape file was given on the command line.
    #[error("no configuration file given, pass one with --conf")]
    MissingConfigPath,

    /// Failed to read the shape file from disk.
    #[error("failed to read {}: {source}", path.display())]
    ReadError {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file extension names no supported encoding.
    #[error("unsupported config format for {}, expected .ron or .json", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The document could not be decoded as a registered shape.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
