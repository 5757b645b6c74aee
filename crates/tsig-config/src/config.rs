//! Loading shape files from disk.

use std::path::Path;

use tsig_shapes::{ConfigFormat, ShapeConfig, ShapeRegistry};

use crate::error::ConfigError;

/// Pick the encoding of a shape file from its extension.
pub fn format_for_path(path: &Path) -> Result<ConfigFormat, ConfigError> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ConfigFormat::from_extension)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))
}

/// Decode shape-file text with an already known encoding.
pub fn parse_shape(
    registry: &ShapeRegistry,
    format: ConfigFormat,
    text: &str,
) -> Result<ShapeConfig, ConfigError> {
    Ok(registry.decode(format, text)?)
}

/// Read and decode the shape file at `path`.
pub fn load_shape_file(path: &Path, registry: &ShapeRegistry) -> Result<ShapeConfig, ConfigError> {
    let format = format_for_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let shape = parse_shape(registry, format, &text)?;
    log::info!("Loaded {} config from {}", shape.kind(), path.display());
    Ok(shape)
}
