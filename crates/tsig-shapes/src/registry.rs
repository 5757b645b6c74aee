//! Shape registry: maps the `shape` field of a configuration file to a
//! [`ShapeKind`] and decodes the rest of the file as that kind.
//!
//! The table is built explicitly by [`ShapeRegistry::builtin`]; nothing is
//! registered as a side effect of loading a module.

use std::collections::HashMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::{CubeConfig, CurveConfig, ShapeConfig, SphereCapConfig};

/// Every surface kind the engine can tessellate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Open-fronted box.
    Cube,
    /// Cylindrical wall segment.
    Curve,
    /// Spherical cap.
    SphereCap,
}

impl ShapeKind {
    /// All kinds in registration order.
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Cube, ShapeKind::Curve, ShapeKind::SphereCap];

    /// The value of the `shape` field selecting this kind.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Curve => "curve",
            ShapeKind::SphereCap => "spherecap",
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            ShapeKind::Cube => "An open faced cube",
            ShapeKind::Curve => "A curved wall",
            ShapeKind::SphereCap => "A spherical cap created of square tiles",
        }
    }

    fn decoder(self) -> DecodeFn {
        match self {
            ShapeKind::Cube => decode_as::<CubeConfig>,
            ShapeKind::Curve => decode_as::<CurveConfig>,
            ShapeKind::SphereCap => decode_as::<SphereCapConfig>,
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Text encodings accepted for shape files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    /// Rusty Object Notation.
    Ron,
    /// JSON.
    Json,
}

impl ConfigFormat {
    /// Pick a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ron" => Some(Self::Ron),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Errors raised while registering shapes or decoding shape files.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A shape with this name is already registered.
    #[error("shape type {0} is already registered")]
    DuplicateName(String),

    /// The document has no `shape` field.
    #[error("no shape name found, the name field must be named \"shape\"")]
    MissingShapeName,

    /// The `shape` field names nothing in the registry.
    #[error("no shape with the name {0} found")]
    UnknownShape(String),

    /// RON decoding failed.
    #[error("failed to parse RON shape config: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// JSON decoding failed.
    #[error("failed to parse JSON shape config: {0}")]
    Json(#[from] serde_json::Error),
}

type DecodeFn = fn(ConfigFormat, &str) -> Result<ShapeConfig, RegistryError>;

fn decode_as<T>(format: ConfigFormat, text: &str) -> Result<ShapeConfig, RegistryError>
where
    T: DeserializeOwned + Into<ShapeConfig>,
{
    let config: T = match format {
        ConfigFormat::Ron => ron::from_str(text)?,
        ConfigFormat::Json => serde_json::from_str(text)?,
    };
    Ok(config.into())
}

/// Just the discriminator of a shape file.
#[derive(Deserialize)]
struct ShapeName {
    #[serde(default)]
    shape: String,
}

/// A registered shape.
#[derive(Clone, Copy, Debug)]
pub struct ShapeEntry {
    /// Which kind this entry decodes to.
    pub kind: ShapeKind,
    decode: DecodeFn,
}

impl ShapeEntry {
    /// Name used in shape files.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    /// Decode a whole shape file as this entry's kind.
    pub fn decode(&self, format: ConfigFormat, text: &str) -> Result<ShapeConfig, RegistryError> {
        (self.decode)(format, text)
    }
}

/// Lookup table from shape name to decoder, in registration order.
pub struct ShapeRegistry {
    entries: Vec<ShapeEntry>,
    name_index: HashMap<&'static str, usize>,
}

impl ShapeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            name_index: HashMap::new(),
        }
    }

    /// A registry holding every [`ShapeKind`].
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for kind in ShapeKind::ALL {
            registry.insert(kind);
        }
        registry
    }

    /// Register a shape kind. Returns its index on success.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register(&mut self, kind: ShapeKind) -> Result<usize, RegistryError> {
        if self.name_index.contains_key(kind.name()) {
            return Err(RegistryError::DuplicateName(kind.name().to_string()));
        }
        Ok(self.insert(kind))
    }

    fn insert(&mut self, kind: ShapeKind) -> usize {
        let idx = self.entries.len();
        self.name_index.insert(kind.name(), idx);
        self.entries.push(ShapeEntry {
            kind,
            decode: kind.decoder(),
        });
        idx
    }

    /// Look up a shape by name.
    pub fn get(&self, name: &str) -> Option<&ShapeEntry> {
        self.name_index.get(name).map(|&idx| &self.entries[idx])
    }

    /// Number of registered shapes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ShapeEntry> {
        self.entries.iter()
    }

    /// Read the `shape` field of `text`, then decode the document as that shape.
    pub fn decode(&self, format: ConfigFormat, text: &str) -> Result<ShapeConfig, RegistryError> {
        let name: ShapeName = match format {
            ConfigFormat::Ron => ron::from_str(text)?,
            ConfigFormat::Json => serde_json::from_str(text)?,
        };
        if name.shape.is_empty() {
            return Err(RegistryError::MissingShapeName);
        }
        let entry = self
            .get(&name.shape)
            .ok_or_else(|| RegistryError::UnknownShape(name.shape.clone()))?;
        entry.decode(format, text)
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lists_every_kind_in_order() {
        let registry = ShapeRegistry::builtin();
        let names: Vec<&str> = registry.iter().map(ShapeEntry::name).collect();
        assert_eq!(names, ["cube", "curve", "spherecap"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = ShapeRegistry::builtin();
        assert_eq!(registry.get("curve").unwrap().kind, ShapeKind::Curve);
        assert!(registry.get("torus").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ShapeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.register(ShapeKind::Cube).unwrap(), 0);
        match registry.register(ShapeKind::Cube).unwrap_err() {
            RegistryError::DuplicateName(name) => assert_eq!(name, "cube"),
            other => panic!("Expected DuplicateName, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_json_dispatches_on_shape() {
        let json = r#"{"shape": "curve", "tileWidth": 0.5, "tileHeight": 0.5,
            "cylinderRadius": 3.0, "cylinderHeight": 1.0, "azimuthMaxAngle": 0.5,
            "dx": 4, "dy": 4}"#;
        let config = ShapeRegistry::builtin().decode(ConfigFormat::Json, json).unwrap();
        assert_eq!(config.kind(), ShapeKind::Curve);
    }

    #[test]
    fn test_decode_ron_dispatches_on_shape() {
        let ron_str = "(shape: \"cube\", tileWidth: 1.0, tileHeight: 1.0, cubeWidth: 2.0, \
                       cubeHeight: 2.0, cubeDepth: 1.0, dx: 10, dy: 10)";
        let config = ShapeRegistry::builtin().decode(ConfigFormat::Ron, ron_str).unwrap();
        assert_eq!(config.kind(), ShapeKind::Cube);
    }

    #[test]
    fn test_missing_shape_name() {
        let err = ShapeRegistry::builtin()
            .decode(ConfigFormat::Json, r#"{"tileWidth": 1.0}"#)
            .unwrap_err();
        assert!(matches!(err, RegistryError::MissingShapeName));
    }

    #[test]
    fn test_unknown_shape_name() {
        let err = ShapeRegistry::builtin()
            .decode(ConfigFormat::Json, r#"{"shape": "torus"}"#)
            .unwrap_err();
        match err {
            RegistryError::UnknownShape(name) => assert_eq!(name, "torus"),
            other => panic!("Expected UnknownShape, got {other:?}"),
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("RON"), Some(ConfigFormat::Ron));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
