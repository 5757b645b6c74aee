//! TSIG output: the tile layout as a JSON document.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{Tile, TileLayout};

/// Top-level TSIG document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsigDocument {
    /// One entry per mesh face, in face order.
    pub tile_layout: Vec<TileEntry>,
    /// Bounding box of the flat atlas.
    pub dimensions: Dimensions,
}

/// Position and size of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileEntry {
    /// The tile's placement in the flat atlas.
    pub layout: Positions,
}

/// Placement of a tile in the flat atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Positions {
    /// Top-left corner.
    pub flat: Xy,
    /// Width and height.
    pub size: Xy,
}

/// An integer pixel pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xy {
    /// Horizontal component.
    pub x: i64,
    /// Vertical component.
    pub y: i64,
}

/// Atlas extents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Bounding box of the flat atlas.
    pub flat: Bounds,
}

/// A pixel bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left.
    pub x0: i64,
    /// Right.
    pub x1: i64,
    /// Top.
    pub y0: i64,
    /// Bottom.
    pub y1: i64,
}

impl From<&Tile> for TileEntry {
    fn from(tile: &Tile) -> Self {
        Self {
            layout: Positions {
                flat: Xy {
                    x: tile.x,
                    y: tile.y,
                },
                size: Xy {
                    x: tile.width as i64,
                    y: tile.height as i64,
                },
            },
        }
    }
}

impl From<&TileLayout> for TsigDocument {
    fn from(layout: &TileLayout) -> Self {
        let atlas = layout.atlas();
        Self {
            tile_layout: layout.tiles().iter().map(TileEntry::from).collect(),
            dimensions: Dimensions {
                flat: Bounds {
                    x0: 0,
                    x1: atlas.width as i64,
                    y0: 0,
                    y1: atlas.height as i64,
                },
            },
        }
    }
}

/// Write `layout` as pretty-printed JSON with four-space indentation.
///
/// The document is encoded in memory first, so a failing sink surfaces as
/// [`ShapeError::Io`](crate::ShapeError::Io) and never as an encoding error.
pub fn write_tsig<W: Write>(layout: &TileLayout, out: &mut W) -> Result<()> {
    let doc = TsigDocument::from(layout);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)?;
    buf.push(b'\n');
    out.write_all(&buf)?;
    out.flush()?;
    Ok(())
}
