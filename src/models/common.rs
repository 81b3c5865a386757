use serde::Serialize;

/// How a widget's position is encoded in the board export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoordinateSchema {
    /// Absolute pixel offset from the canvas origin (`canvasOffsetPx`).
    CanvasOffset,
    /// Pixel offset relative to the parent widget's center (`parentOffsetPx`).
    ParentOffset,
    /// Non-geometric ordering reference (`stringIndex2dPosition`); carries a
    /// reference id and a sort key instead of pixel coordinates.
    StringIndex,
    /// Anything the export produces that this crate does not recognize.
    Unknown,
}

impl CoordinateSchema {
    /// Maps a raw schema tag from the export to a `CoordinateSchema`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "canvasOffsetPx" => CoordinateSchema::CanvasOffset,
            "parentOffsetPx" => CoordinateSchema::ParentOffset,
            "stringIndex2dPosition" => CoordinateSchema::StringIndex,
            _ => CoordinateSchema::Unknown,
        }
    }
}

/// A widget's position as declared in the export.
///
/// `x`/`y` are only meaningful pixel values under the offset schemas. String-index
/// positions carry `ref_id` and `string_index` instead and have no direct geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub schema: CoordinateSchema,
    pub ref_id: Option<String>,
    pub string_index: Option<String>,
}

/// A widget's size in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A multiplicative scale factor applied to a widget's dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub scale: f64,
    pub relative_scale: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Scale {
            scale: 1.0,
            relative_scale: 1.0,
        }
    }
}

/// A widget's rotation in degrees. Preserved on the widget but not consumed by
/// the geometry converter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rotation {
    pub rotation: f64,
    pub relative_rotation: f64,
}

/// A rectangle in slide units: `left`/`top` origin plus `width`/`height`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}
