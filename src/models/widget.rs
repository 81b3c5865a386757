use serde::Serialize;
use serde_json::Value;

use crate::models::common::{CoordinateSchema, Position, Rotation, Scale, Size};
use crate::models::frame::{Container, Frame};
use crate::models::image::ImageWidget;
use crate::models::text::TextWidget;

/// The kind tag carried by every raw widget record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WidgetKind {
    Text,
    Image,
    Frame,
    Container,
    /// Any kind this crate does not model. Kept in the graph, never rendered.
    Other(String),
}

impl WidgetKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => WidgetKind::Text,
            "image" => WidgetKind::Image,
            "frame" => WidgetKind::Frame,
            "slidecontainer" => WidgetKind::Container,
            other => WidgetKind::Other(other.to_string()),
        }
    }

    /// Whether widgets of this kind may own an ordered child list.
    pub fn holds_children(&self) -> bool {
        matches!(self, WidgetKind::Frame | WidgetKind::Container)
    }
}

/// The kind-specific part of a widget, dispatched as a tagged union rather than
/// a class hierarchy so the unrecognized-kind fallback stays trivial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WidgetBody {
    Text(TextWidget),
    Image(ImageWidget),
    Frame(Frame),
    Container(Container),
    Other,
}

/// A single positioned element from the source canvas.
///
/// Parent linkage is a weak back-reference by identifier; ownership of children is
/// expressed as ordered child-id lists on container-capable bodies, never as
/// owning references in both directions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Widget {
    pub id: String,
    pub kind: WidgetKind,
    pub parent_id: Option<String>,
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub scale: Option<Scale>,
    pub rotation: Option<Rotation>,
    pub body: WidgetBody,
    /// The raw record as it arrived, retained for diagnostics.
    pub raw: Value,
}

impl Widget {
    /// Builds a widget from its id, kind tag and already-decoded nested payload.
    /// Unrecognized kinds produce a generic widget with an `Other` body.
    pub fn from_record(id: String, kind_tag: &str, payload: &Value, raw: Value) -> Widget {
        let kind = WidgetKind::from_tag(kind_tag);
        let body = match kind {
            WidgetKind::Text => WidgetBody::Text(TextWidget::from_payload(payload)),
            WidgetKind::Image => WidgetBody::Image(ImageWidget::from_payload(payload)),
            WidgetKind::Frame => WidgetBody::Frame(Frame::from_payload(payload)),
            WidgetKind::Container => WidgetBody::Container(Container::from_payload(payload)),
            WidgetKind::Other(_) => WidgetBody::Other,
        };

        Widget {
            id,
            kind,
            parent_id: parse_parent_id(payload),
            position: payload.get("_position").map(parse_position),
            size: parse_size(payload),
            scale: parse_scale(payload),
            rotation: parse_rotation(payload),
            body,
            raw,
        }
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match &self.body {
            WidgetBody::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextWidget> {
        match &self.body {
            WidgetBody::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageWidget> {
        match &self.body {
            WidgetBody::Image(image) => Some(image),
            _ => None,
        }
    }
}

// --- Shared payload helpers ---

/// Coerces a JSON identifier to a string; the export emits both strings and numbers.
pub(crate) fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn parse_parent_id(payload: &Value) -> Option<String> {
    payload.get("_parent")?.get("id").and_then(coerce_id)
}

pub(crate) fn parse_position(value: &Value) -> Position {
    let tag = value.get("schema").and_then(Value::as_str).unwrap_or("");
    let schema = CoordinateSchema::from_tag(tag);
    match schema {
        CoordinateSchema::CanvasOffset | CoordinateSchema::ParentOffset => {
            let offset = value.get("offsetPx");
            Position {
                x: number_at(offset, "x"),
                y: number_at(offset, "y"),
                schema,
                ref_id: None,
                string_index: None,
            }
        }
        CoordinateSchema::StringIndex => Position {
            x: 0.0,
            y: 0.0,
            schema,
            ref_id: value.get("refId").and_then(coerce_id),
            string_index: value
                .get("stringIndex")
                .and_then(Value::as_str)
                .map(str::to_owned),
        },
        CoordinateSchema::Unknown => Position {
            x: 0.0,
            y: 0.0,
            schema,
            ref_id: None,
            string_index: None,
        },
    }
}

pub(crate) fn parse_size(payload: &Value) -> Option<Size> {
    let size = payload.get("size")?;
    Some(Size {
        width: number_at(Some(size), "width"),
        height: number_at(Some(size), "height"),
    })
}

pub(crate) fn parse_scale(payload: &Value) -> Option<Scale> {
    let scale = payload.get("scale")?;
    Some(Scale {
        scale: scale.get("scale").and_then(Value::as_f64).unwrap_or(1.0),
        // The relative hint lives at the payload's top level, not under "scale".
        relative_scale: payload
            .get("relativeScale")
            .and_then(Value::as_f64)
            .unwrap_or(1.0),
    })
}

pub(crate) fn parse_rotation(payload: &Value) -> Option<Rotation> {
    let rotation = payload.get("rotation")?;
    Some(Rotation {
        rotation: rotation
            .get("rotation")
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
        relative_rotation: payload
            .get("relativeRotation")
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
    })
}

fn number_at(value: Option<&Value>, key: &str) -> f64 {
    value
        .and_then(|v| v.get(key))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}
