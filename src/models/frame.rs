use serde::Serialize;
use serde_json::Value;

use crate::models::style::Style;

/// A frame widget. Each frame becomes exactly one output slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Frame {
    pub name: String,
    /// Lexicographic sort key for slide order; an absent key sorts first.
    pub presentation_order: Option<String>,
    /// Only the background color is consumed from a frame's style.
    pub style: Option<Style>,
    /// Ordered child widget ids, filled in by the graph's linking pass.
    pub children: Vec<String>,
}

impl Frame {
    pub fn from_payload(payload: &Value) -> Frame {
        Frame {
            name: payload
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            presentation_order: payload
                .get("presentationOrder")
                .and_then(Value::as_str)
                .map(str::to_owned),
            style: payload.get("style").map(Style::from_payload),
            children: Vec::new(),
        }
    }
}

/// A layout container widget. Present in the graph so its children resolve,
/// but it renders nothing itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    pub padding: f64,
    pub direction: i64,
    /// Ordered child widget ids, filled in by the graph's linking pass.
    pub children: Vec<String>,
}

impl Container {
    pub fn from_payload(payload: &Value) -> Container {
        Container {
            padding: payload.get("padding").and_then(Value::as_f64).unwrap_or(0.0),
            direction: payload.get("direction").and_then(Value::as_i64).unwrap_or(2),
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn frame_reads_name_and_order() {
        let frame = Frame::from_payload(&json!({
            "name": "Intro",
            "presentationOrder": "aA1",
            "style": "{\"bc\":16711680}"
        }));
        assert_eq!(frame.name, "Intro");
        assert_eq!(frame.presentation_order.as_deref(), Some("aA1"));
        assert_eq!(frame.style.unwrap().background_color, Some(0xFF0000));
        assert!(frame.children.is_empty());
    }

    #[test]
    fn container_defaults() {
        let container = Container::from_payload(&json!({}));
        assert_eq!(container.padding, 0.0);
        assert_eq!(container.direction, 2);
    }
}
