use serde::Serialize;
use serde_json::Value;

use crate::models::style::Style;

/// A text widget: embedded rich-text markup plus its resolved style record.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TextWidget {
    /// The widget's markup content; may be plain text or an HTML fragment.
    pub text: String,
    pub style: Option<Style>,
}

impl TextWidget {
    pub fn from_payload(payload: &Value) -> TextWidget {
        TextWidget {
            text: payload
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            style: payload.get("style").map(Style::from_payload),
        }
    }
}
