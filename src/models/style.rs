use log::warn;
use serde::Serialize;
use serde_json::Value;

/// Horizontal text alignment, decoded from the export's single-letter tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Decodes the export's `ta` tag. Unrecognized tags resolve to `None` so the
    /// content-extraction layer can apply its left-aligned default.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "l" => Some(Alignment::Left),
            "c" => Some(Alignment::Center),
            "r" => Some(Alignment::Right),
            _ => None,
        }
    }
}

/// A widget's compact style record.
///
/// Unset font size and colors stay `None` here; the 12pt / `#000000` defaults are
/// applied only at content extraction, never at style resolution.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Style {
    /// Font family name (`ffn`).
    pub font_family: Option<String>,
    /// Font size in export pixels (`fs`, with the legacy `st` key as fallback).
    pub font_size: Option<u32>,
    /// 24-bit packed text color, 0xRRGGBB (`tc`). Negative means unset.
    pub text_color: Option<i64>,
    /// 24-bit packed background color (`bc`). Negative means unset.
    pub background_color: Option<i64>,
    /// Horizontal alignment (`ta`).
    pub text_align: Option<Alignment>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
}

impl Style {
    /// Parses a style payload, which the export serializes either as a JSON-encoded
    /// string or as an inline object.
    ///
    /// Fails soft: a malformed payload logs a warning and yields `Style::default()`
    /// so one bad style record cannot abort a conversion job.
    pub fn from_payload(payload: &Value) -> Style {
        let parsed;
        let record = match payload {
            Value::Object(_) => payload,
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(value) => {
                    parsed = value;
                    &parsed
                }
                Err(e) => {
                    warn!("Error parsing style string: {e}");
                    return Style::default();
                }
            },
            other => {
                warn!("Unexpected style payload type: {other}");
                return Style::default();
            }
        };

        let Some(record) = record.as_object() else {
            warn!("Style payload is not a keyed record");
            return Style::default();
        };

        Style {
            font_family: record
                .get("ffn")
                .and_then(Value::as_str)
                .map(str::to_owned),
            font_size: record
                .get("fs")
                .or_else(|| record.get("st"))
                .and_then(Value::as_f64)
                .filter(|size| *size > 0.0)
                .map(|size| size.round() as u32),
            text_color: record.get("tc").and_then(Value::as_i64),
            background_color: record.get("bc").and_then(Value::as_i64),
            text_align: record
                .get("ta")
                .and_then(Value::as_str)
                .and_then(Alignment::from_tag),
            bold: truthy(record.get("b")),
            italic: truthy(record.get("i")),
            underline: truthy(record.get("u")),
            strike: truthy(record.get("s")),
        }
    }
}

/// The export encodes emphasis flags as 0/1 numbers, but booleans show up too.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_style_string() {
        let payload = json!(
            "{\"ffn\":\"OpenSans\",\"fs\":24,\"tc\":1122867,\"bc\":16777215,\"ta\":\"c\",\"b\":1,\"i\":0,\"u\":true,\"s\":0}"
        );
        let style = Style::from_payload(&payload);
        assert_eq!(style.font_family.as_deref(), Some("OpenSans"));
        assert_eq!(style.font_size, Some(24));
        assert_eq!(style.text_color, Some(0x112233));
        assert_eq!(style.background_color, Some(0xFFFFFF));
        assert_eq!(style.text_align, Some(Alignment::Center));
        assert!(style.bold);
        assert!(!style.italic);
        assert!(style.underline);
        assert!(!style.strike);
    }

    #[test]
    fn falls_back_to_legacy_size_key() {
        let style = Style::from_payload(&json!({ "st": 14 }));
        assert_eq!(style.font_size, Some(14));
        // "fs" wins when both are present
        let style = Style::from_payload(&json!({ "fs": 18, "st": 14 }));
        assert_eq!(style.font_size, Some(18));
    }

    #[test]
    fn malformed_payload_yields_default() {
        let style = Style::from_payload(&json!("{not json"));
        assert_eq!(style, Style::default());
        let style = Style::from_payload(&json!(42));
        assert_eq!(style, Style::default());
    }

    #[test]
    fn negative_colors_are_kept_for_later_unset_handling() {
        let style = Style::from_payload(&json!({ "tc": -1 }));
        assert_eq!(style.text_color, Some(-1));
    }

    #[test]
    fn unknown_alignment_tag_is_unset() {
        let style = Style::from_payload(&json!({ "ta": "justify" }));
        assert_eq!(style.text_align, None);
    }
}
