use serde::Serialize;
use serde_json::Value;

use crate::models::style::Style;
use crate::models::widget::coerce_id;

/// The source-native resource an image widget displays.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ImageResource {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub name: String,
    pub board_id: Option<String>,
    pub generated: bool,
}

/// A sub-region of the source image to display in place of the full image.
/// Zero width or height means "no crop".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageCrop {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub shape: String,
}

impl Default for ImageCrop {
    fn default() -> Self {
        ImageCrop {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            shape: "custom".to_string(),
        }
    }
}

impl ImageCrop {
    /// A crop only affects geometry when both dimensions are positive.
    pub fn is_effective(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// An image widget: resource descriptor, optional crop, external URL and metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ImageWidget {
    pub resource: Option<ImageResource>,
    pub crop: Option<ImageCrop>,
    pub url: String,
    pub title: String,
    pub alt_text: String,
    pub style: Option<Style>,
    pub animated: bool,
}

impl ImageWidget {
    pub fn from_payload(payload: &Value) -> ImageWidget {
        let resource = payload.get("resource").map(|res| ImageResource {
            id: res
                .get("id")
                .and_then(coerce_id)
                .unwrap_or_default(),
            width: res.get("width").and_then(Value::as_f64).unwrap_or(0.0),
            height: res.get("height").and_then(Value::as_f64).unwrap_or(0.0),
            name: res
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            board_id: res.get("boardId").and_then(coerce_id),
            generated: res
                .get("generated")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        });

        let crop = payload.get("crop").map(|crop| ImageCrop {
            x: crop.get("x").and_then(Value::as_f64).unwrap_or(0.0),
            y: crop.get("y").and_then(Value::as_f64).unwrap_or(0.0),
            width: crop.get("width").and_then(Value::as_f64).unwrap_or(0.0),
            height: crop.get("height").and_then(Value::as_f64).unwrap_or(0.0),
            shape: crop
                .get("shape")
                .and_then(Value::as_str)
                .unwrap_or("custom")
                .to_string(),
        });

        let image = payload.get("image");
        ImageWidget {
            resource,
            crop,
            url: image
                .and_then(|img| img.get("externalLink"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            title: payload
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            alt_text: payload
                .get("altText")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            style: payload.get("style").map(Style::from_payload),
            animated: image
                .and_then(|img| img.get("animated"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_resource_crop_and_link() {
        let widget = ImageWidget::from_payload(&json!({
            "title": "Diagram",
            "altText": "an architecture diagram",
            "resource": { "id": 9001, "width": 800, "height": 600, "name": "diagram.png" },
            "crop": { "x": 10, "y": 20, "width": 400, "height": 300 },
            "image": { "externalLink": "https://example.com/diagram.png", "animated": false }
        }));
        let resource = widget.resource.unwrap();
        assert_eq!(resource.id, "9001");
        assert_eq!((resource.width, resource.height), (800.0, 600.0));
        let crop = widget.crop.unwrap();
        assert!(crop.is_effective());
        assert_eq!(crop.shape, "custom");
        assert_eq!(widget.url, "https://example.com/diagram.png");
        assert_eq!(widget.title, "Diagram");
        assert!(!widget.animated);
    }

    #[test]
    fn zero_sized_crop_is_not_effective() {
        let crop = ImageCrop::default();
        assert!(!crop.is_effective());
    }
}
