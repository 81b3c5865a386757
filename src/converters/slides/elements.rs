//! Per-widget-kind rendering: combines geometry, style and content resolution
//! into positioned output instructions for the authoring surface.
//!
//! Dispatch is by the widget's kind tag. Frames and containers are structural
//! and render nothing themselves; unrecognized kinds are ignored.

use log::{debug, info, warn};

use super::constants::MIN_TEXT_BOX_HEIGHT;
use super::content::extract_content;
use super::geometry::GeometryConverter;
use super::surface::{AuthoringSurface, ImageProvider};
use super::utils::map_font_family;
use crate::models::{BoundingBox, CoordinateSchema, ImageWidget, TextWidget, Widget, WidgetBody};

/// Renders one widget onto the current slide. Any failure is confined to this
/// widget: it is logged and the element skipped, never propagated.
pub(crate) fn render_widget(
    widget: &Widget,
    converter: &GeometryConverter,
    frame_bounds: &BoundingBox,
    surface: &mut dyn AuthoringSurface,
    images: &mut dyn ImageProvider,
) {
    match &widget.body {
        WidgetBody::Text(text) => render_text(widget, text, converter, frame_bounds, surface),
        WidgetBody::Image(image) => {
            render_image(widget, image, converter, frame_bounds, surface, images)
        }
        // Frames and containers are structural; unknown kinds never render.
        _ => {}
    }
}

/// Safe fallback geometry inputs for widgets missing mandatory fields: origin
/// position with an unknown schema, zero size, identity scale.
fn geometry_inputs(widget: &Widget) -> (f64, f64, CoordinateSchema, f64, f64, f64) {
    let (x, y, schema) = widget
        .position
        .as_ref()
        .map(|pos| (pos.x, pos.y, pos.schema))
        .unwrap_or((0.0, 0.0, CoordinateSchema::Unknown));
    let (width, height) = widget
        .size
        .map(|size| (size.width, size.height))
        .unwrap_or((0.0, 0.0));
    let scale = widget.scale.map(|scale| scale.scale).unwrap_or(1.0);
    (x, y, schema, width, height, scale)
}

fn render_text(
    widget: &Widget,
    text: &TextWidget,
    converter: &GeometryConverter,
    frame_bounds: &BoundingBox,
    surface: &mut dyn AuthoringSurface,
) {
    let content = extract_content(&widget.id, text);
    let (x, y, schema, width, height, scale) = geometry_inputs(widget);

    let mut bounds = converter.resolve_position(
        x,
        y,
        width,
        height,
        scale,
        Some(frame_bounds),
        schema,
        content.text_align,
    );

    // Boxes shorter than the minimum grow to it and stay vertically centered.
    if bounds.height < MIN_TEXT_BOX_HEIGHT {
        bounds.top -= (MIN_TEXT_BOX_HEIGHT - bounds.height) / 2.0;
        bounds.height = MIN_TEXT_BOX_HEIGHT;
    }

    let font_size = converter.calculate_font_size(content.font_size, scale);
    let font_family = map_font_family(&content.font_family);

    match surface.place_text_box(&bounds, &content, font_family, font_size) {
        Ok(()) => {
            info!(
                "Added text {}: \"{}\" at ({:.2}, {:.2}) {}pt {}",
                widget.id,
                truncate(&content.plain_text, 40),
                bounds.left,
                bounds.top,
                font_size,
                font_family
            );
        }
        Err(e) => warn!("Skipping text widget {}: {e}", widget.id),
    }
}

fn render_image(
    widget: &Widget,
    image: &ImageWidget,
    converter: &GeometryConverter,
    frame_bounds: &BoundingBox,
    surface: &mut dyn AuthoringSurface,
    images: &mut dyn ImageProvider,
) {
    if image.url.is_empty() {
        warn!("No image URL for widget {}", widget.id);
        return;
    }

    let mut path = match images.acquire(&image.url) {
        Ok(path) => path,
        Err(e) => {
            warn!(
                "Failed to acquire image for widget {} from {}: {e}",
                widget.id, image.url
            );
            return;
        }
    };

    let (native_width, native_height) = image
        .resource
        .as_ref()
        .map(|res| (res.width, res.height))
        .unwrap_or((100.0, 100.0));

    let (x, y, _, _, _, scale) = geometry_inputs(widget);
    let bounds = converter.resolve_image_position(
        x,
        y,
        native_width,
        native_height,
        scale,
        image.crop.as_ref(),
        Some(frame_bounds),
    );

    // The surface gets the original image plus the crop only when it actually
    // omits part of it; a coincidental full-frame crop is suppressed.
    if let Some(crop) = &image.crop {
        let crops_something = crop.is_effective()
            && (crop.x > 0.0
                || crop.y > 0.0
                || crop.width != native_width
                || crop.height != native_height);
        if crops_something {
            match images.crop(&path, crop) {
                Ok(cropped) => path = cropped,
                Err(e) => warn!(
                    "Failed to crop image for widget {}, using the uncropped file: {e}",
                    widget.id
                ),
            }
        }
    }

    match surface.place_image(&bounds, &path) {
        Ok(()) => {
            info!(
                "Added image {}: {} at ({:.2}, {:.2}) {:.2}x{:.2}",
                widget.id,
                if image.title.is_empty() { "Untitled" } else { image.title.as_str() },
                bounds.left,
                bounds.top,
                bounds.width,
                bounds.height
            );
            debug!(
                "  native size {:.0}x{:.0}, scale {:.4}",
                native_width, native_height, scale
            );
        }
        Err(e) => warn!("Skipping image widget {}: {e}", widget.id),
    }
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
