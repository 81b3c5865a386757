//! Converts a widget graph into slides on an external authoring surface.
//!
//! Each frame becomes exactly one slide, in presentation order. A fresh
//! `GeometryConverter` is built per frame, parameterized by that frame's pixel
//! size, and every linked child is dispatched through it. Per-element failures
//! are logged and skipped; only the absence of frames and slide-creation
//! failures abort the job.

mod constants;
mod content;
mod elements;
mod error;
mod geometry;
mod surface;
mod utils;

pub use constants::{DEFAULT_SLIDE_HEIGHT, DEFAULT_SLIDE_WIDTH};
pub use content::{extract_content, extract_runs, ExtractedContent, FormatState, TextRun};
pub use error::{Result, SlideRenderError};
pub use geometry::GeometryConverter;
pub use surface::{AuthoringSurface, CollaboratorError, ImageProvider};
pub use utils::{map_font_family, packed_color_to_hex, rgb_string_to_hex};

use log::{info, warn};

use crate::graph::WidgetGraph;
use elements::render_widget;

/// Target slide size for a conversion job, in slide units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub slide_width: f64,
    pub slide_height: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            slide_width: DEFAULT_SLIDE_WIDTH,
            slide_height: DEFAULT_SLIDE_HEIGHT,
        }
    }
}

/// Renders every frame of the graph as one slide on the authoring surface, in
/// presentation order. Returns the number of slides created.
pub fn render_board(
    graph: &WidgetGraph,
    options: &RenderOptions,
    surface: &mut dyn AuthoringSurface,
    images: &mut dyn ImageProvider,
) -> Result<usize> {
    let frames = graph.frames();
    if frames.is_empty() {
        return Err(SlideRenderError::NoFrames);
    }

    info!("Found {} frame(s) to process", frames.len());

    for (index, widget) in frames.iter().enumerate() {
        let Some(frame) = widget.as_frame() else {
            continue;
        };

        // Frames without a pixel size map units 1:1 onto the slide.
        let (frame_width, frame_height) = widget
            .size
            .map(|size| (size.width, size.height))
            .unwrap_or((options.slide_width, options.slide_height));

        info!(
            "Processing frame {} of {}: \"{}\" ({:.0}x{:.0} px, order {})",
            index + 1,
            frames.len(),
            if frame.name.is_empty() { "Unnamed" } else { frame.name.as_str() },
            frame_width,
            frame_height,
            frame.presentation_order.as_deref().unwrap_or("-")
        );

        let converter = GeometryConverter::new(
            frame_width,
            frame_height,
            options.slide_width,
            options.slide_height,
        );

        surface.create_slide(options.slide_width, options.slide_height)?;

        if let Some(background) = frame
            .style
            .as_ref()
            .and_then(|style| packed_color_to_hex(style.background_color))
        {
            match surface.set_background(&background) {
                Ok(()) => info!("Slide background set to {background}"),
                Err(e) => warn!("Failed to set slide background: {e}"),
            }
        }

        let frame_bounds = converter.frame_bounds();
        for child_id in &frame.children {
            match graph.get(child_id) {
                Some(child) => render_widget(child, &converter, &frame_bounds, surface, images),
                None => warn!("Frame {} references missing child {child_id}", widget.id),
            }
        }
    }

    info!("Rendered {} slide(s)", frames.len());
    Ok(frames.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundingBox, ImageCrop};
    use serde_json::{json, Value};
    use std::path::{Path, PathBuf};

    /// Records every instruction the renderer emits, in order.
    #[derive(Default)]
    struct RecordingSurface {
        events: Vec<String>,
    }

    impl AuthoringSurface for RecordingSurface {
        fn create_slide(&mut self, width: f64, height: f64) -> std::result::Result<(), CollaboratorError> {
            self.events.push(format!("slide {width}x{height}"));
            Ok(())
        }

        fn set_background(&mut self, color: &str) -> std::result::Result<(), CollaboratorError> {
            self.events.push(format!("background {color}"));
            Ok(())
        }

        fn place_text_box(
            &mut self,
            bounds: &BoundingBox,
            content: &ExtractedContent,
            font_family: &str,
            font_size: u32,
        ) -> std::result::Result<(), CollaboratorError> {
            self.events.push(format!(
                "text \"{}\" {font_family} {font_size}pt h={:.3} at ({:.2}, {:.2})",
                content.plain_text, bounds.height, bounds.left, bounds.top
            ));
            Ok(())
        }

        fn place_image(
            &mut self,
            _bounds: &BoundingBox,
            path: &Path,
        ) -> std::result::Result<(), CollaboratorError> {
            self.events.push(format!("image {}", path.display()));
            Ok(())
        }
    }

    /// Resolves URLs to fixed paths; crops get a `cropped-` prefix. URLs
    /// starting with `bad://` fail to acquire.
    #[derive(Default)]
    struct FakeImages {
        crop_calls: usize,
    }

    impl ImageProvider for FakeImages {
        fn acquire(&mut self, url: &str) -> std::result::Result<PathBuf, CollaboratorError> {
            if url.starts_with("bad://") {
                return Err(CollaboratorError::new("download failed"));
            }
            Ok(PathBuf::from("/cache/img.png"))
        }

        fn crop(
            &mut self,
            path: &Path,
            _crop: &ImageCrop,
        ) -> std::result::Result<PathBuf, CollaboratorError> {
            self.crop_calls += 1;
            Ok(path.with_file_name("cropped-img.png"))
        }
    }

    fn record(id: &str, kind: &str, payload: Value) -> Value {
        json!({
            "id": id,
            "canvasedObjectData": { "type": kind, "json": payload.to_string() }
        })
    }

    fn frame_record(id: &str, order: &str, extra: Value) -> Value {
        let mut payload = json!({
            "name": format!("frame-{id}"),
            "presentationOrder": order,
            "size": { "width": 1600, "height": 900 }
        });
        if let (Some(target), Some(source)) = (payload.as_object_mut(), extra.as_object()) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }
        record(id, "frame", payload)
    }

    fn text_record(id: &str, parent: &str, text: &str) -> Value {
        record(
            id,
            "text",
            json!({
                "text": text,
                "_parent": { "id": parent },
                "_position": { "schema": "parentOffsetPx", "offsetPx": { "x": 800, "y": 450 } },
                "size": { "width": 400, "height": 100 }
            }),
        )
    }

    fn graph_of(records: Vec<Value>) -> WidgetGraph {
        let _ = env_logger::builder().is_test(true).try_init();
        WidgetGraph::from_document(&json!({ "content": { "widgets": records } }))
    }

    #[test]
    fn no_frames_is_a_job_level_failure() {
        let graph = graph_of(vec![text_record("t1", "ghost", "hi")]);
        let mut surface = RecordingSurface::default();
        let mut images = FakeImages::default();
        let result = render_board(&graph, &RenderOptions::default(), &mut surface, &mut images);
        assert!(matches!(result, Err(SlideRenderError::NoFrames)));
    }

    #[test]
    fn frames_render_in_presentation_order() {
        let graph = graph_of(vec![
            frame_record("f2", "2", json!({})),
            text_record("t2", "f2", "second"),
            frame_record("f1", "1", json!({})),
            text_record("t1", "f1", "first"),
        ]);
        let mut surface = RecordingSurface::default();
        let mut images = FakeImages::default();
        let slides =
            render_board(&graph, &RenderOptions::default(), &mut surface, &mut images).unwrap();
        assert_eq!(slides, 2);
        let first_text = surface.events.iter().position(|e| e.contains("first")).unwrap();
        let second_text = surface.events.iter().position(|e| e.contains("second")).unwrap();
        assert!(first_text < second_text);
    }

    #[test]
    fn frame_background_color_is_applied() {
        let graph = graph_of(vec![frame_record(
            "f1",
            "1",
            json!({ "style": "{\"bc\":1122867}" }),
        )]);
        let mut surface = RecordingSurface::default();
        let mut images = FakeImages::default();
        render_board(&graph, &RenderOptions::default(), &mut surface, &mut images).unwrap();
        assert!(surface.events.contains(&"background #112233".to_string()));
    }

    #[test]
    fn short_text_boxes_grow_to_min_height() {
        let graph = graph_of(vec![
            frame_record("f1", "1", json!({})),
            record(
                "t1",
                "text",
                json!({
                    "text": "tiny",
                    "_parent": { "id": "f1" },
                    "_position": { "schema": "parentOffsetPx", "offsetPx": { "x": 800, "y": 450 } },
                    "size": { "width": 400, "height": 10 }
                }),
            ),
        ]);
        let mut surface = RecordingSurface::default();
        let mut images = FakeImages::default();
        render_board(&graph, &RenderOptions::default(), &mut surface, &mut images).unwrap();
        let text_event = surface.events.iter().find(|e| e.starts_with("text")).unwrap();
        assert!(text_event.contains("h=0.300"), "got: {text_event}");
    }

    #[test]
    fn canvas_offset_children_keep_absolute_frame_offsets() {
        // A frame child declaring canvasOffsetPx is placed at the absolute
        // frame offset, not center-anchored like its parent-offset siblings.
        // 1600x900 frame on a 10x5.625 slide: 160px -> 1.00, 90px -> 0.5625.
        let graph = graph_of(vec![
            frame_record("f1", "1", json!({})),
            record(
                "t1",
                "text",
                json!({
                    "text": "pinned",
                    "_parent": { "id": "f1" },
                    "_position": { "schema": "canvasOffsetPx", "offsetPx": { "x": 160, "y": 90 } },
                    "size": { "width": 320, "height": 180 }
                }),
            ),
        ]);
        let mut surface = RecordingSurface::default();
        let mut images = FakeImages::default();
        render_board(&graph, &RenderOptions::default(), &mut surface, &mut images).unwrap();
        let text_event = surface.events.iter().find(|e| e.contains("pinned")).unwrap();
        assert!(text_event.contains("at (1.00, 0.56)"), "got: {text_event}");
    }

    fn image_payload(crop: Value) -> Value {
        json!({
            "_parent": { "id": "f1" },
            "_position": { "schema": "parentOffsetPx", "offsetPx": { "x": 800, "y": 450 } },
            "resource": { "id": "r1", "width": 640, "height": 480 },
            "crop": crop,
            "image": { "externalLink": "https://example.com/pic.png" }
        })
    }

    #[test]
    fn full_frame_crop_is_suppressed() {
        let graph = graph_of(vec![
            frame_record("f1", "1", json!({})),
            record(
                "i1",
                "image",
                image_payload(json!({ "x": 0, "y": 0, "width": 640, "height": 480 })),
            ),
        ]);
        let mut surface = RecordingSurface::default();
        let mut images = FakeImages::default();
        render_board(&graph, &RenderOptions::default(), &mut surface, &mut images).unwrap();
        assert_eq!(images.crop_calls, 0);
        assert!(surface.events.iter().any(|e| e == "image /cache/img.png"));
    }

    #[test]
    fn partial_crop_is_forwarded() {
        let graph = graph_of(vec![
            frame_record("f1", "1", json!({})),
            record(
                "i1",
                "image",
                image_payload(json!({ "x": 10, "y": 0, "width": 320, "height": 240 })),
            ),
        ]);
        let mut surface = RecordingSurface::default();
        let mut images = FakeImages::default();
        render_board(&graph, &RenderOptions::default(), &mut surface, &mut images).unwrap();
        assert_eq!(images.crop_calls, 1);
        assert!(surface.events.iter().any(|e| e == "image /cache/cropped-img.png"));
    }

    #[test]
    fn failed_image_acquisition_skips_only_that_element() {
        let graph = graph_of(vec![
            frame_record("f1", "1", json!({})),
            record(
                "i1",
                "image",
                json!({
                    "_parent": { "id": "f1" },
                    "resource": { "id": "r1", "width": 640, "height": 480 },
                    "image": { "externalLink": "bad://nope" }
                }),
            ),
            text_record("t1", "f1", "still here"),
        ]);
        let mut surface = RecordingSurface::default();
        let mut images = FakeImages::default();
        render_board(&graph, &RenderOptions::default(), &mut surface, &mut images).unwrap();
        assert!(!surface.events.iter().any(|e| e.starts_with("image")));
        assert!(surface.events.iter().any(|e| e.contains("still here")));
    }

    #[test]
    fn widget_without_position_or_size_still_renders() {
        let graph = graph_of(vec![
            frame_record("f1", "1", json!({})),
            record("t1", "text", json!({ "text": "bare", "_parent": { "id": "f1" } })),
        ]);
        let mut surface = RecordingSurface::default();
        let mut images = FakeImages::default();
        render_board(&graph, &RenderOptions::default(), &mut surface, &mut images).unwrap();
        assert!(surface.events.iter().any(|e| e.contains("bare")));
    }
}
