//! Stateless pixel-to-slide-unit geometry for one frame.
//!
//! A converter is constructed per frame, parameterized by that frame's pixel
//! size and the target slide size. All methods are pure functions of their
//! inputs and the frame-derived constants computed at construction.

use crate::models::{Alignment, BoundingBox, CoordinateSchema, ImageCrop};

use super::constants::FONT_SIZE_CORRECTION;

/// Converts canvas pixel measurements into normalized slide-space units.
#[derive(Debug, Clone, Copy)]
pub struct GeometryConverter {
    frame_width: f64,
    frame_height: f64,
    scale_x: f64,
    scale_y: f64,
    uniform_scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl GeometryConverter {
    /// Builds a converter for a frame of `frame_width` × `frame_height` pixels
    /// targeting a slide of `slide_width` × `slide_height` units.
    ///
    /// Non-positive frame dimensions are clamped to one pixel so a degenerate
    /// frame cannot poison the math with infinities.
    pub fn new(frame_width: f64, frame_height: f64, slide_width: f64, slide_height: f64) -> Self {
        let frame_width = if frame_width > 0.0 { frame_width } else { 1.0 };
        let frame_height = if frame_height > 0.0 { frame_height } else { 1.0 };

        let scale_x = slide_width / frame_width;
        let scale_y = slide_height / frame_height;
        // One scale for both axes preserves the frame's aspect ratio.
        let uniform_scale = scale_x.min(scale_y);

        // Center the frame within the slide on whichever axis has slack.
        let offset_x = (slide_width - frame_width * uniform_scale) / 2.0;
        let offset_y = (slide_height - frame_height * uniform_scale) / 2.0;

        GeometryConverter {
            frame_width,
            frame_height,
            scale_x,
            scale_y,
            uniform_scale,
            offset_x,
            offset_y,
        }
    }

    /// Converts a pixel measurement to slide units using the uniform scale.
    pub fn pixels_to_units(&self, pixels: f64) -> f64 {
        pixels * self.uniform_scale
    }

    pub fn uniform_scale(&self) -> f64 {
        self.uniform_scale
    }

    pub fn scale_factors(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    /// The frame's rectangle in slide units, centered within the target slide.
    pub fn frame_bounds(&self) -> BoundingBox {
        BoundingBox {
            left: self.offset_x,
            top: self.offset_y,
            width: self.pixels_to_units(self.frame_width),
            height: self.pixels_to_units(self.frame_height),
        }
    }

    /// Resolves a widget's pixel position and size to a slide-unit bounding box.
    ///
    /// Widths and heights are first multiplied by `element_scale`. Parent-offset
    /// positions are center-anchored on `parent_bounds`; alignment does not
    /// currently change the anchor. Canvas-offset positions are absolute frame
    /// offsets. Any other schema, or a parent-offset position without parent
    /// bounds, falls back to the frame's top-left origin.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve_position(
        &self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        element_scale: f64,
        parent_bounds: Option<&BoundingBox>,
        schema: CoordinateSchema,
        align: Alignment,
    ) -> BoundingBox {
        let scaled_width = width * element_scale;
        let scaled_height = height * element_scale;

        // The center anchor applies to every alignment; `align` is kept in the
        // signature so an edge-anchored variant stays a local change.
        let _ = align;

        let (left, top) = match (schema, parent_bounds) {
            (CoordinateSchema::ParentOffset, Some(parent)) => (
                parent.left + self.pixels_to_units(x - scaled_width / 2.0),
                parent.top + self.pixels_to_units(y - scaled_height / 2.0),
            ),
            (CoordinateSchema::CanvasOffset, _) => (
                self.offset_x + self.pixels_to_units(x),
                self.offset_y + self.pixels_to_units(y),
            ),
            _ => (self.offset_x, self.offset_y),
        };

        BoundingBox {
            left,
            top,
            width: self.pixels_to_units(scaled_width),
            height: self.pixels_to_units(scaled_height),
        }
    }

    /// Resolves an image widget's bounding box.
    ///
    /// A crop with positive width and height replaces the native size as the
    /// displayed size before scaling. Placement is always center-anchored on
    /// `parent_bounds`, or on the frame origin when absent.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve_image_position(
        &self,
        x: f64,
        y: f64,
        original_width: f64,
        original_height: f64,
        scale: f64,
        crop: Option<&ImageCrop>,
        parent_bounds: Option<&BoundingBox>,
    ) -> BoundingBox {
        let (width, height) = match crop {
            Some(crop) if crop.is_effective() => (crop.width, crop.height),
            _ => (original_width, original_height),
        };

        let scaled_width = width * scale;
        let scaled_height = height * scale;

        let (base_left, base_top) = match parent_bounds {
            Some(parent) => (parent.left, parent.top),
            None => (self.offset_x, self.offset_y),
        };

        BoundingBox {
            left: base_left + self.pixels_to_units(x - scaled_width / 2.0),
            top: base_top + self.pixels_to_units(y - scaled_height / 2.0),
            width: self.pixels_to_units(scaled_width),
            height: self.pixels_to_units(scaled_height),
        }
    }

    /// Adjusts a base font size for an element's scale, applying the fixed
    /// pixel-to-point correction.
    pub fn calculate_font_size(&self, base_size: u32, scale: f64) -> u32 {
        (base_size as f64 * scale * FONT_SIZE_CORRECTION).round() as u32
    }

    /// Fits an image within the given bounds. With `keep_aspect` the smaller of
    /// the two per-axis scale factors applies; without it the maximum bounds are
    /// returned directly, forcing a stretch.
    pub fn fit_within_bounds(
        image_width: f64,
        image_height: f64,
        max_width: f64,
        max_height: f64,
        keep_aspect: bool,
    ) -> (f64, f64) {
        if !keep_aspect {
            return (max_width, max_height);
        }
        let scale = (max_width / image_width).min(max_height / image_height);
        (image_width * scale, image_height * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn converter() -> GeometryConverter {
        // 1600x900 frame into a 10x5.625 slide: matching aspect ratio.
        GeometryConverter::new(1600.0, 900.0, 10.0, 5.625)
    }

    #[test]
    fn uniform_scale_is_min_of_axis_scales() {
        let conv = GeometryConverter::new(2000.0, 500.0, 10.0, 5.625);
        let (sx, sy) = conv.scale_factors();
        assert_eq!(conv.uniform_scale(), sx.min(sy));
    }

    #[test]
    fn matching_aspect_has_zero_centering_offsets() {
        let bounds = converter().frame_bounds();
        assert!(bounds.left.abs() < EPSILON);
        assert!(bounds.top.abs() < EPSILON);
        assert!((bounds.width - 10.0).abs() < EPSILON);
        assert!((bounds.height - 5.625).abs() < EPSILON);
    }

    #[test]
    fn wide_frame_centers_vertically() {
        // Wider than the slide aspect: slack on the y axis only.
        let conv = GeometryConverter::new(2000.0, 500.0, 10.0, 5.625);
        let bounds = conv.frame_bounds();
        assert!(bounds.left.abs() < EPSILON);
        assert!(bounds.top > 0.0);
        assert!(((bounds.top * 2.0) + bounds.height - 5.625).abs() < EPSILON);
    }

    #[test]
    fn pixels_to_units_round_trips() {
        let conv = converter();
        for px in [0.0, 1.0, 17.3, 640.0, 1600.0] {
            let units = conv.pixels_to_units(px);
            assert!((units / conv.uniform_scale() - px).abs() < EPSILON);
        }
    }

    #[test]
    fn parent_offset_is_center_anchored() {
        let conv = converter();
        let parent = conv.frame_bounds();
        // A 160x90 px box at the frame center should land centered on the slide.
        let bounds = conv.resolve_position(
            800.0,
            450.0,
            160.0,
            90.0,
            1.0,
            Some(&parent),
            CoordinateSchema::ParentOffset,
            Alignment::Left,
        );
        assert!((bounds.center_x() - 5.0).abs() < EPSILON);
        assert!((bounds.center_y() - 2.8125).abs() < EPSILON);
    }

    #[test]
    fn alignment_does_not_change_the_anchor() {
        let conv = converter();
        let parent = conv.frame_bounds();
        let place = |align| {
            conv.resolve_position(
                100.0,
                50.0,
                160.0,
                90.0,
                1.0,
                Some(&parent),
                CoordinateSchema::ParentOffset,
                align,
            )
        };
        assert_eq!(place(Alignment::Left), place(Alignment::Center));
        assert_eq!(place(Alignment::Left), place(Alignment::Right));
    }

    #[test]
    fn canvas_offset_adds_absolute_frame_offsets() {
        let conv = converter();
        let bounds = conv.resolve_position(
            160.0,
            90.0,
            320.0,
            180.0,
            1.0,
            None,
            CoordinateSchema::CanvasOffset,
            Alignment::Left,
        );
        assert!((bounds.left - 1.0).abs() < EPSILON);
        assert!((bounds.top - 0.5625).abs() < EPSILON);
        assert!((bounds.width - 2.0).abs() < EPSILON);
    }

    #[test]
    fn unknown_schema_falls_back_to_frame_origin() {
        let conv = GeometryConverter::new(2000.0, 500.0, 10.0, 5.625);
        let frame = conv.frame_bounds();
        let bounds = conv.resolve_position(
            999.0,
            999.0,
            100.0,
            100.0,
            1.0,
            None,
            CoordinateSchema::Unknown,
            Alignment::Left,
        );
        assert_eq!(bounds.left, frame.left);
        assert_eq!(bounds.top, frame.top);
    }

    #[test]
    fn element_scale_multiplies_dimensions() {
        let conv = converter();
        let bounds = conv.resolve_position(
            0.0,
            0.0,
            160.0,
            90.0,
            2.0,
            None,
            CoordinateSchema::CanvasOffset,
            Alignment::Left,
        );
        assert!((bounds.width - 2.0).abs() < EPSILON);
        assert!((bounds.height - 1.125).abs() < EPSILON);
    }

    #[test]
    fn effective_crop_replaces_native_size() {
        let conv = converter();
        let crop = ImageCrop {
            x: 0.0,
            y: 0.0,
            width: 160.0,
            height: 90.0,
            shape: "custom".into(),
        };
        let bounds =
            conv.resolve_image_position(800.0, 450.0, 3200.0, 1800.0, 1.0, Some(&crop), None);
        assert!((bounds.width - 1.0).abs() < EPSILON);
        assert!((bounds.height - 0.5625).abs() < EPSILON);
        // Center-anchored on the frame origin fallback.
        assert!((bounds.center_x() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn zero_sized_crop_uses_native_size() {
        let conv = converter();
        let crop = ImageCrop::default();
        let bounds =
            conv.resolve_image_position(800.0, 450.0, 160.0, 90.0, 1.0, Some(&crop), None);
        assert!((bounds.width - 1.0).abs() < EPSILON);
    }

    #[test]
    fn font_size_applies_scale_and_correction() {
        let conv = converter();
        assert_eq!(conv.calculate_font_size(16, 1.0), 12);
        assert_eq!(conv.calculate_font_size(16, 2.0), 24);
        assert_eq!(conv.calculate_font_size(14, 1.0), 11); // 10.5 rounds up
    }

    #[test]
    fn fit_within_bounds_preserves_aspect() {
        let (w, h) = GeometryConverter::fit_within_bounds(400.0, 300.0, 100.0, 100.0, true);
        assert!(w <= 100.0 + EPSILON && h <= 100.0 + EPSILON);
        assert!((w / h - 400.0 / 300.0).abs() < EPSILON);
    }

    #[test]
    fn fit_without_aspect_stretches_to_bounds() {
        let (w, h) = GeometryConverter::fit_within_bounds(400.0, 300.0, 50.0, 120.0, false);
        assert_eq!((w, h), (50.0, 120.0));
    }

    #[test]
    fn degenerate_frame_does_not_produce_infinities() {
        let conv = GeometryConverter::new(0.0, -5.0, 10.0, 5.625);
        assert!(conv.uniform_scale().is_finite());
        assert!(conv.frame_bounds().left.is_finite());
    }
}
