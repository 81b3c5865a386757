//! Defaults and fixed factors used throughout the slide conversion process.

/// Default target slide size in slide units.
pub const DEFAULT_SLIDE_WIDTH: f64 = 10.0;
pub const DEFAULT_SLIDE_HEIGHT: f64 = 5.625;

/// Fallbacks applied at content extraction when a widget's style leaves them unset.
pub const DEFAULT_FONT_SIZE: u32 = 12;
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Text boxes shorter than this are grown to this height and re-centered.
pub const MIN_TEXT_BOX_HEIGHT: f64 = 0.3;

/// Empirical pixel-to-point correction applied to font sizes. Not configurable.
pub const FONT_SIZE_CORRECTION: f64 = 0.75;
