//! Converts a hierarchical canvas board export into slide geometry and styled
//! content for an external presentation authoring surface.
//!
//! The pipeline: a raw export document is parsed into a typed [`WidgetGraph`];
//! each frame gets its own [`converters::slides::GeometryConverter`] mapping
//! canvas pixels to aspect-preserving slide units; text widgets run through the
//! rich-text extractor; and the per-kind render dispatch emits positioned,
//! styled instructions to the caller's
//! [`converters::slides::AuthoringSurface`].

pub mod converters;
pub mod errors;
pub mod graph;
pub mod models;

pub use converters::slides::{render_board, RenderOptions};
pub use errors::{ConversionError, Result};
pub use graph::WidgetGraph;
