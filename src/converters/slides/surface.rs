//! Collaborator traits at the rendering boundary.
//!
//! The core emits normalized geometry, text runs and colors; acquiring image
//! files and writing the output container are the caller's concern. Both
//! collaborators may block on network or disk; the core imposes no timeout or
//! cancellation policy of its own.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::content::ExtractedContent;
use crate::models::{BoundingBox, ImageCrop};

/// Opaque failure reported by an external collaborator.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct CollaboratorError(String);

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        CollaboratorError(message.into())
    }
}

/// Acquires image files for image widgets.
pub trait ImageProvider {
    /// Resolves a URL to a local file path.
    fn acquire(&mut self, url: &str) -> Result<PathBuf, CollaboratorError>;

    /// Applies a crop rectangle to a local image, returning the (possibly new)
    /// path. A no-op crop may return the original path unchanged.
    fn crop(&mut self, path: &Path, crop: &ImageCrop) -> Result<PathBuf, CollaboratorError>;
}

/// The presentation authoring surface: accepts positioned, styled output
/// instructions and renders slides. Treated as a black box by this crate.
pub trait AuthoringSurface {
    /// Starts a new slide of the given size in slide units.
    fn create_slide(&mut self, width: f64, height: f64) -> Result<(), CollaboratorError>;

    /// Sets the current slide's background to a `#RRGGBB` color.
    fn set_background(&mut self, color: &str) -> Result<(), CollaboratorError>;

    /// Places a text box containing the extracted runs. `font_family` is already
    /// mapped to a surface-compatible name; `font_size` is in points.
    fn place_text_box(
        &mut self,
        bounds: &BoundingBox,
        content: &ExtractedContent,
        font_family: &str,
        font_size: u32,
    ) -> Result<(), CollaboratorError>;

    /// Places an image from a local file.
    fn place_image(&mut self, bounds: &BoundingBox, path: &Path) -> Result<(), CollaboratorError>;
}
