use thiserror::Error;

use super::surface::CollaboratorError;

/// Errors that can occur while rendering a board graph to the authoring surface.
///
/// Per-element failures are not represented here; they are logged and the element
/// is skipped. Only whole-job failures propagate to the caller.
#[derive(Error, Debug)]
pub enum SlideRenderError {
    #[error("No frames found in the board document")]
    NoFrames,

    /// The authoring surface refused to create a slide; without the slide the
    /// rest of the frame cannot render.
    #[error("Authoring surface failed to create a slide: {0}")]
    Surface(#[from] CollaboratorError),
}

/// A specialized Result type for slide rendering operations.
pub type Result<T> = std::result::Result<T, SlideRenderError>;
