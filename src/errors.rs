use thiserror::Error;

/// Represents errors that can occur while loading and parsing a board export document.
///
/// Per-widget problems (malformed nested payloads, bad style records) are deliberately
/// *not* represented here: those recover in place with logged defaults so a single bad
/// widget cannot abort a conversion job. Only document-level failures surface.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The document could not be deserialized as JSON at all.
    #[error("Failed to parse board document JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred while reading the document from disk.
    #[error("I/O error reading board document: {0}")]
    Io(#[from] std::io::Error),
}

/// A type alias for `Result<T, ConversionError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, ConversionError>;
