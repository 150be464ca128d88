//! Error types for the invoice collector

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort a collection run
///
/// Price extraction failures are not represented here; they are
/// recovered locally, see [`crate::price::PriceError`].
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Input directory does not exist
    #[error("Input Directory: {} not found.", .0.display())]
    InputDirNotFound(PathBuf),

    /// Input path exists but is not a directory
    #[error("Input path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The pdfium library could not be bound
    #[error("PDFium library unavailable: {0}")]
    PdfiumUnavailable(String),

    /// A PDF could not be loaded or rasterized
    #[error("Failed to render {}: {detail}", .path.display())]
    Render { path: PathBuf, detail: String },

    /// Requested page does not exist
    #[error("Page {page} is out of range for {} ({total} pages)", .path.display())]
    PageOutOfRange { path: PathBuf, page: u16, total: u16 },
}
