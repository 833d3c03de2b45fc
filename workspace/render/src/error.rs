use thiserror::Error;

/// Error types for the render module
#[derive(Error, Debug)]
pub enum RenderError {
    /// The PDF document could not be assembled or serialized
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),

    /// The output file could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An image asset could not be decoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Type alias for Result with RenderError
pub type Result<T> = std::result::Result<T, RenderError>;
