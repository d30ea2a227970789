//! Error types for pattern generation and batch persistence

use thiserror::Error;

/// Result type alias for fallible operations in this crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem failure while preparing the output directory or writing an image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoder failure while writing an image
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid index range: start {start} is greater than end {end}")]
    InvalidRange { start: u32, end: u32 },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}
