//! Error types for the lyrics2pptx library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lyrics2pptx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning lyrics into a slide deck.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input text has no lines at all.
    #[error("The text file is empty")]
    EmptyInput,

    /// A color name outside the fixed palette was requested.
    #[error("Unsupported color '{name}'. Supported colors are: {}", supported.join(", "))]
    UnsupportedColor {
        /// The rejected name, as entered.
        name: String,
        /// Palette names, in palette order.
        supported: Vec<&'static str>,
    },

    /// A numeric option is outside its accepted range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// The background image could not be read or decoded.
    #[error("Cannot open background image {path:?}: {message}")]
    ImageOpen {
        /// Image path as supplied.
        path: PathBuf,
        /// Decoder or I/O message.
        message: String,
    },

    /// The adjusted background image could not be encoded.
    #[error("Image encoding error: {0}")]
    Image(String),

    /// The deck outline could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Error writing the ZIP package.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// The finished deck could not be written to disk.
    #[error("Failed to save PowerPoint presentation to {path:?}: {source}")]
    Save {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}
