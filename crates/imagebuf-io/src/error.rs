//! I/O error types
//!
//! Provides a unified error type for all image I/O operations.
//! Codec modules report structural problems with the dedicated variants
//! below so that callers can tell a damaged file (`TruncatedData`) from a
//! file of a layout this library does not handle (`UnsupportedVariant`).

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error from a reader or writer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not supported or not enabled via features
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Unrecognized or malformed header or payload
    #[error("format error: {0}")]
    Format(String),

    /// Declared data extends past the end of the input
    #[error("truncated data: {what} needs {needed} bytes at offset {offset}, {available} available")]
    TruncatedData {
        what: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Recognized header with a channel/sample-format combination that is
    /// not supported
    #[error("unsupported variant: {0}")]
    UnsupportedVariant(String),

    /// Image dimensions exceed the configured limit
    #[error("image too large: {width}x{height} exceeds limit of {limit} pixels")]
    ImageTooLarge { width: u32, height: u32, limit: u64 },

    /// The buffer cannot be represented in the target format
    #[error("encode error: {0}")]
    EncodeError(String),

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] imagebuf_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
