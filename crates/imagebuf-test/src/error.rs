//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to load a test image
    #[error("failed to load image '{path}': {message}")]
    ImageLoad { path: String, message: String },

    /// Failed to write an image
    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// Fixture name does not follow `<scene>_<a|rgb|rgba>_nc<8|10|16|f>.rla`
    #[error("unrecognized fixture name: {0}")]
    UnknownFixture(String),

    /// Error building a buffer
    #[error("image error: {0}")]
    Core(#[from] imagebuf_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
