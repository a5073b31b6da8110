//! Error types for imagebuf-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use crate::format::SampleFormat;
use thiserror::Error;

/// imagebuf-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Region does not fit inside the image
    #[error("region {w}x{h}+{x}+{y} exceeds image bounds {width}x{height}")]
    OutOfBounds {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        width: u32,
        height: u32,
    },

    /// Sample storage does not match `width * height * nchannels`
    #[error("sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// Channels of one buffer use different sample formats
    #[error("mixed sample formats: {0:?} vs {1:?}")]
    MixedSampleFormats(SampleFormat, SampleFormat),

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Channel count mismatch
    #[error("channel count mismatch: {0} vs {1}")]
    ChannelMismatch(usize, usize),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for imagebuf operations
pub type Result<T> = std::result::Result<T, Error>;
