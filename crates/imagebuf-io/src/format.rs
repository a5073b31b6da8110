//! Image format detection
//!
//! RLA has no magic number, so detection checks the header structure:
//! the revision tag at offset 26 and a non-empty active window.

use crate::{IoError, IoResult};
use imagebuf_core::ImageFormat;

#[cfg(feature = "rla")]
fn is_rla(data: &[u8]) -> bool {
    crate::rla::is_rla(data)
}

#[cfg(not(feature = "rla"))]
fn is_rla(_data: &[u8]) -> bool {
    false
}

/// Detect image format from leading bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.is_empty() {
        return Err(IoError::Format("not enough data to detect format".to_string()));
    }
    if is_rla(data) {
        return Ok(ImageFormat::Rla);
    }
    Err(IoError::UnsupportedFormat("unknown image format".to_string()))
}
