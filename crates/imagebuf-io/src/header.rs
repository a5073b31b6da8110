//! Image header reading
//!
//! Provides layout information about an image file without decoding
//! pixel data.

use crate::{IoError, IoResult, detect_format_from_bytes};
use imagebuf_core::{ChannelSet, ImageFormat, SampleFormat};
use std::io::Read;

/// Image layout read without decoding pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of channels per pixel
    pub nchannels: usize,
    /// Standard channel set, if the channels form one
    pub channel_set: Option<ChannelSet>,
    /// Sample container format
    pub sample_format: SampleFormat,
    /// Effective bits per sample
    pub bits_per_sample: u32,
    /// Detected image format
    pub format: ImageFormat,
}

/// Read image layout from a reader without decoding pixel data
pub fn read_image_header<R: Read>(mut reader: R) -> IoResult<ImageHeader> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).map_err(IoError::Io)?;
    read_image_header_mem(&data)
}

/// Read image layout from bytes without decoding pixel data
pub fn read_image_header_mem(data: &[u8]) -> IoResult<ImageHeader> {
    let format = detect_format_from_bytes(data)?;
    match format {
        #[cfg(feature = "rla")]
        ImageFormat::Rla => crate::rla::read_header_rla(data),

        _ => Err(IoError::UnsupportedFormat(format!("{:?}", format))),
    }
}

#[cfg(all(test, feature = "rla"))]
mod tests {
    use super::*;
    use imagebuf_core::ImageBuf;

    #[test]
    fn test_header_matches_buffer() {
        let buf = ImageBuf::new(31, 7, ChannelSet::Alpha, SampleFormat::Float32).unwrap();
        let data = crate::rla::write_rla_mem(&buf).unwrap();
        let header = read_image_header(data.as_slice()).unwrap();
        assert_eq!(header.width, 31);
        assert_eq!(header.height, 7);
        assert_eq!(header.channel_set, Some(ChannelSet::Alpha));
        assert_eq!(header.sample_format, SampleFormat::Float32);
        assert_eq!(header.bits_per_sample, 32);
    }

    #[test]
    fn test_unknown_data() {
        assert!(read_image_header_mem(&[0u8; 16]).is_err());
    }
}
