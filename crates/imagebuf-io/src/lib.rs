//! imagebuf-io - Image codecs for imagebuf
//!
//! Decoding always produces an [`ImageBuf`]; encoding takes one. Formats
//! are enabled through Cargo features:
//!
//! | Feature | Format |
//! |---------|--------|
//! | `rla`   | Wavefront RLA (default) |
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "rla")]
//! # {
//! use imagebuf_core::{ChannelSet, ImageBuf, SampleFormat};
//! use imagebuf_io::{ImageFormat, read_image_mem, write_image_mem};
//!
//! let buf = ImageBuf::new(8, 8, ChannelSet::Rgb, SampleFormat::UInt8).unwrap();
//! let bytes = write_image_mem(&buf, ImageFormat::Rla).unwrap();
//! let back = read_image_mem(&bytes).unwrap();
//! assert!(back.same_pixels(&buf));
//! # }
//! ```

mod config;
mod error;
pub mod format;
pub mod header;

#[cfg(feature = "rla")]
pub mod rla;

pub use config::DecoderConfig;
pub use error::{IoError, IoResult};
pub use format::detect_format_from_bytes;
pub use header::{ImageHeader, read_image_header, read_image_header_mem};
pub use imagebuf_core::ImageFormat;

use imagebuf_core::ImageBuf;
use std::io::{Read, Write};

/// Read an image from a reader, detecting the format.
pub fn read_image<R: Read>(mut reader: R) -> IoResult<ImageBuf> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).map_err(IoError::Io)?;
    read_image_mem(&data)
}

/// Read an image from memory, detecting the format.
pub fn read_image_mem(data: &[u8]) -> IoResult<ImageBuf> {
    let format = detect_format_from_bytes(data)?;
    match format {
        #[cfg(feature = "rla")]
        ImageFormat::Rla => rla::read_rla_mem(data),

        _ => Err(IoError::UnsupportedFormat(format!("{:?}", format))),
    }
}

/// Write an image to a writer in the given format.
pub fn write_image<W: Write>(buf: &ImageBuf, mut writer: W, format: ImageFormat) -> IoResult<()> {
    let data = write_image_mem(buf, format)?;
    writer.write_all(&data).map_err(IoError::Io)?;
    Ok(())
}

/// Encode an image into memory in the given format.
pub fn write_image_mem(buf: &ImageBuf, format: ImageFormat) -> IoResult<Vec<u8>> {
    match format {
        #[cfg(feature = "rla")]
        ImageFormat::Rla => rla::write_rla_mem(buf),

        _ => Err(IoError::UnsupportedFormat(format!("{:?}", format))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagebuf_core::{ChannelSet, SampleFormat};

    #[test]
    fn test_write_unknown_format() {
        let buf = ImageBuf::new(2, 2, ChannelSet::Rgb, SampleFormat::UInt8).unwrap();
        assert!(matches!(
            write_image_mem(&buf, ImageFormat::Unknown),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[cfg(feature = "rla")]
    #[test]
    fn test_generic_dispatch() {
        let buf = ImageBuf::new(6, 4, ChannelSet::Rgba, SampleFormat::UInt16).unwrap();
        let mut out = Vec::new();
        write_image(&buf, &mut out, ImageFormat::Rla).unwrap();
        let back = read_image(out.as_slice()).unwrap();
        assert!(back.same_pixels(&buf));
    }
}
