//! imagebuf - Pixel buffers, the RLA image codec and region crop
//!
//! # Overview
//!
//! - [`ImageBuf`]: immutable pixel buffer with named channels sharing one
//!   sample format (8-bit, 16-bit with optional 10-bit range, or float)
//! - [`io`]: format detection and the Wavefront RLA codec
//! - [`ImageBuf::crop`]: sub-rectangle extraction preserving channels and
//!   metadata
//!
//! # Example
//!
//! ```
//! use imagebuf::{ChannelSet, ImageBuf, Roi, SampleFormat};
//!
//! let buf = ImageBuf::new(320, 240, ChannelSet::Rgb, SampleFormat::UInt8).unwrap();
//! # #[cfg(feature = "rla")]
//! # {
//! let bytes = imagebuf::io::write_image_mem(&buf, imagebuf::io::ImageFormat::Rla).unwrap();
//! let decoded = imagebuf::io::read_image_mem(&bytes).unwrap();
//! let crop = decoded.crop("100x100+100+100".parse::<Roi>().unwrap()).unwrap();
//! assert_eq!((crop.width(), crop.height()), (100, 100));
//! assert_eq!(crop.origin(), (100, 100));
//! # }
//! ```

// Re-export core types (primary data structures used everywhere)
pub use imagebuf_core::*;

// Re-export the codec crate as a module to avoid name conflicts
pub use imagebuf_io as io;
