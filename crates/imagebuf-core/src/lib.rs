//! imagebuf Core - Basic data structures for image round-trips
//!
//! This crate provides the fundamental data structures used throughout
//! the imagebuf library:
//!
//! - [`ImageBuf`] / [`ImageBufMut`] - The pixel buffer (immutable / mutable)
//! - [`ChannelSet`] / [`SampleFormat`] / [`ChannelDesc`] - Channel layout
//! - [`Roi`] - Rectangle regions, used by [`ImageBuf::crop`] and fills
//! - [`Metadata`] / [`AttrValue`] - Non-pixel attributes
//!
//! # Example
//!
//! ```
//! use imagebuf_core::{ChannelSet, ImageBufMut, Roi, SampleFormat};
//!
//! let mut buf = ImageBufMut::new(64, 48, ChannelSet::Rgba, SampleFormat::UInt8).unwrap();
//! buf.checker(8, 8, &[0.0, 0.0, 0.0, 1.0], &[1.0, 1.0, 1.0, 1.0], 0, 0, None)
//!     .unwrap();
//! let buf: imagebuf_core::ImageBuf = buf.into();
//!
//! let tile = buf.crop(Roi::new(8, 0, 8, 8)).unwrap();
//! assert_eq!(tile.get_float(0, 0, 0), Some(1.0));
//! ```

pub mod buf;
pub mod error;
pub mod format;
pub mod metadata;
pub mod roi;

pub use buf::{CompareResult, ImageBuf, ImageBufMut, Samples, SamplesMut};
pub use error::{Error, Result};
pub use format::{ChannelDesc, ChannelSet, ImageFormat, Sample, SampleFormat};
pub use metadata::{AttrValue, Metadata};
pub use roi::Roi;
