//! ImageBuf - the in-memory pixel buffer
//!
//! An [`ImageBuf`] holds a `width` x `height` image with an ordered list of
//! named channels that all share one [`SampleFormat`]. Samples are stored
//! contiguously, row-major, interleaved by channel:
//!
//! ```text
//! index(x, y, c) = (y * width + x) * nchannels + c
//! ```
//!
//! # Ownership model
//!
//! `ImageBuf` is immutable and uses `Arc` for cheap cloning. Buffers are
//! built or edited through [`ImageBufMut`] (via [`ImageBuf::try_into_mut`]
//! or [`ImageBuf::to_mut`]) and published again with `Into<ImageBuf>`.
//! Operations such as [`ImageBuf::crop`] return new buffers and never
//! touch their input.

mod access;
pub mod compare;
mod crop;
mod fill;

pub use compare::CompareResult;

use crate::error::{Error, Result};
use crate::format::{ChannelDesc, ChannelSet, SampleFormat, max_int_value, uniform_format};
use crate::metadata::Metadata;
use std::sync::Arc;

/// Typed sample storage.
#[derive(Debug, Clone)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

impl Samples {
    /// Zero-filled storage for `len` samples of `format`.
    pub fn zeroed(format: SampleFormat, len: usize) -> Self {
        match format {
            SampleFormat::UInt8 => Samples::U8(vec![0; len]),
            SampleFormat::UInt16 => Samples::U16(vec![0; len]),
            SampleFormat::Float32 => Samples::F32(vec![0.0; len]),
        }
    }

    /// Sample format of the storage.
    pub fn format(&self) -> SampleFormat {
        match self {
            Samples::U8(_) => SampleFormat::UInt8,
            Samples::U16(_) => SampleFormat::UInt16,
            Samples::F32(_) => SampleFormat::Float32,
        }
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        match self {
            Samples::U8(v) => v.len(),
            Samples::U16(v) => v.len(),
            Samples::F32(v) => v.len(),
        }
    }

    /// Whether the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest integer sample, or `None` for float storage.
    pub fn max_int(&self) -> Option<u32> {
        match self {
            Samples::U8(v) => Some(v.iter().copied().max().unwrap_or(0) as u32),
            Samples::U16(v) => Some(v.iter().copied().max().unwrap_or(0) as u32),
            Samples::F32(_) => None,
        }
    }
}

/// Bitwise equality; float samples compare by their bit patterns.
impl PartialEq for Samples {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Samples::U8(a), Samples::U8(b)) => a == b,
            (Samples::U16(a), Samples::U16(b)) => a == b,
            (Samples::F32(a), Samples::F32(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            _ => false,
        }
    }
}

/// Internal buffer data
#[derive(Debug, Clone)]
struct BufData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Channel descriptors in storage order
    channels: Vec<ChannelDesc>,
    /// Effective precision inside the sample container
    bits_per_sample: u32,
    /// Data window origin inside the display window (top-down)
    origin: (i32, i32),
    /// Non-pixel attributes
    metadata: Metadata,
    /// Interleaved samples
    samples: Samples,
}

impl BufData {
    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        let format = uniform_format(&self.channels)?;
        if format != self.samples.format() {
            return Err(Error::MixedSampleFormats(format, self.samples.format()));
        }
        let expected = sample_count(self.width, self.height, self.channels.len())?;
        if self.samples.len() != expected {
            return Err(Error::SampleCountMismatch {
                expected,
                actual: self.samples.len(),
            });
        }
        if !format.supports_bits(self.bits_per_sample) {
            return Err(Error::InvalidParameter(format!(
                "{} bits per sample not valid for {:?}",
                self.bits_per_sample, format
            )));
        }
        Ok(())
    }
}

/// `width * height * nchannels`, checked against overflow.
fn sample_count(width: u32, height: u32, nchannels: usize) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(nchannels))
        .ok_or(Error::InvalidDimension { width, height })
}

/// Immutable pixel buffer
///
/// # Examples
///
/// ```
/// use imagebuf_core::{ChannelSet, ImageBuf, SampleFormat};
///
/// let buf = ImageBuf::new(640, 480, ChannelSet::Rgba, SampleFormat::UInt16).unwrap();
/// assert_eq!(buf.width(), 640);
/// assert_eq!(buf.nchannels(), 4);
/// assert_eq!(buf.samples().len(), 640 * 480 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct ImageBuf {
    inner: Arc<BufData>,
}

impl ImageBuf {
    /// Create a zero-filled buffer for a channel set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, set: ChannelSet, format: SampleFormat) -> Result<Self> {
        Self::with_channels(width, height, set.descriptors(format))
    }

    /// Create a zero-filled buffer with arbitrary channel descriptors.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions, an empty channel list, or
    /// channels with differing sample formats.
    pub fn with_channels(width: u32, height: u32, channels: Vec<ChannelDesc>) -> Result<Self> {
        let format = uniform_format(&channels)?;
        let len = sample_count(width, height, channels.len())?;
        Self::from_samples(width, height, channels, Samples::zeroed(format, len))
    }

    /// Wrap existing sample storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SampleCountMismatch`] if `samples` does not hold
    /// exactly `width * height * channels.len()` values, or
    /// [`Error::MixedSampleFormats`] if a channel format differs from the
    /// storage format.
    pub fn from_samples(
        width: u32,
        height: u32,
        channels: Vec<ChannelDesc>,
        samples: Samples,
    ) -> Result<Self> {
        ImageBufMut::from_samples(width, height, channels, samples).map(Into::into)
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of channels per pixel.
    #[inline]
    pub fn nchannels(&self) -> usize {
        self.inner.channels.len()
    }

    /// Channel descriptors in storage order.
    #[inline]
    pub fn channels(&self) -> &[ChannelDesc] {
        &self.inner.channels
    }

    /// Index of the channel with the given name.
    pub fn channel_index(&self, name: &str) -> Option<usize> {
        self.inner.channels.iter().position(|c| c.name == name)
    }

    /// The standard channel set these channels form, if any.
    pub fn channel_set(&self) -> Option<ChannelSet> {
        let set = ChannelSet::from_count(self.nchannels())?;
        let matches = set
            .names()
            .iter()
            .zip(&self.inner.channels)
            .all(|(n, c)| c.name == *n);
        matches.then_some(set)
    }

    /// Shared sample format of all channels.
    #[inline]
    pub fn sample_format(&self) -> SampleFormat {
        self.inner.samples.format()
    }

    /// Effective bits per sample (e.g. 10 for 10-bit data in a 16-bit
    /// container).
    #[inline]
    pub fn bits_per_sample(&self) -> u32 {
        self.inner.bits_per_sample
    }

    /// Largest value an integer sample may hold at this precision.
    #[inline]
    pub fn max_sample_value(&self) -> u32 {
        max_int_value(self.inner.bits_per_sample)
    }

    /// Data window origin inside the display window.
    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        self.inner.origin
    }

    /// Non-pixel attributes.
    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.inner.metadata
    }

    /// Raw sample storage.
    #[inline]
    pub fn samples(&self) -> &Samples {
        &self.inner.samples
    }

    /// Number of pixels.
    #[inline]
    pub fn npixels(&self) -> usize {
        self.inner.width as usize * self.inner.height as usize
    }

    /// Whether two buffers have the same geometry, channels and
    /// bit-identical samples.
    ///
    /// Metadata and origin are not compared.
    pub fn same_pixels(&self, other: &ImageBuf) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.channels == other.inner.channels
            && self.inner.bits_per_sample == other.inner.bits_per_sample
            && self.inner.samples == other.inner.samples
    }

    /// Get the number of strong references to this buffer.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Try to get mutable access to the buffer.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<ImageBufMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(ImageBufMut { inner: data }),
            Err(arc) => Err(ImageBuf { inner: arc }),
        }
    }

    /// Create a mutable copy of this buffer.
    pub fn to_mut(&self) -> ImageBufMut {
        ImageBufMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable pixel buffer
///
/// Allows construction and modification of image data. Convert back to an
/// immutable [`ImageBuf`] using `Into<ImageBuf>`.
#[derive(Debug)]
pub struct ImageBufMut {
    inner: BufData,
}

impl ImageBufMut {
    /// Create a zero-filled mutable buffer for a channel set.
    pub fn new(width: u32, height: u32, set: ChannelSet, format: SampleFormat) -> Result<Self> {
        Ok(ImageBuf::new(width, height, set, format)?.to_mut())
    }

    /// Wrap existing sample storage for further editing.
    ///
    /// Same validation as [`ImageBuf::from_samples`].
    pub fn from_samples(
        width: u32,
        height: u32,
        channels: Vec<ChannelDesc>,
        samples: Samples,
    ) -> Result<Self> {
        let data = BufData {
            width,
            height,
            channels,
            bits_per_sample: samples.format().container_bits(),
            origin: (0, 0),
            metadata: Metadata::new(),
            samples,
        };
        data.validate()?;
        Ok(ImageBufMut { inner: data })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of channels per pixel.
    #[inline]
    pub fn nchannels(&self) -> usize {
        self.inner.channels.len()
    }

    /// Shared sample format of all channels.
    #[inline]
    pub fn sample_format(&self) -> SampleFormat {
        self.inner.samples.format()
    }

    /// Effective bits per sample.
    #[inline]
    pub fn bits_per_sample(&self) -> u32 {
        self.inner.bits_per_sample
    }

    /// Set the effective precision inside the sample container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `bits` does not fit the
    /// sample format (1..=8 for UInt8, 1..=16 for UInt16, 32 for Float32),
    /// or if an existing sample exceeds the new range.
    pub fn set_bits_per_sample(&mut self, bits: u32) -> Result<()> {
        let format = self.sample_format();
        if !format.supports_bits(bits) {
            return Err(Error::InvalidParameter(format!(
                "{bits} bits per sample not valid for {format:?}"
            )));
        }
        if let Some(max) = self.inner.samples.max_int()
            && max > max_int_value(bits)
        {
            return Err(Error::InvalidParameter(format!(
                "sample value {max} exceeds {bits}-bit range"
            )));
        }
        self.inner.bits_per_sample = bits;
        Ok(())
    }

    /// Data window origin inside the display window.
    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        self.inner.origin
    }

    /// Set the data window origin.
    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.inner.origin = (x, y);
    }

    /// Non-pixel attributes.
    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.inner.metadata
    }

    /// Mutable access to the attributes.
    #[inline]
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.inner.metadata
    }

    /// Replace all attributes.
    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.inner.metadata = metadata;
    }

    /// Raw sample storage.
    #[inline]
    pub fn samples(&self) -> &Samples {
        &self.inner.samples
    }

    /// Mutable raw sample storage.
    ///
    /// The storage variant and length cannot change through this
    /// reference, only values.
    #[inline]
    pub fn samples_mut(&mut self) -> SamplesMut<'_> {
        match &mut self.inner.samples {
            Samples::U8(v) => SamplesMut::U8(v.as_mut_slice()),
            Samples::U16(v) => SamplesMut::U16(v.as_mut_slice()),
            Samples::F32(v) => SamplesMut::F32(v.as_mut_slice()),
        }
    }
}

/// Mutable view of typed sample storage.
#[derive(Debug)]
pub enum SamplesMut<'a> {
    U8(&'a mut [u8]),
    U16(&'a mut [u16]),
    F32(&'a mut [f32]),
}

impl From<ImageBufMut> for ImageBuf {
    fn from(buf: ImageBufMut) -> Self {
        ImageBuf {
            inner: Arc::new(buf.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = ImageBuf::new(10, 20, ChannelSet::Rgb, SampleFormat::UInt8).unwrap();
        assert_eq!(buf.width(), 10);
        assert_eq!(buf.height(), 20);
        assert_eq!(buf.nchannels(), 3);
        assert_eq!(buf.samples().len(), 600);
        assert_eq!(buf.bits_per_sample(), 8);
        assert_eq!(buf.channel_set(), Some(ChannelSet::Rgb));
        assert_eq!(buf.origin(), (0, 0));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            ImageBuf::new(0, 5, ChannelSet::Alpha, SampleFormat::UInt8),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_from_samples_validates_length() {
        let chans = ChannelSet::Rgba.descriptors(SampleFormat::UInt16);
        let err = ImageBuf::from_samples(2, 2, chans.clone(), Samples::U16(vec![0; 15]));
        assert!(matches!(
            err,
            Err(Error::SampleCountMismatch {
                expected: 16,
                actual: 15
            })
        ));
        assert!(ImageBuf::from_samples(2, 2, chans, Samples::U16(vec![0; 16])).is_ok());
    }

    #[test]
    fn test_from_samples_validates_format() {
        let chans = ChannelSet::Alpha.descriptors(SampleFormat::Float32);
        assert!(matches!(
            ImageBuf::from_samples(2, 2, chans, Samples::U8(vec![0; 4])),
            Err(Error::MixedSampleFormats(..))
        ));
    }

    #[test]
    fn test_channel_set_requires_standard_names() {
        let chans = vec![
            ChannelDesc::new("X", SampleFormat::UInt8),
            ChannelDesc::new("Y", SampleFormat::UInt8),
            ChannelDesc::new("Z", SampleFormat::UInt8),
        ];
        let buf = ImageBuf::with_channels(4, 4, chans).unwrap();
        assert_eq!(buf.channel_set(), None);
        assert_eq!(buf.channel_index("Y"), Some(1));
    }

    #[test]
    fn test_set_bits_per_sample() {
        let mut bm = ImageBufMut::new(4, 4, ChannelSet::Rgb, SampleFormat::UInt16).unwrap();
        bm.set_bits_per_sample(10).unwrap();
        assert_eq!(bm.bits_per_sample(), 10);
        assert!(bm.set_bits_per_sample(17).is_err());

        if let SamplesMut::U16(s) = bm.samples_mut() {
            s[0] = 4000;
        }
        assert!(bm.set_bits_per_sample(10).is_err());
        assert!(bm.set_bits_per_sample(12).is_ok());
    }

    #[test]
    fn test_try_into_mut_shared() {
        let buf = ImageBuf::new(2, 2, ChannelSet::Alpha, SampleFormat::UInt8).unwrap();
        let shared = buf.clone();
        assert_eq!(buf.ref_count(), 2);
        let buf = buf.try_into_mut().unwrap_err();
        drop(shared);
        assert!(buf.try_into_mut().is_ok());
    }

    #[test]
    fn test_to_mut_does_not_alias() {
        let buf = ImageBuf::new(2, 2, ChannelSet::Alpha, SampleFormat::UInt8).unwrap();
        let mut bm = buf.to_mut();
        if let SamplesMut::U8(s) = bm.samples_mut() {
            s[0] = 9;
        }
        let edited: ImageBuf = bm.into();
        assert!(!edited.same_pixels(&buf));
        assert_eq!(buf.samples(), &Samples::U8(vec![0; 4]));
    }
}
