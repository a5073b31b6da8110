//! Sample formats, channel sets and channel descriptors
//!
//! The two axes that describe a buffer's pixel layout are kept
//! independent: [`ChannelSet`] says *which* channels are stored,
//! [`SampleFormat`] says *how* each sample is represented. Codecs map
//! their header tags onto the pair instead of enumerating every
//! combination.

use crate::error::{Error, Result};

/// Numeric representation of one channel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer (also carries 10- and 12-bit data)
    UInt16,
    /// 32-bit IEEE float
    Float32,
}

impl SampleFormat {
    /// Size of one sample in bytes.
    #[inline]
    pub fn bytes(self) -> usize {
        match self {
            SampleFormat::UInt8 => 1,
            SampleFormat::UInt16 => 2,
            SampleFormat::Float32 => 4,
        }
    }

    /// Width of the storage container in bits.
    #[inline]
    pub fn container_bits(self) -> u32 {
        self.bytes() as u32 * 8
    }

    /// Whether `bits` is a valid effective precision for this container.
    ///
    /// Integer containers accept any precision from 1 bit up to their
    /// width; floats are always 32 bits.
    pub fn supports_bits(self, bits: u32) -> bool {
        match self {
            SampleFormat::UInt8 => (1..=8).contains(&bits),
            SampleFormat::UInt16 => (1..=16).contains(&bits),
            SampleFormat::Float32 => bits == 32,
        }
    }

    /// Whether this is an integer format.
    #[inline]
    pub fn is_integer(self) -> bool {
        !matches!(self, SampleFormat::Float32)
    }
}

/// The named set of per-pixel channels stored in an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelSet {
    /// A single alpha (matte) channel
    Alpha,
    /// Red, green and blue
    Rgb,
    /// Red, green, blue and alpha
    Rgba,
}

impl ChannelSet {
    /// Channel names in storage order.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            ChannelSet::Alpha => &["A"],
            ChannelSet::Rgb => &["R", "G", "B"],
            ChannelSet::Rgba => &["R", "G", "B", "A"],
        }
    }

    /// Number of channels.
    #[inline]
    pub fn len(self) -> usize {
        self.names().len()
    }

    /// Number of color (non-alpha) channels.
    #[inline]
    pub fn color_channels(self) -> usize {
        match self {
            ChannelSet::Alpha => 0,
            ChannelSet::Rgb | ChannelSet::Rgba => 3,
        }
    }

    /// Whether the set carries an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, ChannelSet::Alpha | ChannelSet::Rgba)
    }

    /// Pick the channel set stored for a given channel count.
    ///
    /// Returns `None` for counts that no supported set has.
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(ChannelSet::Alpha),
            3 => Some(ChannelSet::Rgb),
            4 => Some(ChannelSet::Rgba),
            _ => None,
        }
    }

    /// Short tag used in file names (`a`, `rgb`, `rgba`).
    pub fn tag(self) -> &'static str {
        match self {
            ChannelSet::Alpha => "a",
            ChannelSet::Rgb => "rgb",
            ChannelSet::Rgba => "rgba",
        }
    }

    /// Parse a short tag (`a`, `rgb`, `rgba`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "a" => Some(ChannelSet::Alpha),
            "rgb" => Some(ChannelSet::Rgb),
            "rgba" => Some(ChannelSet::Rgba),
            _ => None,
        }
    }

    /// Build the channel descriptors for this set in a given format.
    pub fn descriptors(self, format: SampleFormat) -> Vec<ChannelDesc> {
        self.names()
            .iter()
            .map(|name| ChannelDesc::new(*name, format))
            .collect()
    }
}

/// Descriptor of one stored channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelDesc {
    /// Channel name (e.g. "R", "A")
    pub name: String,
    /// Sample format of this channel
    pub format: SampleFormat,
}

impl ChannelDesc {
    /// Create a channel descriptor.
    pub fn new(name: impl Into<String>, format: SampleFormat) -> Self {
        Self {
            name: name.into(),
            format,
        }
    }
}

/// Check that all descriptors share one sample format and return it.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for an empty list and
/// [`Error::MixedSampleFormats`] when two channels disagree.
pub fn uniform_format(channels: &[ChannelDesc]) -> Result<SampleFormat> {
    let first = channels
        .first()
        .ok_or_else(|| Error::InvalidParameter("buffer must have at least one channel".into()))?
        .format;
    for ch in &channels[1..] {
        if ch.format != first {
            return Err(Error::MixedSampleFormats(first, ch.format));
        }
    }
    Ok(first)
}

/// One scalar sample value, tagged with its format.
#[derive(Debug, Clone, Copy)]
pub enum Sample {
    U8(u8),
    U16(u16),
    F32(f32),
}

impl Sample {
    /// Format of this sample.
    pub fn format(self) -> SampleFormat {
        match self {
            Sample::U8(_) => SampleFormat::UInt8,
            Sample::U16(_) => SampleFormat::UInt16,
            Sample::F32(_) => SampleFormat::Float32,
        }
    }

    /// Value normalized to 0..1 for integers of the given precision.
    ///
    /// Floats are returned unchanged.
    pub fn to_normalized(self, bits: u32) -> f32 {
        match self {
            Sample::U8(v) => v as f32 / max_int_value(bits) as f32,
            Sample::U16(v) => v as f32 / max_int_value(bits) as f32,
            Sample::F32(v) => v,
        }
    }

    /// Convert a normalized value into a sample of `format` at `bits`
    /// precision, rounding and clamping integer results.
    pub fn from_normalized(value: f32, format: SampleFormat, bits: u32) -> Self {
        match format {
            SampleFormat::UInt8 => Sample::U8(quantize(value, bits) as u8),
            SampleFormat::UInt16 => Sample::U16(quantize(value, bits) as u16),
            SampleFormat::Float32 => Sample::F32(value),
        }
    }
}

/// Bitwise equality, so that float NaN payloads compare equal to themselves.
impl PartialEq for Sample {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Sample::U8(a), Sample::U8(b)) => a == b,
            (Sample::U16(a), Sample::U16(b)) => a == b,
            (Sample::F32(a), Sample::F32(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Sample {}

/// Round a normalized value to an integer of `bits` precision, clamping
/// to the representable range.
pub(crate) fn quantize(value: f32, bits: u32) -> u32 {
    let max = max_int_value(bits);
    let scaled = (value.clamp(0.0, 1.0) * max as f32).round();
    (scaled as u32).min(max)
}

/// Largest integer value representable with `bits` bits.
#[inline]
pub fn max_int_value(bits: u32) -> u32 {
    if bits >= 32 {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// Wavefront RLA
    Rla,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Rla => "rla",
        }
    }
}
