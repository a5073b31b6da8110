//! Mapping between RLA channel groups and buffer channel layout

use super::header::{RlaHeader, channel_type};
use crate::{IoError, IoResult};
use imagebuf_core::{ChannelSet, ImageBuf, SampleFormat};

/// Channel set, sample format and precision of an RLA image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChannelLayout {
    pub set: ChannelSet,
    pub format: SampleFormat,
    pub bits: u32,
}

/// Sample format of one channel group.
fn group_format(kind: &str, ty: i16, bits: i16) -> IoResult<SampleFormat> {
    match (ty, bits) {
        (channel_type::BYTE, 1..=8) => Ok(SampleFormat::UInt8),
        (channel_type::BYTE, 9..=16) | (channel_type::WORD, 1..=16) => Ok(SampleFormat::UInt16),
        (channel_type::FLOAT, 32) => Ok(SampleFormat::Float32),
        (channel_type::DWORD, _) => Err(IoError::UnsupportedVariant(format!(
            "32-bit integer {kind} channels"
        ))),
        _ => Err(IoError::UnsupportedVariant(format!(
            "{kind} channel type {ty} with {bits} bits"
        ))),
    }
}

fn type_tag(format: SampleFormat) -> i16 {
    match format {
        SampleFormat::UInt8 => channel_type::BYTE,
        SampleFormat::UInt16 => channel_type::WORD,
        SampleFormat::Float32 => channel_type::FLOAT,
    }
}

impl ChannelLayout {
    /// Derive the layout declared by a header.
    pub fn from_header(h: &RlaHeader) -> IoResult<Self> {
        if h.num_aux != 0 {
            return Err(IoError::UnsupportedVariant(format!(
                "{} auxiliary channels",
                h.num_aux
            )));
        }
        let set = match (h.num_color, h.num_matte) {
            (3, 0) => ChannelSet::Rgb,
            (3, 1) => ChannelSet::Rgba,
            (0, 1) => ChannelSet::Alpha,
            (c, m) => {
                return Err(IoError::UnsupportedVariant(format!(
                    "{c} color and {m} matte channels"
                )));
            }
        };

        let (format, bits) = match set {
            ChannelSet::Alpha => (
                group_format("matte", h.matte_type, h.matte_bits)?,
                h.matte_bits,
            ),
            ChannelSet::Rgb => (
                group_format("color", h.color_type, h.color_bits)?,
                h.color_bits,
            ),
            ChannelSet::Rgba => {
                let color = group_format("color", h.color_type, h.color_bits)?;
                let matte = group_format("matte", h.matte_type, h.matte_bits)?;
                if color != matte {
                    return Err(IoError::UnsupportedVariant(format!(
                        "color samples are {color:?} but matte samples are {matte:?}"
                    )));
                }
                (color, h.color_bits.max(h.matte_bits))
            }
        };

        Ok(ChannelLayout {
            set,
            format,
            bits: bits as u32,
        })
    }

    /// Derive the layout an image buffer is written with.
    ///
    /// The channels must be named `A`, `R,G,B` or `R,G,B,A` in that order.
    pub fn from_buf(buf: &ImageBuf) -> IoResult<Self> {
        let set = buf.channel_set().ok_or_else(|| {
            let names: Vec<&str> = buf.channels().iter().map(|c| c.name.as_str()).collect();
            IoError::UnsupportedVariant(format!(
                "channels [{}] cannot be stored in RLA",
                names.join(",")
            ))
        })?;
        Ok(ChannelLayout {
            set,
            format: buf.sample_format(),
            bits: buf.bits_per_sample(),
        })
    }

    /// Write channel counts, types and bit depths into a header.
    pub fn apply_to_header(&self, h: &mut RlaHeader) {
        let tag = type_tag(self.format);
        let bits = self.bits as i16;
        let (ncolor, nmatte) = (self.set.color_channels(), self.set.has_alpha() as usize);

        h.num_color = ncolor as i16;
        h.num_matte = nmatte as i16;
        h.num_aux = 0;
        (h.color_type, h.color_bits) = if ncolor > 0 { (tag, bits) } else { (0, 0) };
        (h.matte_type, h.matte_bits) = if nmatte > 0 { (tag, bits) } else { (0, 0) };
        h.aux_type = 0;
        h.aux_bits = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(color: i16, matte: i16, ty: i16, bits: i16) -> RlaHeader {
        let mut h = RlaHeader {
            num_color: color,
            num_matte: matte,
            ..Default::default()
        };
        if color > 0 {
            h.color_type = ty;
            h.color_bits = bits;
        }
        if matte > 0 {
            h.matte_type = ty;
            h.matte_bits = bits;
        }
        h
    }

    #[test]
    fn test_layout_variants() {
        let cases = [
            ((0, 1, 0, 8), ChannelSet::Alpha, SampleFormat::UInt8, 8),
            ((3, 0, 1, 10), ChannelSet::Rgb, SampleFormat::UInt16, 10),
            ((3, 1, 1, 16), ChannelSet::Rgba, SampleFormat::UInt16, 16),
            ((3, 1, 0, 10), ChannelSet::Rgba, SampleFormat::UInt16, 10),
            ((0, 1, 4, 32), ChannelSet::Alpha, SampleFormat::Float32, 32),
        ];
        for ((c, m, ty, bits), set, format, want_bits) in cases {
            let layout = ChannelLayout::from_header(&header(c, m, ty, bits)).unwrap();
            assert_eq!(layout.set, set);
            assert_eq!(layout.format, format);
            assert_eq!(layout.bits, want_bits);
        }
    }

    #[test]
    fn test_unsupported_variants() {
        for h in [
            header(3, 0, channel_type::DWORD, 32),
            header(3, 0, channel_type::FLOAT, 16),
            header(3, 0, 0, 0),
            header(2, 0, 0, 8),
            header(3, 2, 0, 8),
            RlaHeader {
                num_aux: 1,
                ..header(3, 0, 0, 8)
            },
        ] {
            assert!(matches!(
                ChannelLayout::from_header(&h),
                Err(IoError::UnsupportedVariant(_))
            ));
        }

        let mut mixed = header(3, 1, 0, 8);
        mixed.matte_type = channel_type::FLOAT;
        mixed.matte_bits = 32;
        assert!(ChannelLayout::from_header(&mixed).is_err());
    }

    #[test]
    fn test_apply_to_header_roundtrip() {
        for set in [ChannelSet::Alpha, ChannelSet::Rgb, ChannelSet::Rgba] {
            for (format, bits) in [
                (SampleFormat::UInt8, 8),
                (SampleFormat::UInt16, 10),
                (SampleFormat::Float32, 32),
            ] {
                let layout = ChannelLayout { set, format, bits };
                let mut h = RlaHeader::default();
                layout.apply_to_header(&mut h);
                assert_eq!(ChannelLayout::from_header(&h).unwrap(), layout);
            }
        }
    }

    #[test]
    fn test_from_buf_rejects_two_channels() {
        let chans = vec![
            imagebuf_core::ChannelDesc::new("Y", SampleFormat::UInt8),
            imagebuf_core::ChannelDesc::new("A", SampleFormat::UInt8),
        ];
        let buf = ImageBuf::with_channels(2, 2, chans).unwrap();
        assert!(matches!(
            ChannelLayout::from_buf(&buf),
            Err(IoError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn test_from_buf_requires_standard_names() {
        let named = |names: &[&str]| {
            let chans = names
                .iter()
                .map(|n| imagebuf_core::ChannelDesc::new(*n, SampleFormat::UInt8))
                .collect();
            ImageBuf::with_channels(2, 2, chans).unwrap()
        };
        let bad_sets: [&[&str]; 3] = [&["Y"], &["A", "B", "G", "R"], &["X", "Y", "Z"]];
        for bad in bad_sets {
            assert!(matches!(
                ChannelLayout::from_buf(&named(bad)),
                Err(IoError::UnsupportedVariant(_))
            ));
        }
        let layout = ChannelLayout::from_buf(&named(&["R", "G", "B", "A"])).unwrap();
        assert_eq!(layout.set, ChannelSet::Rgba);
        let layout = ChannelLayout::from_buf(&named(&["A"])).unwrap();
        assert_eq!(layout.set, ChannelSet::Alpha);
    }
}
