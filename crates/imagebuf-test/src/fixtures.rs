//! RLA regression fixtures
//!
//! Fixture files are named `<scene>_<set>_nc<bits>.rla`, where `<set>` is
//! `a`, `rgb` or `rgba` and `<bits>` is `8`, `10`, `16` or `f` (float).
//! When a fixture is missing from `tests/data/images`, an equivalent
//! deterministic image is synthesized from its name instead.

use crate::error::{TestError, TestResult};
use crate::test_data_path;
use imagebuf_core::{ChannelSet, ImageBuf, ImageBufMut, SampleFormat, SamplesMut};

/// The fixtures exercised by the RLA round-trip suite.
pub const RLA_FIXTURES: [&str; 15] = [
    "ginsu_a_nc10.rla",
    "ginsu_a_ncf.rla",
    "ginsu_rgba_nc8.rla",
    "ginsu_rgb_nc16.rla",
    "imgmake_rgba_nc10.rla",
    "ginsu_a_nc16.rla",
    "ginsu_rgba_nc10.rla",
    "ginsu_rgba_ncf.rla",
    "ginsu_rgb_nc8.rla",
    "imgmake_rgba_nc16.rla",
    "ginsu_a_nc8.rla",
    "ginsu_rgba_nc16.rla",
    "ginsu_rgb_nc10.rla",
    "ginsu_rgb_ncf.rla",
    "imgmake_rgba_nc8.rla",
];

/// Size of synthesized fixtures.
pub const SYNTH_WIDTH: u32 = 320;
pub const SYNTH_HEIGHT: u32 = 240;

/// Components of a fixture file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureName {
    pub scene: String,
    pub channel_set: ChannelSet,
    pub sample_format: SampleFormat,
    pub bits_per_sample: u32,
}

impl FixtureName {
    /// Parse a fixture file name such as `ginsu_rgba_nc10.rla`.
    pub fn parse(name: &str) -> TestResult<Self> {
        let unknown = || TestError::UnknownFixture(name.to_string());
        let stem = name.strip_suffix(".rla").ok_or_else(unknown)?;
        let mut parts = stem.rsplitn(3, '_');
        let bits_tag = parts.next().ok_or_else(unknown)?;
        let set_tag = parts.next().ok_or_else(unknown)?;
        let scene = parts.next().filter(|s| !s.is_empty()).ok_or_else(unknown)?;

        let channel_set = ChannelSet::from_tag(set_tag).ok_or_else(unknown)?;
        let (sample_format, bits_per_sample) = match bits_tag.strip_prefix("nc") {
            Some("8") => (SampleFormat::UInt8, 8),
            Some("10") => (SampleFormat::UInt16, 10),
            Some("16") => (SampleFormat::UInt16, 16),
            Some("f") => (SampleFormat::Float32, 32),
            _ => return Err(unknown()),
        };

        Ok(FixtureName {
            scene: scene.to_string(),
            channel_set,
            sample_format,
            bits_per_sample,
        })
    }
}

/// Build the deterministic stand-in image for a fixture.
///
/// The left quarter is flat so that run-length packets are exercised
/// alongside literal packets.
pub fn synthesize_fixture(fixture: &FixtureName) -> TestResult<ImageBuf> {
    let (w, h) = (SYNTH_WIDTH, SYNTH_HEIGHT);
    let set = fixture.channel_set;
    let nch = set.len();
    let seed = fixture.scene.bytes().fold(7u32, |acc, b| acc.wrapping_mul(31) ^ b as u32);

    let value = |x: u32, y: u32, c: usize| -> u32 {
        if x < w / 4 {
            return (y / 16) * 7 + c as u32;
        }
        let v = x * 3 + y * 5 + c as u32 * 41;
        v ^ ((x * y) >> 3) ^ seed
    };

    let mut bm = ImageBufMut::new(w, h, set, fixture.sample_format)?;
    let mask = imagebuf_core::format::max_int_value(fixture.bits_per_sample);
    let index = |i: usize| {
        let pixel = i / nch;
        ((pixel as u32) % w, (pixel as u32) / w, i % nch)
    };
    match bm.samples_mut() {
        SamplesMut::U8(s) => {
            for (i, v) in s.iter_mut().enumerate() {
                let (x, y, c) = index(i);
                *v = (value(x, y, c) & mask) as u8;
            }
        }
        SamplesMut::U16(s) => {
            for (i, v) in s.iter_mut().enumerate() {
                let (x, y, c) = index(i);
                *v = (value(x, y, c).wrapping_mul(257) & mask) as u16;
            }
        }
        SamplesMut::F32(s) => {
            for (i, v) in s.iter_mut().enumerate() {
                let (x, y, c) = index(i);
                *v = (value(x, y, c) % 4096) as f32 / 1024.0 - 0.5;
            }
        }
    }
    bm.set_bits_per_sample(fixture.bits_per_sample)?;

    let meta = bm.metadata_mut();
    meta.set("ImageDescription", format!("{} {}", fixture.scene, set.tag()));
    meta.set("Software", "imagebuf-test");
    meta.set("rla:Gamma", "2.2");
    Ok(bm.into())
}

/// Whether `fixture_bytes(name)` falls back to a synthesized stand-in.
///
/// Synthesized fixtures are written by this crate's own encoder, so they
/// must re-encode byte for byte. Real files may come from other writers.
pub fn is_synthesized(name: &str) -> bool {
    !std::path::Path::new(&test_data_path(name)).exists()
}

/// Bytes of a fixture: the real file when present, otherwise the RLA
/// encoding of the synthesized stand-in.
pub fn fixture_bytes(name: &str) -> TestResult<Vec<u8>> {
    let path = test_data_path(name);
    if !is_synthesized(name) {
        log::debug!("fixture {}: reading {}", name, path);
        return Ok(std::fs::read(&path)?);
    }

    log::debug!("fixture {}: synthesizing", name);
    let buf = synthesize_fixture(&FixtureName::parse(name)?)?;
    imagebuf_io::rla::write_rla_mem(&buf).map_err(|e| TestError::ImageWrite {
        path: name.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_fixtures() {
        for name in RLA_FIXTURES {
            let f = FixtureName::parse(name).unwrap();
            assert!(f.scene == "ginsu" || f.scene == "imgmake");
            assert!(f.sample_format.supports_bits(f.bits_per_sample));
        }
        let f = FixtureName::parse("ginsu_rgba_nc10.rla").unwrap();
        assert_eq!(f.channel_set, ChannelSet::Rgba);
        assert_eq!(f.sample_format, SampleFormat::UInt16);
        assert_eq!(f.bits_per_sample, 10);
    }

    #[test]
    fn test_parse_rejects_bad_names() {
        for bad in [
            "ginsu_rgb_nc8.tif",
            "ginsu_rgb_nc12.rla",
            "ginsu_xyz_nc8.rla",
            "_rgb_nc8.rla",
            "rgb_nc8.rla",
        ] {
            assert!(FixtureName::parse(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        let f = FixtureName::parse("ginsu_rgb_nc10.rla").unwrap();
        let a = synthesize_fixture(&f).unwrap();
        let b = synthesize_fixture(&f).unwrap();
        assert!(a.same_pixels(&b));
        assert_eq!(a.bits_per_sample(), 10);
        assert!(a.samples().max_int().unwrap() <= 1023);
    }

    #[test]
    fn test_synthesized_fixture_reencodes_identically() {
        let name = "imgmake_rgba_nc16.rla";
        let bytes = fixture_bytes(name).unwrap();
        if is_synthesized(name) {
            let buf = imagebuf_io::rla::read_rla_mem(&bytes).unwrap();
            assert_eq!(imagebuf_io::rla::write_rla_mem(&buf).unwrap(), bytes);
        }
        assert!(is_synthesized("no_such_fixture.rla"));
    }
}
