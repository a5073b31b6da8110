//! Sample access functions
//!
//! Low-level getters and setters for individual samples, either in their
//! native format ([`Sample`]) or normalized to `f32`.

use super::{BufData, ImageBuf, ImageBufMut, Samples};
use crate::error::{Error, Result};
use crate::format::Sample;

impl BufData {
    #[inline]
    fn index(&self, x: u32, y: u32, c: usize) -> Option<usize> {
        let nch = self.channels.len();
        if x >= self.width || y >= self.height || c >= nch {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * nch + c)
    }

    #[inline]
    fn sample_at(&self, idx: usize) -> Sample {
        match &self.samples {
            Samples::U8(v) => Sample::U8(v[idx]),
            Samples::U16(v) => Sample::U16(v[idx]),
            Samples::F32(v) => Sample::F32(v[idx]),
        }
    }
}

impl ImageBuf {
    /// Get a sample at (x, y) for channel `c`.
    ///
    /// Returns `None` if coordinates or channel are out of bounds.
    pub fn get_sample(&self, x: u32, y: u32, c: usize) -> Option<Sample> {
        let idx = self.inner.index(x, y, c)?;
        Some(self.inner.sample_at(idx))
    }

    /// Get a sample normalized to 0..1 (integers) or as-is (floats).
    pub fn get_float(&self, x: u32, y: u32, c: usize) -> Option<f32> {
        self.get_sample(x, y, c)
            .map(|s| s.to_normalized(self.inner.bits_per_sample))
    }

    /// Get all channel values of one pixel.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Vec<Sample>> {
        let start = self.inner.index(x, y, 0)?;
        Some(
            (0..self.nchannels())
                .map(|c| self.inner.sample_at(start + c))
                .collect(),
        )
    }
}

impl ImageBufMut {
    /// Get a sample at (x, y) for channel `c`.
    pub fn get_sample(&self, x: u32, y: u32, c: usize) -> Option<Sample> {
        let idx = self.inner.index(x, y, c)?;
        Some(self.inner.sample_at(idx))
    }

    /// Set a sample at (x, y) for channel `c`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for a bad coordinate or channel,
    /// [`Error::MixedSampleFormats`] if `value` has a different format
    /// than the buffer, and [`Error::InvalidParameter`] if an integer
    /// value exceeds the buffer's bit precision.
    pub fn set_sample(&mut self, x: u32, y: u32, c: usize, value: Sample) -> Result<()> {
        let idx = self.inner.index(x, y, c).ok_or(Error::OutOfBounds {
            x,
            y,
            w: 1,
            h: 1,
            width: self.inner.width,
            height: self.inner.height,
        })?;
        let max = self.max_sample_value();
        let bits = self.inner.bits_per_sample;
        match (&mut self.inner.samples, value) {
            (Samples::U8(s), Sample::U8(v)) if v as u32 <= max => s[idx] = v,
            (Samples::U16(s), Sample::U16(v)) if v as u32 <= max => s[idx] = v,
            (Samples::F32(s), Sample::F32(v)) => s[idx] = v,
            (Samples::U8(_), Sample::U8(v)) => {
                return Err(range_error(v as u32, bits));
            }
            (Samples::U16(_), Sample::U16(v)) => {
                return Err(range_error(v as u32, bits));
            }
            (samples, value) => {
                return Err(Error::MixedSampleFormats(samples.format(), value.format()));
            }
        }
        Ok(())
    }

    /// Set a sample from a normalized value, quantizing to the buffer's
    /// format and precision.
    pub fn set_float(&mut self, x: u32, y: u32, c: usize, value: f32) -> Result<()> {
        let sample = Sample::from_normalized(value, self.sample_format(), self.bits_per_sample());
        self.set_sample(x, y, c, sample)
    }

    /// Largest value an integer sample may hold at this precision.
    #[inline]
    pub fn max_sample_value(&self) -> u32 {
        crate::format::max_int_value(self.inner.bits_per_sample)
    }
}

fn range_error(value: u32, bits: u32) -> Error {
    Error::InvalidParameter(format!("sample value {value} exceeds {bits}-bit range"))
}

#[cfg(test)]
mod tests {
    use crate::{ChannelSet, Error, ImageBuf, ImageBufMut, Sample, SampleFormat};

    #[test]
    fn test_get_set_sample() {
        let mut bm = ImageBufMut::new(3, 2, ChannelSet::Rgba, SampleFormat::UInt16).unwrap();
        bm.set_sample(2, 1, 3, Sample::U16(777)).unwrap();
        assert_eq!(bm.get_sample(2, 1, 3), Some(Sample::U16(777)));
        let buf: ImageBuf = bm.into();
        assert_eq!(buf.get_sample(2, 1, 3), Some(Sample::U16(777)));
        assert_eq!(buf.get_sample(3, 1, 0), None);
        assert_eq!(buf.get_sample(0, 0, 4), None);
        assert_eq!(buf.samples().len(), 24);
    }

    #[test]
    fn test_set_sample_wrong_format() {
        let mut bm = ImageBufMut::new(2, 2, ChannelSet::Rgb, SampleFormat::UInt8).unwrap();
        assert!(bm.set_sample(0, 0, 0, Sample::F32(0.5)).is_err());
        assert!(bm.set_sample(2, 0, 0, Sample::U8(1)).is_err());
    }

    #[test]
    fn test_set_sample_respects_bits() {
        let mut bm = ImageBufMut::new(2, 2, ChannelSet::Alpha, SampleFormat::UInt16).unwrap();
        bm.set_bits_per_sample(10).unwrap();
        assert!(bm.set_sample(0, 0, 0, Sample::U16(1023)).is_ok());
        assert!(matches!(
            bm.set_sample(0, 0, 0, Sample::U16(1024)),
            Err(Error::InvalidParameter(_))
        ));
        assert_eq!(bm.get_sample(0, 0, 0), Some(Sample::U16(1023)));

        let mut bm = ImageBufMut::new(2, 2, ChannelSet::Alpha, SampleFormat::UInt8).unwrap();
        bm.set_bits_per_sample(4).unwrap();
        assert!(bm.set_sample(1, 1, 0, Sample::U8(15)).is_ok());
        assert!(matches!(
            bm.set_sample(1, 1, 0, Sample::U8(16)),
            Err(Error::InvalidParameter(_))
        ));
        assert_eq!(bm.get_sample(1, 1, 0), Some(Sample::U8(15)));
    }

    #[test]
    fn test_float_access() {
        let mut bm = ImageBufMut::new(2, 2, ChannelSet::Rgb, SampleFormat::UInt8).unwrap();
        bm.set_float(1, 1, 2, 1.0).unwrap();
        bm.set_float(0, 1, 0, 0.5).unwrap();
        let buf: ImageBuf = bm.into();
        assert_eq!(buf.get_float(1, 1, 2), Some(1.0));
        assert_eq!(buf.get_sample(0, 1, 0), Some(Sample::U8(128)));
        assert_eq!(
            buf.get_pixel(1, 1),
            Some(vec![Sample::U8(0), Sample::U8(0), Sample::U8(255)])
        );
    }
}
