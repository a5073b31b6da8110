//! Fill operations
//!
//! Constant fill, zeroing and checkerboard patterns over an optional
//! region of a mutable buffer. Values are normalized floats, converted to
//! the buffer's sample format and bit precision.

use super::{ImageBufMut, Samples};
use crate::error::{Error, Result};
use crate::format::{SampleFormat, quantize};
use crate::roi::Roi;

/// Write one pre-converted pixel value into every pixel of `roi`.
fn fill_region<T: Copy>(
    dst: &mut [T],
    width: u32,
    roi: Roi,
    pick: impl Fn(u32, u32) -> usize,
    values: &[&[T]],
) {
    let nch = values[0].len();
    for y in roi.y..roi.y + roi.height {
        for x in roi.x..roi.x + roi.width {
            let start = (y as usize * width as usize + x as usize) * nch;
            dst[start..start + nch].copy_from_slice(values[pick(x, y)]);
        }
    }
}

impl ImageBufMut {
    /// Resolve an optional region to one inside the buffer.
    fn resolve_roi(&self, roi: Option<Roi>) -> Result<Roi> {
        let roi = roi.unwrap_or(Roi::full(self.width(), self.height()));
        roi.check_within(self.width(), self.height())?;
        Ok(roi)
    }

    /// Convert one normalized value per channel into typed storage values.
    fn convert_pixel(&self, values: &[f32]) -> Result<Samples> {
        if values.len() != self.nchannels() {
            return Err(Error::InvalidParameter(format!(
                "expected {} channel values, got {}",
                self.nchannels(),
                values.len()
            )));
        }
        let format = self.sample_format();
        let bits = self.bits_per_sample();
        Ok(match format {
            SampleFormat::UInt8 => {
                Samples::U8(values.iter().map(|&v| quantize(v, bits) as u8).collect())
            }
            SampleFormat::UInt16 => {
                Samples::U16(values.iter().map(|&v| quantize(v, bits) as u16).collect())
            }
            SampleFormat::Float32 => Samples::F32(values.to_vec()),
        })
    }

    /// Fill `roi` from a selector over a set of pixel values.
    fn fill_with(&mut self, roi: Roi, pixels: &[Samples], pick: impl Fn(u32, u32) -> usize) {
        let width = self.width();
        match &mut self.inner.samples {
            Samples::U8(dst) => {
                let vals: Vec<&[u8]> = pixels
                    .iter()
                    .filter_map(|p| match p {
                        Samples::U8(v) => Some(v.as_slice()),
                        _ => None,
                    })
                    .collect();
                fill_region(dst, width, roi, pick, &vals);
            }
            Samples::U16(dst) => {
                let vals: Vec<&[u16]> = pixels
                    .iter()
                    .filter_map(|p| match p {
                        Samples::U16(v) => Some(v.as_slice()),
                        _ => None,
                    })
                    .collect();
                fill_region(dst, width, roi, pick, &vals);
            }
            Samples::F32(dst) => {
                let vals: Vec<&[f32]> = pixels
                    .iter()
                    .filter_map(|p| match p {
                        Samples::F32(v) => Some(v.as_slice()),
                        _ => None,
                    })
                    .collect();
                fill_region(dst, width, roi, pick, &vals);
            }
        }
    }

    /// Set every pixel of `roi` (the whole image when `None`) to `values`,
    /// one normalized value per channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `values` does not have one
    /// entry per channel, and [`Error::OutOfBounds`] if `roi` does not fit.
    pub fn fill(&mut self, values: &[f32], roi: Option<Roi>) -> Result<()> {
        let roi = self.resolve_roi(roi)?;
        let pixel = self.convert_pixel(values)?;
        self.fill_with(roi, &[pixel], |_, _| 0);
        Ok(())
    }

    /// Set every sample of `roi` (the whole image when `None`) to zero.
    pub fn zero(&mut self, roi: Option<Roi>) -> Result<()> {
        let zeros = vec![0.0; self.nchannels()];
        self.fill(&zeros, roi)
    }

    /// Draw a checkerboard of `tile_width` x `tile_height` tiles into
    /// `roi` (the whole image when `None`).
    ///
    /// The tile containing pixel `(x, y)` is
    /// `(floor((x - offset_x) / tile_width), floor((y - offset_y) / tile_height))`;
    /// tiles whose index sum is even get `color1`, odd ones `color2`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for zero tile sizes or color
    /// slices of the wrong length, and [`Error::OutOfBounds`] if `roi`
    /// does not fit.
    #[allow(clippy::too_many_arguments)]
    pub fn checker(
        &mut self,
        tile_width: u32,
        tile_height: u32,
        color1: &[f32],
        color2: &[f32],
        offset_x: i32,
        offset_y: i32,
        roi: Option<Roi>,
    ) -> Result<()> {
        if tile_width == 0 || tile_height == 0 {
            return Err(Error::InvalidParameter(format!(
                "checker tile size must be positive: {tile_width}x{tile_height}"
            )));
        }
        let roi = self.resolve_roi(roi)?;
        let pixels = [self.convert_pixel(color1)?, self.convert_pixel(color2)?];
        let (tw, th) = (tile_width as i64, tile_height as i64);
        self.fill_with(roi, &pixels, |x, y| {
            let xtile = (x as i64 - offset_x as i64).div_euclid(tw);
            let ytile = (y as i64 - offset_y as i64).div_euclid(th);
            (xtile + ytile).rem_euclid(2) as usize
        });
        Ok(())
    }
}
