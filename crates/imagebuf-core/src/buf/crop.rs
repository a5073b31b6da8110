//! Region extraction
//!
//! [`ImageBuf::crop`] copies an axis-aligned sub-rectangle into a new
//! buffer. Regions that do not fit are rejected rather than clipped, so a
//! bad rectangle can never silently produce a smaller image.

use super::{BufData, ImageBuf, Samples};
use crate::error::Result;
use crate::roi::Roi;
use std::sync::Arc;

/// Copy the `roi` rows of an interleaved image of `width` pixels and
/// `nch` channels.
fn copy_region<T: Copy>(src: &[T], width: u32, nch: usize, roi: Roi) -> Vec<T> {
    let src_stride = width as usize * nch;
    let row_len = roi.width as usize * nch;
    let x0 = roi.x as usize * nch;
    let mut out = Vec::with_capacity(row_len * roi.height as usize);
    for y in roi.y as usize..roi.y as usize + roi.height as usize {
        let start = y * src_stride + x0;
        out.extend_from_slice(&src[start..start + row_len]);
    }
    out
}

impl ImageBuf {
    /// Extract a rectangular sub-region into a new image.
    ///
    /// The result is `roi.width` x `roi.height`, keeps the channel list,
    /// sample format, bit precision and metadata of the source, and its
    /// origin is moved by the crop offset. Pixel `(x, y)` of the result
    /// equals pixel `(x + roi.x, y + roi.y)` of the source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`](crate::Error::OutOfBounds) if the
    /// region extends past the image, and
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) for a
    /// zero-area region.
    ///
    /// # Examples
    ///
    /// ```
    /// use imagebuf_core::{ChannelSet, ImageBuf, Roi, SampleFormat};
    ///
    /// let buf = ImageBuf::new(300, 200, ChannelSet::Rgb, SampleFormat::UInt8).unwrap();
    /// let cropped = buf.crop(Roi::new(100, 100, 100, 100)).unwrap();
    /// assert_eq!((cropped.width(), cropped.height()), (100, 100));
    ///
    /// assert!(buf.crop(Roi::new(250, 0, 100, 10)).is_err());
    /// ```
    pub fn crop(&self, roi: Roi) -> Result<ImageBuf> {
        let src = &*self.inner;
        roi.check_within(src.width, src.height)?;

        let nch = src.channels.len();
        let samples = match &src.samples {
            Samples::U8(v) => Samples::U8(copy_region(v, src.width, nch, roi)),
            Samples::U16(v) => Samples::U16(copy_region(v, src.width, nch, roi)),
            Samples::F32(v) => Samples::F32(copy_region(v, src.width, nch, roi)),
        };

        let data = BufData {
            width: roi.width,
            height: roi.height,
            channels: src.channels.clone(),
            bits_per_sample: src.bits_per_sample,
            origin: (
                src.origin.0.saturating_add_unsigned(roi.x),
                src.origin.1.saturating_add_unsigned(roi.y),
            ),
            metadata: src.metadata.clone(),
            samples,
        };
        Ok(ImageBuf {
            inner: Arc::new(data),
        })
    }

    /// Crop using a geometry string such as `"100x100+100+100"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry cannot be parsed or the region
    /// does not fit (see [`ImageBuf::crop`]).
    pub fn crop_geometry(&self, geometry: &str) -> Result<ImageBuf> {
        self.crop(geometry.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ChannelSet, Error, ImageBuf, ImageBufMut, Roi, Sample, SampleFormat};

    fn numbered(w: u32, h: u32) -> ImageBuf {
        let mut bm = ImageBufMut::new(w, h, ChannelSet::Rgb, SampleFormat::UInt16).unwrap();
        for y in 0..h {
            for x in 0..w {
                for c in 0..3 {
                    let v = (y * w + x) as u16 * 3 + c as u16;
                    bm.set_sample(x, y, c, Sample::U16(v)).unwrap();
                }
            }
        }
        bm.into()
    }

    #[test]
    fn test_crop_copies_region() {
        let buf = numbered(8, 6);
        let c = buf.crop(Roi::new(2, 1, 3, 4)).unwrap();
        assert_eq!((c.width(), c.height()), (3, 4));
        for y in 0..4 {
            for x in 0..3 {
                assert_eq!(c.get_pixel(x, y), buf.get_pixel(x + 2, y + 1));
            }
        }
    }

    #[test]
    fn test_crop_full_image_is_identity() {
        let buf = numbered(5, 5);
        let c = buf.crop(Roi::full(5, 5)).unwrap();
        assert!(c.same_pixels(&buf));
        assert_eq!(buf.ref_count(), 1);
    }

    #[test]
    fn test_crop_rejects_overflowing_region() {
        let buf = numbered(8, 6);
        assert!(matches!(
            buf.crop(Roi::new(6, 0, 3, 1)),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            buf.crop(Roi::new(0, 5, 1, 2)),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_crop_moves_origin() {
        let mut bm = numbered(8, 6).to_mut();
        bm.set_origin(10, 20);
        let buf: ImageBuf = bm.into();
        let c = buf.crop_geometry("2x2+3+4").unwrap();
        assert_eq!(c.origin(), (13, 24));
        assert_eq!(buf.origin(), (10, 20));
    }
}
