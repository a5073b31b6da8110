//! Image comparison
//!
//! Per-sample comparison of two buffers on normalized values, with
//! summary statistics in the style of an image diff tool.

use super::ImageBuf;
use crate::error::{Error, Result};

/// Full comparison result
#[derive(Debug, Clone, PartialEq)]
pub struct CompareResult {
    /// Whether both buffers hold bit-identical samples in the same format
    pub identical: bool,
    /// Number of pixels with at least one channel differing by more than
    /// the failure threshold
    pub n_fail: u64,
    /// Largest absolute per-sample difference
    pub max_error: f64,
    /// Location `(x, y, channel)` of the largest difference
    pub max_error_pixel: Option<(u32, u32, usize)>,
    /// Mean absolute per-sample difference
    pub mean_error: f64,
    /// Root mean square per-sample difference
    pub rms_error: f64,
}

impl ImageBuf {
    /// Compare this buffer against `other`.
    ///
    /// Samples are compared as normalized floats so that buffers of
    /// different sample formats can be compared. A pixel fails when any
    /// of its channels differs by more than `fail_threshold`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] or [`Error::ChannelMismatch`]
    /// when the buffers have different geometry.
    pub fn compare(&self, other: &ImageBuf, fail_threshold: f64) -> Result<CompareResult> {
        if self.width() != other.width() || self.height() != other.height() {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (other.width(), other.height()),
            });
        }
        if self.nchannels() != other.nchannels() {
            return Err(Error::ChannelMismatch(self.nchannels(), other.nchannels()));
        }

        let nch = self.nchannels();
        let mut n_fail = 0u64;
        let mut max_error = 0.0f64;
        let mut max_error_pixel = None;
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;

        for y in 0..self.height() {
            for x in 0..self.width() {
                let mut failed = false;
                for c in 0..nch {
                    let a = self.get_float(x, y, c).unwrap_or(0.0) as f64;
                    let b = other.get_float(x, y, c).unwrap_or(0.0) as f64;
                    let diff = (a - b).abs();
                    if diff.is_nan() {
                        // NaN in only one of the images counts as a failure;
                        // NaN in both is treated as equal.
                        if a.is_nan() != b.is_nan() {
                            failed = true;
                        }
                        continue;
                    }
                    sum += diff;
                    sum_sq += diff * diff;
                    if diff > max_error {
                        max_error = diff;
                        max_error_pixel = Some((x, y, c));
                    }
                    if diff > fail_threshold {
                        failed = true;
                    }
                }
                if failed {
                    n_fail += 1;
                }
            }
        }

        let count = (self.npixels() * nch) as f64;
        Ok(CompareResult {
            identical: self.same_pixels(other),
            n_fail,
            max_error,
            max_error_pixel,
            mean_error: sum / count,
            rms_error: (sum_sq / count).sqrt(),
        })
    }
}
