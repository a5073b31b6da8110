//! Roi - rectangular regions of interest
//!
//! A [`Roi`] is an offset plus an extent in pixel coordinates, with the
//! origin at the top-left of the buffer. It is a small `Copy` type and is
//! passed by value.
//!
//! Regions can be written as geometry strings `WxH+X+Y`:
//!
//! ```
//! use imagebuf_core::Roi;
//!
//! let roi: Roi = "100x100+100+100".parse().unwrap();
//! assert_eq!(roi, Roi::new(100, 100, 100, 100));
//! assert_eq!(roi.right(), 200);
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A rectangle region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Roi {
    /// Left x coordinate
    pub x: u32,
    /// Top y coordinate
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl Roi {
    /// Create a region from its offset and extent.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole `width` x `height` image.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right x coordinate (exclusive).
    ///
    /// Computed in 64 bits so that offsets near `u32::MAX` do not wrap.
    #[inline]
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Bottom y coordinate (exclusive).
    #[inline]
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Number of pixels covered.
    #[inline]
    pub fn npixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether the region has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether a point lies inside the region.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && (x as u64) < self.right() && y >= self.y && (y as u64) < self.bottom()
    }

    /// Whether the region lies entirely within a `width` x `height` image.
    #[inline]
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }

    /// Check that the region is non-empty and inside a `width` x `height`
    /// image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a zero-area region and
    /// [`Error::OutOfBounds`] when it extends past the image.
    pub fn check_within(&self, width: u32, height: u32) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "region has zero dimension: {}x{}",
                self.width, self.height
            )));
        }
        if !self.fits_within(width, height) {
            return Err(Error::OutOfBounds {
                x: self.x,
                y: self.y,
                w: self.width,
                h: self.height,
                width,
                height,
            });
        }
        Ok(())
    }

    /// Intersection of two regions, or `None` if they do not overlap.
    pub fn intersection(&self, other: &Roi) -> Option<Roi> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if (x as u64) < right && (y as u64) < bottom {
            Some(Roi::new(x, y, (right - x as u64) as u32, (bottom - y as u64) as u32))
        } else {
            None
        }
    }

    /// Smallest region containing both regions.
    pub fn union(&self, other: &Roi) -> Roi {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        let clamp = |v: u64| v.min(u32::MAX as u64) as u32;
        Roi::new(x, y, clamp(right - x as u64), clamp(bottom - y as u64))
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Parse a geometry string: `WxH`, `WxH+X+Y`.
///
/// Negative offsets (`WxH-X-Y`) are rejected; a region never starts
/// outside the image.
impl FromStr for Roi {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidParameter(format!("invalid geometry: '{s}'"));
        let s = s.trim();

        let (size, offsets) = match s.find(['+', '-']) {
            Some(pos) => s.split_at(pos),
            None => (s, ""),
        };
        let (w, h) = size.split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = w.parse().map_err(|_| invalid())?;
        let height: u32 = h.parse().map_err(|_| invalid())?;

        if offsets.is_empty() {
            return Ok(Roi::new(0, 0, width, height));
        }
        if offsets.contains('-') {
            return Err(Error::InvalidParameter(format!(
                "negative geometry offsets are not supported: '{s}'"
            )));
        }
        let mut parts = offsets[1..].split('+');
        let x: u32 = parts
            .next()
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;
        let y: u32 = parts
            .next()
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Roi::new(x, y, width, height))
    }
}
