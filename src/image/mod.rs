//! Image dimensions the annotation set is attached to.
//!
//! Pixel data never enters this crate. Bounds checks and the template header
//! only need the width and height of the annotated image.

use crate::geometry::in_bounds;
use crate::util::{MinutiaeError, MinutiaeResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Width and height of an annotated image in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageDims {
    width: u32,
    height: u32,
}

impl ImageDims {
    /// Creates dimensions, rejecting empty images.
    pub fn new(width: u32, height: u32) -> MinutiaeResult<Self> {
        if width == 0 || height == 0 {
            return Err(MinutiaeError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if `(x, y)` addresses a pixel of the image.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        in_bounds(x, y, self.width, self.height)
    }

    /// Fails with `OutOfBounds` unless `(x, y)` addresses a pixel of the image.
    pub fn check(&self, x: i64, y: i64) -> MinutiaeResult<()> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(MinutiaeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}
