//! Convenience helpers for reading image dimensions via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::ImageDims;
use crate::util::{MinutiaeError, MinutiaeResult};
use std::path::Path;

/// Reads the dimensions of an image file without decoding its pixels.
pub fn load_image_dims<P: AsRef<Path>>(path: P) -> MinutiaeResult<ImageDims> {
    let (width, height) =
        ::image::image_dimensions(path).map_err(|err| MinutiaeError::ImageIo {
            reason: err.to_string(),
        })?;
    ImageDims::new(width, height)
}

