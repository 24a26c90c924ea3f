//! Path-based load and store helpers.

use crate::image::ImageDims;
use crate::minutia::Minutia;
use crate::template::{decode, encode, write_text, DecodedTemplate, EncodeConfig};
use crate::util::MinutiaeResult;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Reads and decodes a template file.
pub fn read_template<P: AsRef<Path>>(path: P) -> MinutiaeResult<DecodedTemplate> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Writes an encoded template buffer to `path`.
pub fn write_template<P: AsRef<Path>>(path: P, bytes: &[u8]) -> MinutiaeResult<()> {
    fs::write(path, bytes)?;
    Ok(())
}

/// Encodes `minutiae` and writes the template; returns the encoded size.
///
/// The file is not touched if encoding fails.
pub fn save_template<'a, P, I>(
    path: P,
    minutiae: I,
    dims: ImageDims,
    cfg: &EncodeConfig,
) -> MinutiaeResult<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Minutia>,
    I::IntoIter: ExactSizeIterator,
{
    let bytes = encode(minutiae, dims, cfg)?;
    write_template(path, &bytes)?;
    Ok(bytes.len())
}

/// Writes the plain-text export to `path`.
pub fn write_text_export<'a, P, I>(path: P, minutiae: I) -> MinutiaeResult<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Minutia>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write_text(&mut writer, minutiae)
}
