//! Plain-text export, one `kind,x,y,angle,quality` line per minutia.

use crate::minutia::Minutia;
use crate::util::MinutiaeResult;
use std::fmt::Write as _;
use std::io::Write;

/// Renders minutiae as comma-separated lines in iteration order.
pub fn to_text<'a, I>(minutiae: I) -> String
where
    I: IntoIterator<Item = &'a Minutia>,
{
    let mut out = String::new();
    for m in minutiae {
        let _ = writeln!(out, "{},{},{},{},{}", m.kind, m.x, m.y, m.angle, m.quality);
    }
    out
}

/// Writes the plain-text export to `writer`.
pub fn write_text<'a, W, I>(writer: &mut W, minutiae: I) -> MinutiaeResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Minutia>,
{
    writer.write_all(to_text(minutiae).as_bytes())?;
    writer.flush()?;
    Ok(())
}
