//! Binary finger minutiae record codec.
//!
//! The layout is big-endian: a fixed 28-byte header, one 6-byte record per
//! minutia, then a 2-byte extension block length that is always written as
//! zero. Decoding trusts the declared minutiae count to know how many records
//! follow; the declared total length is only cross-checked.

mod record;
mod text;

pub use record::{MinutiaRecord, MAX_RECORD_X, RECORD_LEN, RESERVED_KIND_CODE};
pub use text::{to_text, write_text};

use crate::image::ImageDims;
use crate::minutia::{Minutia, MAX_RAW_QUALITY};
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{MinutiaeError, MinutiaeResult};

/// Format identifier at offset 0.
pub const FORMAT_ID: [u8; 4] = *b"FMR\0";
/// Format version at offset 4.
pub const FORMAT_VERSION: [u8; 4] = *b" 20\0";
/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 28;
/// Size of the extension block length trailer in bytes.
pub const TRAILER_LEN: usize = 2;
/// The minutiae count field is a single byte.
pub const MAX_MINUTIAE: usize = 255;

/// Returns the encoded size of a template holding `count` minutiae.
pub fn encoded_len(count: usize) -> usize {
    HEADER_LEN + RECORD_LEN * count + TRAILER_LEN
}

/// Header values written at encode time that are not derived from the
/// minutiae or the image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeConfig {
    /// Horizontal resolution in pixels per centimeter.
    pub x_resolution: u16,
    /// Vertical resolution in pixels per centimeter.
    pub y_resolution: u16,
    /// Number of finger views in the record.
    pub view_count: u8,
    /// Overall fingerprint quality, [0, 100].
    pub finger_quality: u8,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            // 500 dpi
            x_resolution: 197,
            y_resolution: 197,
            view_count: 1,
            finger_quality: 100,
        }
    }
}

/// Decoded header fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateHeader {
    pub format: [u8; 4],
    pub version: [u8; 4],
    /// Declared total record length in bytes.
    pub record_length: u32,
    pub width: u16,
    pub height: u16,
    pub x_resolution: u16,
    pub y_resolution: u16,
    pub view_count: u8,
    pub finger_quality: u8,
    pub minutiae_count: u8,
}

impl TemplateHeader {
    /// Parses the fixed header from the start of `bytes`.
    pub fn read_from(bytes: &[u8]) -> MinutiaeResult<Self> {
        let b = bytes
            .get(..HEADER_LEN)
            .ok_or(MinutiaeError::MalformedTemplate {
                reason: "buffer shorter than the record header",
            })?;
        let format = [b[0], b[1], b[2], b[3]];
        if format != FORMAT_ID {
            return Err(MinutiaeError::MalformedTemplate {
                reason: "unrecognized format identifier",
            });
        }
        Ok(Self {
            format,
            version: [b[4], b[5], b[6], b[7]],
            record_length: u32::from_be_bytes([b[8], b[9], b[10], b[11]]),
            width: u16::from_be_bytes([b[14], b[15]]),
            height: u16::from_be_bytes([b[16], b[17]]),
            x_resolution: u16::from_be_bytes([b[18], b[19]]),
            y_resolution: u16::from_be_bytes([b[20], b[21]]),
            view_count: b[22],
            finger_quality: b[26],
            minutiae_count: b[27],
        })
    }

    /// Appends the 28 header bytes to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.format);
        out.extend_from_slice(&self.version);
        out.extend_from_slice(&self.record_length.to_be_bytes());
        out.extend_from_slice(&[0, 0]);
        out.extend_from_slice(&self.width.to_be_bytes());
        out.extend_from_slice(&self.height.to_be_bytes());
        out.extend_from_slice(&self.x_resolution.to_be_bytes());
        out.extend_from_slice(&self.y_resolution.to_be_bytes());
        out.push(self.view_count);
        out.push(0);
        out.extend_from_slice(&[0, 0]);
        out.push(self.finger_quality);
        out.push(self.minutiae_count);
    }

    /// Returns the declared image dimensions, if both are non-zero.
    pub fn image_dims(&self) -> Option<ImageDims> {
        ImageDims::new(u32::from(self.width), u32::from(self.height)).ok()
    }
}

/// Non-fatal anomalies found while decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeWarning {
    /// A record used the reserved kind code; it was read as a bifurcation.
    ReservedKindCode { record: usize },
    /// The declared total length disagrees with the declared minutiae count.
    LengthMismatch { declared: u32, expected: u32 },
    /// A record quality byte exceeded 100; it was read as 100.
    QualityOutOfRange { record: usize, value: u8 },
}

/// Result of decoding a template buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedTemplate {
    pub header: TemplateHeader,
    /// Minutiae in record order.
    pub minutiae: Vec<Minutia>,
    pub warnings: Vec<DecodeWarning>,
}

/// Decodes a finger minutiae record.
pub fn decode(buffer: &[u8]) -> MinutiaeResult<DecodedTemplate> {
    let _span = trace_span!("decode", bytes = buffer.len()).entered();

    let header = TemplateHeader::read_from(buffer)?;
    let count = usize::from(header.minutiae_count);
    let records_end = HEADER_LEN + RECORD_LEN * count;
    let records = buffer
        .get(HEADER_LEN..records_end)
        .ok_or(MinutiaeError::MalformedTemplate {
            reason: "buffer shorter than the declared minutiae records",
        })?;

    let mut warnings = Vec::new();
    let expected = encoded_len(count) as u32;
    if header.record_length != expected {
        trace_warn!(
            "template_length_mismatch",
            declared = header.record_length,
            expected = expected
        );
        warnings.push(DecodeWarning::LengthMismatch {
            declared: header.record_length,
            expected,
        });
    }

    let mut minutiae = Vec::with_capacity(count);
    for (idx, chunk) in records.chunks_exact(RECORD_LEN).enumerate() {
        let record = MinutiaRecord::from_bytes([
            chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5],
        ]);
        if record.has_reserved_kind() {
            trace_warn!("reserved_kind_code", record = idx);
            warnings.push(DecodeWarning::ReservedKindCode { record: idx });
        }
        if record.quality > MAX_RAW_QUALITY {
            trace_warn!("quality_out_of_range", record = idx, value = record.quality);
            warnings.push(DecodeWarning::QualityOutOfRange {
                record: idx,
                value: record.quality,
            });
        }
        minutiae.push(record.to_minutia());
    }

    trace_event!("template_decoded", count = minutiae.len());
    Ok(DecodedTemplate {
        header,
        minutiae,
        warnings,
    })
}

/// Encodes minutiae, in iteration order, into a finger minutiae record.
///
/// Every position must lie inside `dims`, the image size written to the
/// header.
pub fn encode<'a, I>(minutiae: I, dims: ImageDims, cfg: &EncodeConfig) -> MinutiaeResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a Minutia>,
    I::IntoIter: ExactSizeIterator,
{
    let minutiae = minutiae.into_iter();
    let count = minutiae.len();
    let _span = trace_span!("encode", count = count).entered();

    if count > MAX_MINUTIAE {
        return Err(MinutiaeError::TooManyMinutiae {
            count,
            max: MAX_MINUTIAE,
        });
    }
    if cfg.finger_quality > 100 {
        return Err(MinutiaeError::QualityOutOfRange {
            value: u32::from(cfg.finger_quality),
        });
    }

    let header = TemplateHeader {
        format: FORMAT_ID,
        version: FORMAT_VERSION,
        record_length: encoded_len(count) as u32,
        width: header_u16("image width", dims.width())?,
        height: header_u16("image height", dims.height())?,
        x_resolution: cfg.x_resolution,
        y_resolution: cfg.y_resolution,
        view_count: cfg.view_count,
        finger_quality: cfg.finger_quality,
        minutiae_count: count as u8,
    };

    let mut out = Vec::with_capacity(encoded_len(count));
    header.write_to(&mut out);
    for minutia in minutiae {
        dims.check(i64::from(minutia.x), i64::from(minutia.y))?;
        out.extend_from_slice(&MinutiaRecord::from_minutia(minutia)?.to_bytes());
    }
    out.extend_from_slice(&[0u8; TRAILER_LEN]);

    trace_event!("template_encoded", bytes = out.len());
    Ok(out)
}

fn header_u16(field: &'static str, value: u32) -> MinutiaeResult<u16> {
    u16::try_from(value).map_err(|_| MinutiaeError::FieldOverflow {
        field,
        value,
        max: u32::from(u16::MAX),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minutia::{Grade, MinutiaKind, Quality};

    fn sample() -> Minutia {
        Minutia::new(
            MinutiaKind::RidgeEnding,
            100,
            150,
            90,
            Quality::Grade(Grade::NotSet),
        )
    }

    #[test]
    fn header_layout_matches_offsets() {
        let dims = ImageDims::new(200, 300).unwrap();
        let bytes = encode(&[sample()], dims, &EncodeConfig::default()).unwrap();
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[0..4], b"FMR\0");
        assert_eq!(&bytes[4..8], b" 20\0");
        assert_eq!(&bytes[8..12], &[0, 0, 0, 36]);
        assert_eq!(&bytes[12..14], &[0, 0]);
        assert_eq!(&bytes[14..18], &[0, 200, 1, 44]);
        assert_eq!(&bytes[18..22], &[0, 197, 0, 197]);
        assert_eq!(&bytes[22..27], &[1, 0, 0, 0, 100]);
        assert_eq!(bytes[27], 1);
        assert_eq!(&bytes[34..36], &[0, 0]);
    }

    #[test]
    fn decode_flags_length_mismatch() {
        let dims = ImageDims::new(200, 300).unwrap();
        let mut bytes = encode(&[sample()], dims, &EncodeConfig::default()).unwrap();
        bytes[11] = 40;
        let decoded = decode(&bytes).unwrap();
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::LengthMismatch {
                declared: 40,
                expected: 36,
            }]
        );
        assert_eq!(decoded.minutiae, vec![sample()]);
    }

    #[test]
    fn decode_rejects_unknown_format() {
        let mut bytes = vec![0u8; 30];
        bytes[..4].copy_from_slice(b"XYZ\0");
        assert!(matches!(
            decode(&bytes),
            Err(MinutiaeError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn encode_rejects_positions_outside_declared_image() {
        let dims = ImageDims::new(10, 10).unwrap();
        let far = Minutia::new(MinutiaKind::Other, 500, 900, 0, Quality::default());
        assert_eq!(
            encode(&[far], dims, &EncodeConfig::default()).err(),
            Some(MinutiaeError::OutOfBounds {
                x: 500,
                y: 900,
                width: 10,
                height: 10,
            })
        );
    }

    #[test]
    fn encode_rejects_oversized_image() {
        let dims = ImageDims::new(70_000, 10).unwrap();
        let err = encode(std::iter::empty::<&Minutia>(), dims, &EncodeConfig::default()).err();
        assert_eq!(
            err,
            Some(MinutiaeError::FieldOverflow {
                field: "image width",
                value: 70_000,
                max: 65_535,
            })
        );
    }
}
