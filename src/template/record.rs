//! Six-byte minutia records.
//!
//! ```text
//! byte 0   kk xxxxxx   kind code (2 bits), x bits 13..8
//! byte 1   xxxxxxxx    x bits 7..0
//! byte 2-3             y, big-endian
//! byte 4               quantized angle
//! byte 5               raw quality [0, 100]
//! ```

use crate::geometry::{dequantize_byte_to_angle, quantize_angle_to_byte};
use crate::minutia::{Minutia, MinutiaKind, Quality, MAX_RAW_QUALITY};
use crate::util::{MinutiaeError, MinutiaeResult};

/// Size of one record in bytes.
pub const RECORD_LEN: usize = 6;

/// Largest x coordinate representable in the 14-bit field.
pub const MAX_RECORD_X: u16 = 0x3FFF;

/// Kind code reserved by the format and not produced by the encoder.
pub const RESERVED_KIND_CODE: u8 = 3;

/// Field-level view of a minutia record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MinutiaRecord {
    pub kind_code: u8,
    pub x: u16,
    pub y: u16,
    pub angle_byte: u8,
    pub quality: u8,
}

impl MinutiaRecord {
    /// Builds the record for a minutia, checking that every field fits.
    pub fn from_minutia(minutia: &Minutia) -> MinutiaeResult<Self> {
        minutia.validate()?;
        if minutia.x > MAX_RECORD_X {
            return Err(MinutiaeError::FieldOverflow {
                field: "x",
                value: u32::from(minutia.x),
                max: u32::from(MAX_RECORD_X),
            });
        }
        Ok(Self {
            kind_code: minutia.kind.code(),
            x: minutia.x,
            y: minutia.y,
            angle_byte: quantize_angle_to_byte(minutia.angle),
            quality: minutia.quality.raw(),
        })
    }

    /// Splits a record into its fields.
    pub fn from_bytes(bytes: [u8; RECORD_LEN]) -> Self {
        Self {
            kind_code: bytes[0] >> 6,
            x: u16::from_be_bytes([bytes[0] & 0x3F, bytes[1]]),
            y: u16::from_be_bytes([bytes[2], bytes[3]]),
            angle_byte: bytes[4],
            quality: bytes[5],
        }
    }

    /// Packs the fields into their wire layout.
    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let [x_hi, x_lo] = (self.x & MAX_RECORD_X).to_be_bytes();
        let [y_hi, y_lo] = self.y.to_be_bytes();
        [
            (self.kind_code & 0b11) << 6 | x_hi,
            x_lo,
            y_hi,
            y_lo,
            self.angle_byte,
            self.quality,
        ]
    }

    /// Returns true if the record carries the reserved kind code.
    pub fn has_reserved_kind(&self) -> bool {
        self.kind_code == RESERVED_KIND_CODE
    }

    /// Converts the record into a minutia.
    ///
    /// The reserved kind code is read as a bifurcation, quality 0 as
    /// `NotSet`, and raw qualities above 100 are clamped. [`crate::decode`]
    /// reports both substitutions as warnings.
    pub fn to_minutia(&self) -> Minutia {
        let kind = MinutiaKind::from_code(self.kind_code).unwrap_or(MinutiaKind::Bifurcation);
        let quality = match self.quality {
            0 => Quality::default(),
            value => Quality::Raw(value.min(MAX_RAW_QUALITY)),
        };
        Minutia {
            kind,
            x: self.x,
            y: self.y,
            angle: dequantize_byte_to_angle(self.angle_byte),
            quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MinutiaRecord;
    use crate::minutia::{Grade, Minutia, MinutiaKind, Quality};
    use crate::util::MinutiaeError;

    #[test]
    fn packs_kind_into_top_bits() {
        let m = Minutia::new(
            MinutiaKind::RidgeEnding,
            100,
            150,
            90,
            Quality::Grade(Grade::NotSet),
        );
        let record = MinutiaRecord::from_minutia(&m).unwrap();
        assert_eq!(record.to_bytes(), [0x40, 0x64, 0x00, 0x96, 0x40, 0x00]);
    }

    #[test]
    fn splits_wide_x_across_two_bytes() {
        let record = MinutiaRecord::from_bytes([0xBF, 0xFF, 0x12, 0x34, 0x80, 0x3C]);
        assert_eq!(record.kind_code, 2);
        assert_eq!(record.x, 0x3FFF);
        assert_eq!(record.y, 0x1234);
        let m = record.to_minutia();
        assert_eq!(m.kind, MinutiaKind::Bifurcation);
        assert_eq!(m.angle, 180);
        assert_eq!(m.quality, Quality::Grade(Grade::Good));
    }

    #[test]
    fn reserved_code_reads_as_bifurcation() {
        let record = MinutiaRecord::from_bytes([0xC0, 0x01, 0x00, 0x01, 0x00, 0x00]);
        assert!(record.has_reserved_kind());
        assert_eq!(record.to_minutia().kind, MinutiaKind::Bifurcation);
        assert_eq!(record.to_minutia().quality, Quality::default());
    }

    #[test]
    fn rejects_x_wider_than_fourteen_bits() {
        let m = Minutia::new(MinutiaKind::Other, 0x4000, 0, 0, Quality::default());
        assert_eq!(
            MinutiaRecord::from_minutia(&m).err(),
            Some(MinutiaeError::FieldOverflow {
                field: "x",
                value: 0x4000,
                max: 0x3FFF,
            })
        );
    }
}
