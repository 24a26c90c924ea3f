//! The minutia value type shared by the registry and the template codec.

mod quality;

pub use quality::{Grade, Quality, MAX_RAW_QUALITY};

use crate::geometry::Point;
use crate::util::{MinutiaeError, MinutiaeResult};
use std::fmt;
use std::str::FromStr;

/// Classification of a minutia.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MinutiaKind {
    Other,
    #[default]
    RidgeEnding,
    Bifurcation,
}

impl MinutiaKind {
    /// Returns the 2-bit code used in minutia records.
    pub fn code(self) -> u8 {
        match self {
            MinutiaKind::Other => 0,
            MinutiaKind::RidgeEnding => 1,
            MinutiaKind::Bifurcation => 2,
        }
    }

    /// Maps a 2-bit record code to a kind; the reserved code 3 yields `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code & 0b11 {
            0 => Some(MinutiaKind::Other),
            1 => Some(MinutiaKind::RidgeEnding),
            2 => Some(MinutiaKind::Bifurcation),
            _ => None,
        }
    }
}

impl fmt::Display for MinutiaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MinutiaKind::Other => "other",
            MinutiaKind::RidgeEnding => "ending",
            MinutiaKind::Bifurcation => "bifurcation",
        })
    }
}

impl FromStr for MinutiaKind {
    type Err = MinutiaeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "other" => Ok(MinutiaKind::Other),
            "ending" => Ok(MinutiaKind::RidgeEnding),
            "bifurcation" => Ok(MinutiaKind::Bifurcation),
            _ => Err(MinutiaeError::InvalidToken {
                what: "kind",
                token: s.to_string(),
            }),
        }
    }
}

/// Stable identifier assigned by a registry when a minutia enters it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinutiaId(pub(crate) u64);

impl MinutiaId {
    /// Returns the numeric value of the identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// One annotated fingerprint feature.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Minutia {
    pub kind: MinutiaKind,
    /// Column in image pixels.
    pub x: u16,
    /// Row in image pixels.
    pub y: u16,
    /// Ridge orientation in whole degrees, [0, 360).
    pub angle: u16,
    pub quality: Quality,
}

impl Minutia {
    /// Creates a minutia from its fields.
    pub fn new(kind: MinutiaKind, x: u16, y: u16, angle: u16, quality: Quality) -> Self {
        Self {
            kind,
            x,
            y,
            angle,
            quality,
        }
    }

    /// Returns the position as a model-space point.
    pub fn position(&self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }

    /// Checks the angle and quality ranges.
    pub fn validate(&self) -> MinutiaeResult<()> {
        if self.angle >= 360 {
            return Err(MinutiaeError::AngleOutOfRange {
                angle: u32::from(self.angle),
            });
        }
        if let Quality::Raw(value) = self.quality {
            Quality::from_raw(value)?;
        }
        Ok(())
    }
}
