//! Quality grades and their raw byte representation.

use crate::util::{MinutiaeError, MinutiaeResult};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Largest raw quality value a record can carry.
pub const MAX_RAW_QUALITY: u8 = 100;

/// Semantic quality grades in ascending order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    #[default]
    NotSet,
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl Grade {
    /// All grades in ascending order.
    pub const ALL: [Grade; 6] = [
        Grade::NotSet,
        Grade::Poor,
        Grade::Fair,
        Grade::Good,
        Grade::VeryGood,
        Grade::Excellent,
    ];

    /// Returns the raw value this grade is stored as.
    pub fn raw(self) -> u8 {
        match self {
            Grade::NotSet => 0,
            Grade::Poor => 20,
            Grade::Fair => 40,
            Grade::Good => 60,
            Grade::VeryGood => 80,
            Grade::Excellent => 100,
        }
    }

    /// Returns the grade whose raw value is closest to `value`.
    ///
    /// Ties resolve to the higher grade.
    pub fn nearest(value: u8) -> Grade {
        let mut best = Grade::NotSet;
        let mut best_dist = u8::MAX;
        for grade in Grade::ALL {
            let dist = grade.raw().abs_diff(value);
            if dist <= best_dist {
                best_dist = dist;
                best = grade;
            }
        }
        best
    }

    fn token(self) -> &'static str {
        match self {
            Grade::NotSet => "not set",
            Grade::Poor => "poor",
            Grade::Fair => "fair",
            Grade::Good => "good",
            Grade::VeryGood => "very good",
            Grade::Excellent => "excellent",
        }
    }
}

/// Per-minutia quality, either a semantic grade or a raw value in [0, 100].
///
/// Equality and hashing go through [`Quality::raw`], so `Grade::Good` and
/// `Raw(60)` compare equal.
#[derive(Copy, Clone, Debug)]
pub enum Quality {
    Grade(Grade),
    Raw(u8),
}

impl Quality {
    /// Creates a raw quality, rejecting values above 100.
    pub fn from_raw(value: u8) -> MinutiaeResult<Self> {
        if value > MAX_RAW_QUALITY {
            return Err(MinutiaeError::QualityOutOfRange {
                value: u32::from(value),
            });
        }
        Ok(Quality::Raw(value))
    }

    /// Returns the byte written to a minutia record.
    pub fn raw(self) -> u8 {
        match self {
            Quality::Grade(grade) => grade.raw(),
            Quality::Raw(value) => value.min(MAX_RAW_QUALITY),
        }
    }

    /// Returns the semantic grade closest to this quality.
    pub fn to_grade(self) -> Grade {
        match self {
            Quality::Grade(grade) => grade,
            Quality::Raw(value) => Grade::nearest(value),
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::Grade(Grade::NotSet)
    }
}

impl From<Grade> for Quality {
    fn from(grade: Grade) -> Self {
        Quality::Grade(grade)
    }
}

impl PartialEq for Quality {
    fn eq(&self, other: &Self) -> bool {
        self.raw() == other.raw()
    }
}

impl Eq for Quality {}

impl Hash for Quality {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw().hash(state);
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Grade(grade) => f.write_str(grade.token()),
            Quality::Raw(value) => write!(f, "{value}"),
        }
    }
}

impl FromStr for Quality {
    type Err = MinutiaeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if let Some(grade) = Grade::ALL.into_iter().find(|g| g.token() == token) {
            return Ok(Quality::Grade(grade));
        }
        let value: u32 = token.parse().map_err(|_| MinutiaeError::InvalidToken {
            what: "quality",
            token: s.to_string(),
        })?;
        let value = u8::try_from(value).map_err(|_| MinutiaeError::QualityOutOfRange { value })?;
        Quality::from_raw(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Grade, Quality};

    #[test]
    fn nearest_grade_prefers_higher_on_ties() {
        assert_eq!(Grade::nearest(0), Grade::NotSet);
        assert_eq!(Grade::nearest(9), Grade::NotSet);
        assert_eq!(Grade::nearest(10), Grade::Poor);
        assert_eq!(Grade::nearest(55), Grade::Good);
        assert_eq!(Grade::nearest(100), Grade::Excellent);
    }

    #[test]
    fn grade_and_raw_compare_equal() {
        assert_eq!(Quality::Grade(Grade::Good), Quality::Raw(60));
        assert_ne!(Quality::Grade(Grade::Good), Quality::Raw(61));
        assert_eq!(Quality::Raw(73).to_grade(), Grade::VeryGood);
    }

    #[test]
    fn tokens_parse_and_display() {
        let q: Quality = "very good".parse().unwrap();
        assert_eq!(q.to_string(), "very good");
        let q: Quality = "42".parse().unwrap();
        assert_eq!(q.to_string(), "42");
        assert!("101".parse::<Quality>().is_err());
        assert!("great".parse::<Quality>().is_err());
        assert_eq!(Quality::default().to_string(), "not set");
    }
}
