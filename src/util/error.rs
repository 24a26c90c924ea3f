//! Error types for minutiae.

use thiserror::Error;

/// Result alias for minutiae operations.
pub type MinutiaeResult<T> = std::result::Result<T, MinutiaeError>;

/// Errors that can occur when editing or serializing minutiae.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinutiaeError {
    /// The template buffer is too short or its layout is inconsistent.
    #[error("malformed template: {reason}")]
    MalformedTemplate { reason: &'static str },
    /// The record count field is one byte wide.
    #[error("too many minutiae: {count} (max {max})")]
    TooManyMinutiae { count: usize, max: usize },
    /// A position lies outside the attached image.
    #[error("position ({x}, {y}) outside image {width}x{height}")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
    /// A positional index no longer refers to an entity.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// Angles are stored as whole degrees in [0, 360).
    #[error("angle {angle} outside [0, 360)")]
    AngleOutOfRange { angle: u32 },
    /// Raw quality grades are limited to [0, 100].
    #[error("quality {value} outside [0, 100]")]
    QualityOutOfRange { value: u32 },
    /// A value does not fit the width of its record field.
    #[error("{field} value {value} exceeds field maximum {max}")]
    FieldOverflow {
        field: &'static str,
        value: u32,
        max: u32,
    },
    /// Image dimensions must be non-zero.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// A text token could not be parsed.
    #[error("invalid {what} token: {token:?}")]
    InvalidToken { what: &'static str, token: String },
    /// Image decoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
    /// Reading or writing a file failed.
    #[error("io error: {reason}")]
    Io { reason: String },
}

impl From<std::io::Error> for MinutiaeError {
    fn from(err: std::io::Error) -> Self {
        MinutiaeError::Io {
            reason: err.to_string(),
        }
    }
}
