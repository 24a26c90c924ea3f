//! Record-level building blocks for custom readers and writers.
//!
//! Most users should prefer [`crate::decode`] and [`crate::encode`].

pub use crate::geometry::{
    dequantize_byte_to_angle, quantize_angle_to_byte, ANGLE_BUCKETS, DEGREES_PER_BUCKET,
};
pub use crate::template::{
    encoded_len, MinutiaRecord, TemplateHeader, FORMAT_ID, FORMAT_VERSION, HEADER_LEN,
    MAX_RECORD_X, RECORD_LEN, RESERVED_KIND_CODE, TRAILER_LEN,
};
