//! Minutiae is a small library for annotating fingerprint images with
//! minutiae and storing them as binary finger minutiae records.
//!
//! The [`Registry`] holds the annotation set and answers the geometric
//! queries an interactive editor needs; the [`template`] module reads and
//! writes the record format. Rendering and input handling are left to the
//! caller, which talks to this crate in image (model) coordinates.

pub mod geometry;
pub mod image;
pub mod io;
pub mod lowlevel;
pub mod minutia;
pub mod registry;
pub mod template;
mod trace;
pub mod util;

pub use geometry::Point;
pub use crate::image::ImageDims;
pub use minutia::{Grade, Minutia, MinutiaId, MinutiaKind, Quality};
pub use registry::{
    DragState, Editor, HitConfig, HitKind, MarkDefaults, MinutiaUpdate, Registry,
};
pub use template::{
    decode, encode, DecodeWarning, DecodedTemplate, EncodeConfig, TemplateHeader, MAX_MINUTIAE,
};
pub use util::{MinutiaeError, MinutiaeResult};
