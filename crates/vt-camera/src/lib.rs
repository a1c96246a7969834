//! Camera intrinsic parameters and their XML persistence.
//!
//! A parameter file holds any number of `<camera>` elements, each identified
//! by name and image size and carrying one `<model>` per projection kind.
//! [`parse`] selects one camera/model pair; [`save`] adds a pair to a file,
//! creating it when needed.

mod document;
mod error;
mod params;
mod tag;

use std::path::Path;

use log::debug;

pub use document::{CameraFile, CameraQuery, CameraRecord};
pub use error::{ParseError, WriteError};
pub use params::{CameraParameters, ProjectionKind, ProjectionModel};
pub use tag::XmlTag;

/// Reads `path` and returns the parameters selected by `query`.
pub fn parse(path: impl AsRef<Path>, query: &CameraQuery) -> Result<CameraParameters, ParseError> {
    CameraFile::load(path.as_ref())?.find(query)
}

/// Stores `params` in `path`.
///
/// An existing file is updated in place: the model is added to the camera
/// with the same name and image size, or a new camera is appended.
pub fn save(path: impl AsRef<Path>, params: &CameraParameters) -> Result<(), WriteError> {
    let path = path.as_ref();
    let mut file = if path.exists() {
        CameraFile::load(path).map_err(WriteError::Existing)?
    } else {
        debug!("creating camera parameter file {}", path.display());
        CameraFile::default()
    };
    file.insert(params)?;
    file.store(path)
}
