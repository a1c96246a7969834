use core::fmt;
use std::io;
use std::path::PathBuf;

use crate::params::ProjectionKind;

#[derive(Debug)]
pub enum ParseError {
    Io { path: PathBuf, source: io::Error },
    /// Malformed XML.
    Xml(String),
    /// Element content that does not parse as the expected type.
    InvalidValue { tag: &'static str, value: String },
    MissingField { tag: &'static str },
    UnknownProjection(String),
    /// No `<camera>` matches the requested name and sizes.
    CameraNotFound { name: String },
    /// Matching cameras exist but none carries the requested model.
    ProjectionNotFound {
        name: String,
        projection: ProjectionKind,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Xml(msg) => write!(f, "malformed xml: {msg}"),
            Self::InvalidValue { tag, value } => {
                write!(f, "invalid value {value:?} in <{tag}>")
            }
            Self::MissingField { tag } => write!(f, "missing <{tag}> element"),
            Self::UnknownProjection(name) => write!(f, "unknown projection model {name:?}"),
            Self::CameraNotFound { name } => {
                write!(f, "no camera parameters available for camera {name:?}")
            }
            Self::ProjectionNotFound { name, projection } => {
                write!(f, "camera {name:?} has no {projection} model")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum WriteError {
    Io { path: PathBuf, source: io::Error },
    Serialize(String),
    /// The XML writer failed while encoding the document.
    Encode(io::Error),
    /// The file to update exists but could not be parsed.
    Existing(ParseError),
    /// The camera already holds a model of this kind.
    ModelExists {
        name: String,
        projection: ProjectionKind,
    },
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot write {}: {source}", path.display()),
            Self::Serialize(msg) => write!(f, "cannot serialize camera parameters: {msg}"),
            Self::Encode(err) => write!(f, "cannot encode camera parameters: {err}"),
            Self::Existing(err) => write!(f, "cannot update existing file: {err}"),
            Self::ModelExists { name, projection } => {
                write!(f, "camera {name:?} already has a {projection} model")
            }
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::Encode(source) => Some(source),
            Self::Existing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for WriteError {
    fn from(err: io::Error) -> Self {
        Self::Encode(err)
    }
}

impl From<quick_xml::Error> for WriteError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}
