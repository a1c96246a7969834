use core::fmt;

use serde::{Deserialize, Serialize};

/// Which intrinsic model a `<model>` element describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectionKind {
    WithoutDistortion,
    WithDistortion,
}

impl ProjectionKind {
    /// Value of the `<type>` element.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WithoutDistortion => "perspectiveProjWithoutDistortion",
            Self::WithDistortion => "perspectiveProjWithDistortion",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "perspectiveProjWithoutDistortion" => Some(Self::WithoutDistortion),
            "perspectiveProjWithDistortion" => Some(Self::WithDistortion),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Perspective projection intrinsics.
///
/// `px`, `py` are the focal lengths in pixels, `(u0, v0)` the principal
/// point. `kud` maps undistorted to distorted coordinates and `kdu` the
/// reverse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProjectionModel {
    WithoutDistortion {
        px: f64,
        py: f64,
        u0: f64,
        v0: f64,
    },
    WithDistortion {
        px: f64,
        py: f64,
        u0: f64,
        v0: f64,
        kud: f64,
        kdu: f64,
    },
}

impl ProjectionModel {
    pub fn kind(&self) -> ProjectionKind {
        match self {
            Self::WithoutDistortion { .. } => ProjectionKind::WithoutDistortion,
            Self::WithDistortion { .. } => ProjectionKind::WithDistortion,
        }
    }

    pub fn px(&self) -> f64 {
        match *self {
            Self::WithoutDistortion { px, .. } | Self::WithDistortion { px, .. } => px,
        }
    }

    pub fn py(&self) -> f64 {
        match *self {
            Self::WithoutDistortion { py, .. } | Self::WithDistortion { py, .. } => py,
        }
    }

    pub fn u0(&self) -> f64 {
        match *self {
            Self::WithoutDistortion { u0, .. } | Self::WithDistortion { u0, .. } => u0,
        }
    }

    pub fn v0(&self) -> f64 {
        match *self {
            Self::WithoutDistortion { v0, .. } | Self::WithDistortion { v0, .. } => v0,
        }
    }

    /// Zero for the model without distortion.
    pub fn kud(&self) -> f64 {
        match *self {
            Self::WithoutDistortion { .. } => 0.0,
            Self::WithDistortion { kud, .. } => kud,
        }
    }

    /// Zero for the model without distortion.
    pub fn kdu(&self) -> f64 {
        match *self {
            Self::WithoutDistortion { .. } => 0.0,
            Self::WithDistortion { kdu, .. } => kdu,
        }
    }
}

/// Intrinsics of a named camera at a given image size.
///
/// An image width or height of `0` means the size is unspecified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraParameters {
    pub name: String,
    pub image_width: u32,
    pub image_height: u32,
    pub model: ProjectionModel,
}

impl fmt::Display for CameraParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.model;
        match m.kind() {
            ProjectionKind::WithoutDistortion => {
                writeln!(f, "Camera parameters for perspective projection without distortion:")?
            }
            ProjectionKind::WithDistortion => {
                writeln!(f, "Camera parameters for perspective projection with distortion:")?
            }
        }
        writeln!(f, "  name = {}", self.name)?;
        writeln!(f, "  image = {}x{}", self.image_width, self.image_height)?;
        writeln!(f, "  px = {}\t py = {}", m.px(), m.py())?;
        write!(f, "  u0 = {}\t v0 = {}", m.u0(), m.v0())?;
        if let ProjectionModel::WithDistortion { kud, kdu, .. } = m {
            write!(f, "\n  kud = {kud}\n  kdu = {kdu}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraParameters, ProjectionKind, ProjectionModel};

    #[test]
    fn kind_names_round_trip() {
        for kind in [ProjectionKind::WithoutDistortion, ProjectionKind::WithDistortion] {
            assert_eq!(ProjectionKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(ProjectionKind::from_name("fisheye"), None);
    }

    #[test]
    fn accessors_cover_both_models() {
        let plain = ProjectionModel::WithoutDistortion {
            px: 1.0,
            py: 2.0,
            u0: 3.0,
            v0: 4.0,
        };
        assert_eq!(plain.kind(), ProjectionKind::WithoutDistortion);
        assert_eq!((plain.px(), plain.py(), plain.u0(), plain.v0()), (1.0, 2.0, 3.0, 4.0));
        assert_eq!(plain.kud(), 0.0);

        let dist = ProjectionModel::WithDistortion {
            px: 1.0,
            py: 2.0,
            u0: 3.0,
            v0: 4.0,
            kud: -0.2,
            kdu: 0.21,
        };
        assert_eq!(dist.kind(), ProjectionKind::WithDistortion);
        assert_eq!((dist.kud(), dist.kdu()), (-0.2, 0.21));
    }

    #[test]
    fn display_lists_distortion_terms() {
        let cam = CameraParameters {
            name: "cam".into(),
            image_width: 640,
            image_height: 480,
            model: ProjectionModel::WithDistortion {
                px: 1089.9,
                py: 1090.1,
                u0: 326.1,
                v0: 230.5,
                kud: -0.196,
                kdu: 0.204,
            },
        };
        let text = cam.to_string();
        assert!(text.starts_with("Camera parameters for perspective projection with distortion:"));
        assert!(text.contains("px = 1089.9"));
        assert!(text.contains("kdu = 0.204"));
    }

    #[test]
    fn serializes_to_json() {
        let cam = CameraParameters {
            name: "cam".into(),
            image_width: 320,
            image_height: 240,
            model: ProjectionModel::WithoutDistortion {
                px: 563.2,
                py: 564.1,
                u0: 162.3,
                v0: 122.4,
            },
        };
        let json = serde_json::to_value(&cam).expect("serializable");
        assert_eq!(json["model"]["type"], "WithoutDistortion");
        assert_eq!(json["model"]["u0"], 162.3);
        let back: CameraParameters = serde_json::from_value(json).expect("deserializable");
        assert_eq!(back, cam);
    }
}
