/// Element kinds recognised in a camera-parameter file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlTag {
    Root,
    Camera,
    CameraName,
    ImageWidth,
    ImageHeight,
    SubsamplingWidth,
    SubsamplingHeight,
    FullWidth,
    FullHeight,
    Model,
    ModelType,
    Px,
    Py,
    U0,
    V0,
    Kud,
    Kdu,
    /// Any element not listed above; its content is ignored.
    Other,
}

impl XmlTag {
    pub fn from_name(name: &[u8]) -> Self {
        match name {
            b"root" => Self::Root,
            b"camera" => Self::Camera,
            b"name" => Self::CameraName,
            b"image_width" => Self::ImageWidth,
            b"image_height" => Self::ImageHeight,
            b"subsampling_width" => Self::SubsamplingWidth,
            b"subsampling_height" => Self::SubsamplingHeight,
            b"full_width" => Self::FullWidth,
            b"full_height" => Self::FullHeight,
            b"model" => Self::Model,
            b"type" => Self::ModelType,
            b"px" => Self::Px,
            b"py" => Self::Py,
            b"u0" => Self::U0,
            b"v0" => Self::V0,
            b"kud" => Self::Kud,
            b"kdu" => Self::Kdu,
            _ => Self::Other,
        }
    }

    /// Element name as written; `Other` has none.
    pub fn name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Camera => "camera",
            Self::CameraName => "name",
            Self::ImageWidth => "image_width",
            Self::ImageHeight => "image_height",
            Self::SubsamplingWidth => "subsampling_width",
            Self::SubsamplingHeight => "subsampling_height",
            Self::FullWidth => "full_width",
            Self::FullHeight => "full_height",
            Self::Model => "model",
            Self::ModelType => "type",
            Self::Px => "px",
            Self::Py => "py",
            Self::U0 => "u0",
            Self::V0 => "v0",
            Self::Kud => "kud",
            Self::Kdu => "kdu",
            Self::Other => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::XmlTag;

    #[test]
    fn lookup_inverts_name() {
        let all = [
            XmlTag::Root,
            XmlTag::Camera,
            XmlTag::CameraName,
            XmlTag::ImageWidth,
            XmlTag::ImageHeight,
            XmlTag::SubsamplingWidth,
            XmlTag::SubsamplingHeight,
            XmlTag::FullWidth,
            XmlTag::FullHeight,
            XmlTag::Model,
            XmlTag::ModelType,
            XmlTag::Px,
            XmlTag::Py,
            XmlTag::U0,
            XmlTag::V0,
            XmlTag::Kud,
            XmlTag::Kdu,
        ];
        for tag in all {
            assert_eq!(XmlTag::from_name(tag.name().as_bytes()), tag);
        }
    }

    #[test]
    fn unknown_names_are_other() {
        assert_eq!(XmlTag::from_name(b"comment"), XmlTag::Other);
        assert_eq!(XmlTag::from_name(b"Camera"), XmlTag::Other);
        assert_eq!(XmlTag::from_name(b""), XmlTag::Other);
    }
}
