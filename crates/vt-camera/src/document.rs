//! In-memory form of a camera-parameter file.
//!
//! ```xml
//! <?xml version="1.0"?>
//! <root>
//!   <camera>
//!     <name>myCamera</name>
//!     <image_width>640</image_width>
//!     <image_height>480</image_height>
//!     <model>
//!       <type>perspectiveProjWithoutDistortion</type>
//!       <px>1129.0</px>
//!       <py>1130.6</py>
//!       <u0>317.9</u0>
//!       <v0>229.1</v0>
//!     </model>
//!   </camera>
//! </root>
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::{debug, warn};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{ParseError, WriteError};
use crate::params::{CameraParameters, ProjectionKind, ProjectionModel};
use crate::tag::XmlTag;

const DEFAULT_PX: f64 = 600.0;
const DEFAULT_PY: f64 = 600.0;
const DEFAULT_U0: f64 = 192.0;
const DEFAULT_V0: f64 = 144.0;

/// One `<camera>` element. Sizes of `0` were absent from the file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraRecord {
    pub name: String,
    pub image_width: u32,
    pub image_height: u32,
    pub subsampling_width: u32,
    pub subsampling_height: u32,
    pub full_width: u32,
    pub full_height: u32,
    pub models: Vec<ProjectionModel>,
}

impl CameraRecord {
    pub fn model(&self, kind: ProjectionKind) -> Option<&ProjectionModel> {
        self.models.iter().find(|m| m.kind() == kind)
    }

    fn matches(&self, query: &CameraQuery) -> bool {
        let size_ok = |wanted: Option<u32>, have: u32| wanted.is_none_or(|w| w == have);
        self.name == query.name
            && size_ok(query.image_width, self.image_width)
            && size_ok(query.image_height, self.image_height)
            && size_ok(query.subsampling_width, self.subsampling_width)
            && size_ok(query.subsampling_height, self.subsampling_height)
    }
}

/// Selects a camera and model in a [`CameraFile`].
///
/// Unset sizes match any value found in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraQuery {
    pub name: String,
    pub projection: ProjectionKind,
    pub image_width: Option<u32>,
    pub image_height: Option<u32>,
    pub subsampling_width: Option<u32>,
    pub subsampling_height: Option<u32>,
}

impl CameraQuery {
    pub fn new(name: impl Into<String>, projection: ProjectionKind) -> Self {
        Self {
            name: name.into(),
            projection,
            image_width: None,
            image_height: None,
            subsampling_width: None,
            subsampling_height: None,
        }
    }

    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_width = Some(width);
        self.image_height = Some(height);
        self
    }

    pub fn with_subsampling(mut self, width: u32, height: u32) -> Self {
        self.subsampling_width = Some(width);
        self.subsampling_height = Some(height);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraFile {
    pub cameras: Vec<CameraRecord>,
}

impl CameraFile {
    pub fn load(path: &Path) -> Result<Self, ParseError> {
        let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("parsing camera parameters from {}", path.display());
        Self::from_xml_str(&text)
    }

    pub fn from_xml_str(xml: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlTag> = Vec::new();
        let mut cameras = Vec::new();
        let mut camera: Option<CameraRecord> = None;
        let mut model: Option<ModelFields> = None;

        loop {
            match reader.read_event().map_err(|e| ParseError::Xml(e.to_string()))? {
                Event::Start(e) => {
                    let tag = XmlTag::from_name(e.name().as_ref());
                    match tag {
                        XmlTag::Camera if camera.is_none() => {
                            camera = Some(CameraRecord::default())
                        }
                        XmlTag::Model if camera.is_some() && model.is_none() => {
                            model = Some(ModelFields::default())
                        }
                        _ => {}
                    }
                    stack.push(tag);
                }
                Event::End(_) => match stack.pop() {
                    Some(XmlTag::Model) => {
                        if let (Some(fields), Some(cam)) = (model.take(), camera.as_mut()) {
                            cam.models.push(fields.build()?);
                        }
                    }
                    Some(XmlTag::Camera) => {
                        if let Some(cam) = camera.take() {
                            cameras.push(cam);
                        }
                    }
                    _ => {}
                },
                Event::Text(t) => {
                    let Some(&tag) = stack.last() else {
                        continue;
                    };
                    let text = t.unescape().map_err(|e| ParseError::Xml(e.to_string()))?;
                    if let Some(fields) = model.as_mut() {
                        fields.set(tag, &text)?;
                    } else if let Some(cam) = camera.as_mut() {
                        set_camera_field(cam, tag, &text)?;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Self { cameras })
    }

    /// Returns the parameters selected by `query`.
    ///
    /// When several cameras match, the first one in document order wins.
    pub fn find(&self, query: &CameraQuery) -> Result<CameraParameters, ParseError> {
        let headers: Vec<&CameraRecord> =
            self.cameras.iter().filter(|c| c.matches(query)).collect();
        if headers.is_empty() {
            return Err(ParseError::CameraNotFound {
                name: query.name.clone(),
            });
        }

        let mut found = headers
            .iter()
            .filter_map(|cam| cam.model(query.projection).map(|m| (*cam, *m)));
        let Some((cam, model)) = found.next() else {
            return Err(ParseError::ProjectionNotFound {
                name: query.name.clone(),
                projection: query.projection,
            });
        };
        let extra = found.count();
        if extra > 0 {
            warn!(
                "{} cameras named {:?} carry a {} model; using the first",
                extra + 1,
                query.name,
                query.projection
            );
        }

        Ok(CameraParameters {
            name: cam.name.clone(),
            image_width: cam.image_width,
            image_height: cam.image_height,
            model,
        })
    }

    /// Adds `params` to the camera with the same name and image size, or
    /// appends a new camera.
    pub fn insert(&mut self, params: &CameraParameters) -> Result<(), WriteError> {
        let kind = params.model.kind();
        let existing = self.cameras.iter_mut().find(|c| {
            c.name == params.name
                && c.image_width == params.image_width
                && c.image_height == params.image_height
                && c.subsampling_width == 0
                && c.subsampling_height == 0
        });

        match existing {
            Some(cam) if cam.model(kind).is_some() => Err(WriteError::ModelExists {
                name: params.name.clone(),
                projection: kind,
            }),
            Some(cam) => {
                cam.models.push(params.model);
                Ok(())
            }
            None => {
                self.cameras.push(CameraRecord {
                    name: params.name.clone(),
                    image_width: params.image_width,
                    image_height: params.image_height,
                    models: vec![params.model],
                    ..CameraRecord::default()
                });
                Ok(())
            }
        }
    }

    pub fn to_xml_string(&self) -> Result<String, WriteError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
        writer.write_event(Event::Start(BytesStart::new(XmlTag::Root.name())))?;
        for cam in &self.cameras {
            write_camera(&mut writer, cam)?;
        }
        writer.write_event(Event::End(BytesEnd::new(XmlTag::Root.name())))?;

        let mut bytes = writer.into_inner();
        bytes.write_all(b"\n").map_err(WriteError::Encode)?;
        String::from_utf8(bytes).map_err(|e| WriteError::Serialize(e.to_string()))
    }

    pub fn store(&self, path: &Path) -> Result<(), WriteError> {
        let xml = self.to_xml_string()?;
        fs::write(path, xml).map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("wrote {} camera(s) to {}", self.cameras.len(), path.display());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ModelFields {
    kind: Option<ProjectionKind>,
    px: Option<f64>,
    py: Option<f64>,
    u0: Option<f64>,
    v0: Option<f64>,
    kud: Option<f64>,
    kdu: Option<f64>,
}

impl ModelFields {
    fn set(&mut self, tag: XmlTag, text: &str) -> Result<(), ParseError> {
        match tag {
            XmlTag::ModelType => {
                let name = text.trim();
                self.kind = Some(
                    ProjectionKind::from_name(name)
                        .ok_or_else(|| ParseError::UnknownProjection(name.to_owned()))?,
                );
            }
            XmlTag::Px => self.px = Some(parse_value(tag, text)?),
            XmlTag::Py => self.py = Some(parse_value(tag, text)?),
            XmlTag::U0 => self.u0 = Some(parse_value(tag, text)?),
            XmlTag::V0 => self.v0 = Some(parse_value(tag, text)?),
            XmlTag::Kud => self.kud = Some(parse_value(tag, text)?),
            XmlTag::Kdu => self.kdu = Some(parse_value(tag, text)?),
            _ => {}
        }
        Ok(())
    }

    fn build(self) -> Result<ProjectionModel, ParseError> {
        let kind = self.kind.ok_or(ParseError::MissingField {
            tag: XmlTag::ModelType.name(),
        })?;
        let px = self.px.unwrap_or(DEFAULT_PX);
        let py = self.py.unwrap_or(DEFAULT_PY);
        let u0 = self.u0.unwrap_or(DEFAULT_U0);
        let v0 = self.v0.unwrap_or(DEFAULT_V0);
        Ok(match kind {
            ProjectionKind::WithoutDistortion => {
                ProjectionModel::WithoutDistortion { px, py, u0, v0 }
            }
            ProjectionKind::WithDistortion => ProjectionModel::WithDistortion {
                px,
                py,
                u0,
                v0,
                kud: self.kud.unwrap_or(0.0),
                kdu: self.kdu.unwrap_or(0.0),
            },
        })
    }
}

fn set_camera_field(cam: &mut CameraRecord, tag: XmlTag, text: &str) -> Result<(), ParseError> {
    match tag {
        XmlTag::CameraName => cam.name = text.trim().to_owned(),
        XmlTag::ImageWidth => cam.image_width = parse_value(tag, text)?,
        XmlTag::ImageHeight => cam.image_height = parse_value(tag, text)?,
        XmlTag::SubsamplingWidth => cam.subsampling_width = parse_value(tag, text)?,
        XmlTag::SubsamplingHeight => cam.subsampling_height = parse_value(tag, text)?,
        XmlTag::FullWidth => cam.full_width = parse_value(tag, text)?,
        XmlTag::FullHeight => cam.full_height = parse_value(tag, text)?,
        _ => {}
    }
    Ok(())
}

fn parse_value<T: std::str::FromStr>(tag: XmlTag, text: &str) -> Result<T, ParseError> {
    text.trim().parse().map_err(|_| ParseError::InvalidValue {
        tag: tag.name(),
        value: text.to_owned(),
    })
}

fn write_camera<W: io::Write>(
    writer: &mut Writer<W>,
    cam: &CameraRecord,
) -> Result<(), WriteError> {
    writer.write_event(Event::Start(BytesStart::new(XmlTag::Camera.name())))?;
    write_text(writer, XmlTag::CameraName, &cam.name)?;

    let sizes = [
        (XmlTag::ImageWidth, cam.image_width),
        (XmlTag::ImageHeight, cam.image_height),
        (XmlTag::SubsamplingWidth, cam.subsampling_width),
        (XmlTag::SubsamplingHeight, cam.subsampling_height),
        (XmlTag::FullWidth, cam.full_width),
        (XmlTag::FullHeight, cam.full_height),
    ];
    for (tag, value) in sizes {
        if value != 0 {
            write_text(writer, tag, &value.to_string())?;
        }
    }

    for model in &cam.models {
        writer.write_event(Event::Start(BytesStart::new(XmlTag::Model.name())))?;
        write_text(writer, XmlTag::ModelType, model.kind().as_str())?;
        // `Display` for f64 is the shortest string that parses back to the
        // same bits.
        write_text(writer, XmlTag::Px, &model.px().to_string())?;
        write_text(writer, XmlTag::Py, &model.py().to_string())?;
        write_text(writer, XmlTag::U0, &model.u0().to_string())?;
        write_text(writer, XmlTag::V0, &model.v0().to_string())?;
        if let ProjectionModel::WithDistortion { kud, kdu, .. } = model {
            write_text(writer, XmlTag::Kud, &kud.to_string())?;
            write_text(writer, XmlTag::Kdu, &kdu.to_string())?;
        }
        writer.write_event(Event::End(BytesEnd::new(XmlTag::Model.name())))?;
    }

    writer.write_event(Event::End(BytesEnd::new(XmlTag::Camera.name())))?;
    Ok(())
}

fn write_text<W: io::Write>(
    writer: &mut Writer<W>,
    tag: XmlTag,
    value: &str,
) -> Result<(), WriteError> {
    writer.write_event(Event::Start(BytesStart::new(tag.name())))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(tag.name())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CameraFile, CameraQuery};
    use crate::error::{ParseError, WriteError};
    use crate::params::{CameraParameters, ProjectionKind, ProjectionModel};

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<root>
  <camera>
    <name>myCamera</name>
    <image_width>640</image_width>
    <image_height>480</image_height>
    <model>
      <type>perspectiveProjWithoutDistortion</type>
      <px>1129.0</px>
      <py>1130.6</py>
      <u0>317.9</u0>
      <v0>229.1</v0>
    </model>
    <model>
      <type>perspectiveProjWithDistortion</type>
      <px>1089.9</px>
      <py>1090.1</py>
      <u0>326.1</u0>
      <v0>230.5</v0>
      <kud>-0.196</kud>
      <kdu>0.204</kdu>
    </model>
  </camera>
  <camera>
    <name>myCamera</name>
    <image_width>320</image_width>
    <image_height>240</image_height>
    <model>
      <type>perspectiveProjWithoutDistortion</type>
      <px>564.5</px>
      <py>565.3</py>
      <u0>158.9</u0>
      <v0>114.5</v0>
    </model>
  </camera>
</root>
"#;

    #[test]
    fn parses_all_cameras_and_models() {
        let file = CameraFile::from_xml_str(SAMPLE).expect("valid document");
        assert_eq!(file.cameras.len(), 2);
        assert_eq!(file.cameras[0].models.len(), 2);
        assert_eq!(file.cameras[1].image_width, 320);
    }

    #[test]
    fn find_selects_by_size_and_model() {
        let file = CameraFile::from_xml_str(SAMPLE).expect("valid document");

        let q = CameraQuery::new("myCamera", ProjectionKind::WithDistortion)
            .with_image_size(640, 480);
        let cam = file.find(&q).expect("camera present");
        assert_eq!(
            cam.model,
            ProjectionModel::WithDistortion {
                px: 1089.9,
                py: 1090.1,
                u0: 326.1,
                v0: 230.5,
                kud: -0.196,
                kdu: 0.204,
            }
        );

        let q = CameraQuery::new("myCamera", ProjectionKind::WithoutDistortion)
            .with_image_size(320, 240);
        let cam = file.find(&q).expect("camera present");
        assert_eq!(cam.model.px(), 564.5);
        assert_eq!((cam.image_width, cam.image_height), (320, 240));
    }

    #[test]
    fn unsized_query_takes_first_match() {
        let file = CameraFile::from_xml_str(SAMPLE).expect("valid document");
        let q = CameraQuery::new("myCamera", ProjectionKind::WithoutDistortion);
        let cam = file.find(&q).expect("camera present");
        assert_eq!(cam.image_width, 640);
        assert_eq!(cam.model.u0(), 317.9);
    }

    #[test]
    fn missing_camera_and_model_are_distinct_errors() {
        let file = CameraFile::from_xml_str(SAMPLE).expect("valid document");

        let q = CameraQuery::new("other", ProjectionKind::WithoutDistortion);
        assert!(matches!(file.find(&q), Err(ParseError::CameraNotFound { .. })));

        let q = CameraQuery::new("myCamera", ProjectionKind::WithDistortion)
            .with_image_size(320, 240);
        assert!(matches!(file.find(&q), Err(ParseError::ProjectionNotFound { .. })));
    }

    #[test]
    fn missing_fields_use_defaults_but_type_is_required() {
        let xml = "<root><camera><name>c</name><model><type>perspectiveProjWithDistortion</type><px>10</px></model></camera></root>";
        let file = CameraFile::from_xml_str(xml).expect("valid document");
        let model = file.cameras[0].models[0];
        assert_eq!(model.px(), 10.0);
        assert_eq!((model.py(), model.u0(), model.v0()), (600.0, 192.0, 144.0));
        assert_eq!((model.kud(), model.kdu()), (0.0, 0.0));

        let xml = "<root><camera><name>c</name><model><px>10</px></model></camera></root>";
        assert!(matches!(
            CameraFile::from_xml_str(xml),
            Err(ParseError::MissingField { tag: "type" })
        ));
    }

    #[test]
    fn rejects_bad_values() {
        let xml = "<root><camera><name>c</name><image_width>wide</image_width></camera></root>";
        assert!(matches!(
            CameraFile::from_xml_str(xml),
            Err(ParseError::InvalidValue { tag: "image_width", .. })
        ));

        let xml = "<root><camera><model><type>fisheye</type></model></camera></root>";
        assert!(matches!(
            CameraFile::from_xml_str(xml),
            Err(ParseError::UnknownProjection(_))
        ));

        assert!(matches!(
            CameraFile::from_xml_str("<root><camera></root>"),
            Err(ParseError::Xml(_))
        ));
    }

    #[test]
    fn unknown_elements_are_ignored() {
        let xml = "<root><comment>hello</comment><camera><name>c</name><lens>wide</lens></camera></root>";
        let file = CameraFile::from_xml_str(xml).expect("valid document");
        assert_eq!(file.cameras[0].name, "c");
        assert!(file.cameras[0].models.is_empty());
    }

    #[test]
    fn insert_appends_models_and_rejects_duplicates() {
        let mut file = CameraFile::default();
        let plain = CameraParameters {
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
        file.insert(&plain).expect("new camera");

        let dist = CameraParameters {
            model: ProjectionModel::WithDistortion {
                px: 563.0,
                py: 564.0,
                u0: 162.0,
                v0: 122.0,
                kud: 0.1,
                kdu: -0.1,
            },
            ..plain.clone()
        };
        file.insert(&dist).expect("second model");
        assert_eq!(file.cameras.len(), 1);
        assert_eq!(file.cameras[0].models.len(), 2);

        assert!(matches!(file.insert(&plain), Err(WriteError::ModelExists { .. })));

        let other_size = CameraParameters {
            image_width: 640,
            image_height: 480,
            ..plain
        };
        file.insert(&other_size).expect("different size is a new camera");
        assert_eq!(file.cameras.len(), 2);
    }

    #[test]
    fn serialized_document_parses_back() {
        let file = CameraFile::from_xml_str(SAMPLE).expect("valid document");
        let xml = file.to_xml_string().expect("serializable");
        assert!(xml.starts_with("<?xml version=\"1.0\"?>"));
        assert!(xml.contains("<type>perspectiveProjWithDistortion</type>"));
        assert_eq!(CameraFile::from_xml_str(&xml).expect("valid document"), file);
    }

    #[test]
    fn names_are_escaped() {
        let mut file = CameraFile::default();
        file.insert(&CameraParameters {
            name: "left & <right>".into(),
            image_width: 0,
            image_height: 0,
            model: ProjectionModel::WithoutDistortion {
                px: 1.0,
                py: 1.0,
                u0: 0.5,
                v0: 0.5,
            },
        })
        .expect("new camera");
        let xml = file.to_xml_string().expect("serializable");
        assert!(!xml.contains("<image_width>"));
        let back = CameraFile::from_xml_str(&xml).expect("valid document");
        assert_eq!(back.cameras[0].name, "left & <right>");
    }
}
