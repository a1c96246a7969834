//! Image file I/O.
//!
//! - `read_rgba` / `read_gray`: decode PNG/JPEG/PNM/BMP/TIFF into an owned
//!   [`Image`].
//! - `write_rgba` / `write_gray`: encode an [`Image`], format chosen from the
//!   file extension.
use core::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, RgbaImage};
use log::debug;
use vt_core::{Image, Rgba};

#[derive(Debug)]
pub enum ImageIoError {
    Read {
        path: PathBuf,
        source: image::ImageError,
    },
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Decoded buffer does not fit the requested layout.
    Layout(vt_core::Error),
}

impl fmt::Display for ImageIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read image {}: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "cannot write image {}: {source}", path.display())
            }
            Self::CreateDir { path, source } => {
                write!(f, "cannot create {}: {source}", path.display())
            }
            Self::Layout(err) => write!(f, "unexpected image layout: {err}"),
        }
    }
}

impl std::error::Error for ImageIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::CreateDir { source, .. } => Some(source),
            Self::Layout(err) => Some(err),
        }
    }
}

fn open(path: &Path) -> Result<image::DynamicImage, ImageIoError> {
    debug!("decoding {}", path.display());
    image::open(path).map_err(|source| ImageIoError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_rgba(path: impl AsRef<Path>) -> Result<Image<Rgba>, ImageIoError> {
    let rgba = open(path.as_ref())?.into_rgba8();
    let (w, h) = rgba.dimensions();
    let data = rgba
        .into_raw()
        .chunks_exact(4)
        .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
        .collect();
    Image::from_vec(h as usize, w as usize, data).map_err(ImageIoError::Layout)
}

pub fn read_gray(path: impl AsRef<Path>) -> Result<Image<u8>, ImageIoError> {
    let luma = open(path.as_ref())?.into_luma8();
    let (w, h) = luma.dimensions();
    Image::from_vec(h as usize, w as usize, luma.into_raw()).map_err(ImageIoError::Layout)
}

pub fn write_gray(path: impl AsRef<Path>, img: &Image<u8>) -> Result<(), ImageIoError> {
    let path = path.as_ref();
    let (w, h) = image_size(img)?;
    let gray = GrayImage::from_raw(w, h, img.data().to_vec()).ok_or(ImageIoError::Layout(
        vt_core::Error::SizeMismatch {
            expected: img.pixel_count(),
            actual: img.data().len(),
        },
    ))?;
    ensure_parent_dir(path)?;
    gray.save(path).map_err(|source| ImageIoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_rgba(path: impl AsRef<Path>, img: &Image<Rgba>) -> Result<(), ImageIoError> {
    let path = path.as_ref();
    let (w, h) = image_size(img)?;
    let raw: Vec<u8> = img.data().iter().flat_map(|&p| <[u8; 4]>::from(p)).collect();
    let rgba = RgbaImage::from_raw(w, h, raw).ok_or(ImageIoError::Layout(
        vt_core::Error::SizeMismatch {
            expected: img.pixel_count() * 4,
            actual: img.data().len() * 4,
        },
    ))?;
    ensure_parent_dir(path)?;
    rgba.save(path).map_err(|source| ImageIoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn image_size<T>(img: &Image<T>) -> Result<(u32, u32), ImageIoError> {
    let overflow = || {
        ImageIoError::Layout(vt_core::Error::Allocation {
            height: img.height(),
            width: img.width(),
        })
    };
    let w = u32::try_from(img.width()).map_err(|_| overflow())?;
    let h = u32::try_from(img.height()).map_err(|_| overflow())?;
    Ok((w, h))
}

fn ensure_parent_dir(path: &Path) -> Result<(), ImageIoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| ImageIoError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use vt_core::{Image, Rgba};

    use super::{ImageIoError, read_gray, read_rgba, write_gray, write_rgba};

    #[test]
    fn gray_png_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("gray.png");
        let img = Image::from_vec(2, 3, vec![0u8, 50, 100, 150, 200, 250]).expect("valid image");

        write_gray(&path, &img).expect("encode png");
        let back = read_gray(&path).expect("decode png");
        assert_eq!(back, img);
    }

    #[test]
    fn rgba_png_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("color.png");
        let img = Image::from_vec(
            1,
            2,
            vec![Rgba::new(255, 0, 0, 255), Rgba::new(1, 2, 3, 128)],
        )
        .expect("valid image");

        write_rgba(&path, &img).expect("encode png");
        assert_eq!(read_rgba(&path).expect("decode png"), img);

        let gray = read_gray(&path).expect("decode png as gray");
        assert_eq!(gray.dimensions(), (1, 2));
    }

    #[test]
    fn unreadable_file_reports_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.png");
        assert!(matches!(read_rgba(&path), Err(ImageIoError::Read { .. })));

        let junk = dir.path().join("junk.png");
        std::fs::write(&junk, b"not an image").expect("write fixture");
        assert!(matches!(read_gray(&junk), Err(ImageIoError::Read { .. })));
    }
}
