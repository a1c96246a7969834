use core::fmt;
use std::io;

use vt_core::{Image, Rgba};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u16),
}

/// A mouse click in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    pub row: f64,
    pub col: f64,
    pub button: MouseButton,
}

#[derive(Debug)]
pub enum DisplayError {
    /// Nothing to show: the buffer has zero pixels.
    EmptyImage,
    /// The window system refused an operation.
    Backend(String),
    /// The window was closed before a click arrived.
    Closed,
    /// Click input ran out (scripted queue drained or stdin closed).
    NoInput,
    Io(io::Error),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImage => write!(f, "cannot display an empty image"),
            Self::Backend(msg) => write!(f, "display backend error: {msg}"),
            Self::Closed => write!(f, "display closed before a click"),
            Self::NoInput => write!(f, "no more click input"),
            Self::Io(err) => write!(f, "display i/o error: {err}"),
        }
    }
}

impl std::error::Error for DisplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DisplayError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// A surface an RGBA image can be shown on.
///
/// Backends are opened on a buffer (their constructor); `display` may be
/// called again with a frame of different size. Nothing is guaranteed to be
/// visible before `flush`.
pub trait ImageDisplay {
    fn set_title(&mut self, title: &str) -> Result<(), DisplayError>;

    fn display(&mut self, img: &Image<Rgba>) -> Result<(), DisplayError>;

    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Blocks until the user clicks.
    fn wait_for_click(&mut self) -> Result<Click, DisplayError>;
}

impl<D: ImageDisplay + ?Sized> ImageDisplay for Box<D> {
    fn set_title(&mut self, title: &str) -> Result<(), DisplayError> {
        (**self).set_title(title)
    }

    fn display(&mut self, img: &Image<Rgba>) -> Result<(), DisplayError> {
        (**self).display(img)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        (**self).flush()
    }

    fn wait_for_click(&mut self) -> Result<Click, DisplayError> {
        (**self).wait_for_click()
    }
}

/// Shows `img` under `title` and blocks until a click.
pub fn show_until_click<D: ImageDisplay + ?Sized>(
    display: &mut D,
    img: &Image<Rgba>,
    title: &str,
) -> Result<Click, DisplayError> {
    display.set_title(title)?;
    display.display(img)?;
    display.flush()?;
    display.wait_for_click()
}
