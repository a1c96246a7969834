//! Image file I/O and display backends.
//!
//! - `io`: read/write images through the `image` crate.
//! - [`ImageDisplay`]: the surface a viewer draws on. [`HeadlessDisplay`]
//!   works anywhere; `WindowDisplay` (feature `window`) opens a native
//!   window.

mod display;
mod headless;
pub mod io;
#[cfg(feature = "window")]
mod window;

use log::info;
use vt_core::{Image, Rgba};

pub use display::{Click, DisplayError, ImageDisplay, MouseButton, show_until_click};
pub use headless::HeadlessDisplay;
pub use io::ImageIoError;
#[cfg(feature = "window")]
pub use window::WindowDisplay;

/// Whether a native window can be opened in this process.
pub fn window_available() -> bool {
    if !cfg!(feature = "window") {
        return false;
    }
    if cfg!(any(target_os = "windows", target_os = "macos")) {
        return true;
    }
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

/// Opens the best available backend for `img`.
///
/// A native window is used unless `headless` is set or no window system is
/// reachable.
pub fn open_display(
    img: &Image<Rgba>,
    headless: bool,
) -> Result<Box<dyn ImageDisplay>, DisplayError> {
    #[cfg(feature = "window")]
    {
        if !headless && window_available() {
            info!("using window display");
            return Ok(Box::new(WindowDisplay::open(img)?));
        }
    }
    info!("using headless display (requested: {headless})");
    Ok(Box::new(HeadlessDisplay::open(img)?))
}
