//! Umbrella crate for the `vision-toolkit` workspace.
//!
//! Re-exports the pixel buffer types at the top level; camera parameters and
//! display backends live under [`camera`] and [`display`].

pub use vt_camera as camera;
pub use vt_core::*;
pub use vt_display as display;
