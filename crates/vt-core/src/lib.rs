//! Pixel buffer and pixel-level primitives for the vision toolkit.
//!
//! ## Layout
//! [`Image<T>`] owns one contiguous row-major `Vec<T>`. Dimensions are
//! `(height, width)`, pixels are addressed `(row, col)`, and row `r` begins at
//! element `r * width`. Borrowed [`ImageView`]s add an element stride so
//! sub-windows can be described without copying.
//!
//! ## Access contract
//! [`Image::at`] and [`Image::set`] are the fast path: bounds belong to the
//! caller and are checked only by `debug_assert!`. [`Image::get`],
//! [`Image::get_mut`] and [`Image::try_set`] are the checked path.
//!
//! ## Sampling
//! Integer coordinates refer to pixel centers. Bilinear sampling uses the
//! floor-based 2x2 neighbourhood; [`Image::sample`] saturates at the borders,
//! [`sample_bilinear`] takes an explicit [`BorderMode`].
//!
//! ## Errors
//! Only binary operations on mismatched sizes, reductions over empty images
//! and storage failures report errors; see [`Error`].

mod border;
mod error;
mod geom;
mod image;
mod ops;
mod pixel;
mod resample;
mod sample;

pub use border::BorderMode;
pub use error::Error;
pub use geom::{ImagePoint, Rect};
pub use image::{Image, ImageView};
pub use pixel::{Pixel, Rgba, Scalar};
pub use resample::HalfSizePolicy;
pub use sample::{sample_bilinear, sample_bilinear_f64};
