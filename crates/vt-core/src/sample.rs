use crate::border::BorderMode;
use crate::image::{Image, ImageView};
use crate::pixel::{Pixel, Scalar};

/// Bilinear sample at fractional `(row, col)`.
///
/// With `i0 = floor(row)`, `j0 = floor(col)`, `di = row - i0`, `dj = col - j0`
/// the result is the weighted average of `(i0, j0)`, `(i0, j0 + 1)`,
/// `(i0 + 1, j0)`, `(i0 + 1, j0 + 1)` with weights `(1-di)(1-dj)`,
/// `(1-di)dj`, `di(1-dj)`, `di*dj`. Neighbours outside the view go through
/// `border`.
///
/// # Panics
/// On an empty view unless `border` is [`BorderMode::Constant`].
pub fn sample_bilinear<T: Pixel>(
    img: &ImageView<'_, T>,
    row: f64,
    col: f64,
    border: &BorderMode<T>,
) -> T {
    if img.is_empty() {
        if let BorderMode::Constant(v) = border {
            return *v;
        }
        panic!("cannot sample an empty image with non-constant border");
    }

    let i0f = row.floor();
    let j0f = col.floor();
    let di = row - i0f;
    let dj = col - j0f;
    // Casts saturate for far-away coordinates; neighbours must too.
    let (i0, j0) = (i0f as isize, j0f as isize);
    let (i1, j1) = (i0.saturating_add(1), j0.saturating_add(1));

    let samples = [
        sample_at(img, i0, j0, border),
        sample_at(img, i0, j1, border),
        sample_at(img, i1, j0, border),
        sample_at(img, i1, j1, border),
    ];
    let weights = [
        (1.0 - di) * (1.0 - dj),
        (1.0 - di) * dj,
        di * (1.0 - dj),
        di * dj,
    ];
    T::blend4(samples, weights)
}

/// Same weighting as [`sample_bilinear`], accumulated in `f64` without
/// rounding back to the pixel type.
pub fn sample_bilinear_f64<T: Scalar>(
    img: &ImageView<'_, T>,
    row: f64,
    col: f64,
    border: &BorderMode<T>,
) -> f64 {
    if img.is_empty() {
        if let BorderMode::Constant(v) = border {
            return v.to_f64();
        }
        panic!("cannot sample an empty image with non-constant border");
    }

    let i0 = row.floor();
    let j0 = col.floor();
    let di = row - i0;
    let dj = col - j0;
    let (i0, j0) = (i0 as isize, j0 as isize);
    let (i1, j1) = (i0.saturating_add(1), j0.saturating_add(1));

    let p00 = sample_at(img, i0, j0, border).to_f64();
    let p01 = sample_at(img, i0, j1, border).to_f64();
    let p10 = sample_at(img, i1, j0, border).to_f64();
    let p11 = sample_at(img, i1, j1, border).to_f64();

    let top = p00 * (1.0 - dj) + p01 * dj;
    let bottom = p10 * (1.0 - dj) + p11 * dj;
    top * (1.0 - di) + bottom * di
}

fn sample_at<T: Copy>(img: &ImageView<'_, T>, row: isize, col: isize, border: &BorderMode<T>) -> T {
    match (border.resolve(row, img.height()), border.resolve(col, img.width())) {
        // SAFETY: `resolve` only returns indices in `[0, len)`.
        (Some(r), Some(c)) => unsafe { *img.get_unchecked(r, c) },
        _ => match border {
            BorderMode::Constant(v) => *v,
            // Clamp and Reflect101 resolve every index on a non-empty axis.
            BorderMode::Clamp | BorderMode::Reflect101 => unreachable!("non-empty view"),
        },
    }
}

impl<T: Pixel> Image<T> {
    /// Bilinear sample with edge saturation.
    ///
    /// Coordinates outside `[0, height-1] x [0, width-1]` read the nearest
    /// edge pixel; integer coordinates return the stored pixel exactly.
    ///
    /// # Panics
    /// If the image is empty.
    pub fn sample(&self, row: f64, col: f64) -> T {
        sample_bilinear(&self.as_view(), row, col, &BorderMode::Clamp)
    }
}

impl<T: Scalar> Image<T> {
    /// Bilinear sample with edge saturation, returned as `f64`.
    ///
    /// # Panics
    /// If the image is empty.
    pub fn sample_f64(&self, row: f64, col: f64) -> f64 {
        sample_bilinear_f64(&self.as_view(), row, col, &BorderMode::Clamp)
    }
}
