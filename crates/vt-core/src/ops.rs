use core::cmp::Ordering;

use crate::Error;
use crate::geom::Rect;
use crate::image::Image;
use crate::pixel::{Pixel, Scalar};

impl<T: Pixel> Image<T> {
    /// `out[r][c] = self[r][c] - other[r][c]`, see [`Pixel::difference`].
    ///
    /// `out` is resized to match.
    pub fn subtract(&self, other: &Image<T>, out: &mut Image<T>) -> Result<(), Error> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }

        out.resize(self.height(), self.width())?;
        for ((d, &a), &b) in out.data_mut().iter_mut().zip(self.data()).zip(other.data()) {
            *d = a.difference(b);
        }
        Ok(())
    }

    /// Copies the pixels whose integer coordinates lie inside `rect`.
    pub fn crop(&self, rect: &Rect) -> Result<Image<T>, Error> {
        let top = rect.top().ceil();
        let left = rect.left().ceil();
        let bottom = rect.bottom().floor();
        let right = rect.right().floor();

        let inside = top >= 0.0
            && left >= 0.0
            && bottom >= top
            && right >= left
            && bottom < self.height() as f64
            && right < self.width() as f64;
        if !inside {
            return Err(Error::OutOfBounds);
        }

        let (row, col) = (top as usize, left as usize);
        let height = bottom as usize - row + 1;
        let width = right as usize - col + 1;
        Ok(self.as_view().subview(row, col, height, width)?.to_image())
    }
}

impl<T: Scalar> Image<T> {
    pub fn max_value(&self) -> Result<T, Error> {
        self.reduce(Ordering::Greater)
    }

    pub fn min_value(&self) -> Result<T, Error> {
        self.reduce(Ordering::Less)
    }

    /// `(min, max)` in a single pass.
    pub fn min_max(&self) -> Result<(T, T), Error> {
        let (&first, rest) = self.data().split_first().ok_or(Error::EmptyImage)?;
        let mut lo = first;
        let mut hi = first;
        for px in rest {
            if px.total_cmp(&lo) == Ordering::Less {
                lo = *px;
            } else if px.total_cmp(&hi) == Ordering::Greater {
                hi = *px;
            }
        }
        Ok((lo, hi))
    }

    fn reduce(&self, keep: Ordering) -> Result<T, Error> {
        let (&first, rest) = self.data().split_first().ok_or(Error::EmptyImage)?;
        Ok(rest
            .iter()
            .fold(first, |best, px| if px.total_cmp(&best) == keep { *px } else { best }))
    }
}
