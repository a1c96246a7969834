//! Half- and double-size resampling.
//!
//! Drop-odd policy for halving: output size is `(height / 2, width / 2)`; an
//! odd last row/column is ignored.

use crate::Error;
use crate::image::Image;
use crate::pixel::Pixel;

/// How [`Image::half_size_with`] builds each destination pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HalfSizePolicy {
    /// `out[r][c] = in[2r][2c]`.
    #[default]
    Subsample,
    /// Arithmetic mean of the 2x2 block at `(2r, 2c)`.
    Mean2x2,
}

const MEAN_WEIGHTS: [f64; 4] = [0.25; 4];

impl<T: Pixel> Image<T> {
    /// Decimates into `out`: `out[r][c] = self[2r][2c]`.
    pub fn half_size(&self, out: &mut Image<T>) -> Result<(), Error> {
        self.half_size_with(out, HalfSizePolicy::Subsample)
    }

    pub fn half_size_with(&self, out: &mut Image<T>, policy: HalfSizePolicy) -> Result<(), Error> {
        let (dst_h, dst_w) = (self.height() / 2, self.width() / 2);
        out.resize(dst_h, dst_w)?;

        for r in 0..dst_h {
            let src0 = self.row(2 * r);
            let dst = out.row_mut(r);
            match policy {
                HalfSizePolicy::Subsample => {
                    for (c, d) in dst.iter_mut().enumerate() {
                        *d = src0[2 * c];
                    }
                }
                HalfSizePolicy::Mean2x2 => {
                    let src1 = self.row(2 * r + 1);
                    for (c, d) in dst.iter_mut().enumerate() {
                        let sc = 2 * c;
                        let block = [src0[sc], src0[sc + 1], src1[sc], src1[sc + 1]];
                        *d = T::blend4(block, MEAN_WEIGHTS);
                    }
                }
            }
        }
        Ok(())
    }

    /// Bilinear upsampling into `out`: `out[r][c] = self.sample(r / 2, c / 2)`.
    ///
    /// Even positions copy source pixels, odd positions average their
    /// neighbours, and the last row/column saturate at the edge.
    pub fn double_size(&self, out: &mut Image<T>) -> Result<(), Error> {
        let dst_h = self.height().checked_mul(2).ok_or(Error::Allocation {
            height: usize::MAX,
            width: self.width(),
        })?;
        let dst_w = self.width().checked_mul(2).ok_or(Error::Allocation {
            height: self.height(),
            width: usize::MAX,
        })?;
        out.resize(dst_h, dst_w)?;
        if out.is_empty() {
            return Ok(());
        }

        for r in 0..dst_h {
            let sr = r as f64 * 0.5;
            for c in 0..dst_w {
                let v = self.sample(sr, c as f64 * 0.5);
                out.set(r, c, v);
            }
        }
        Ok(())
    }
}
