use core::ops::{Index, IndexMut};

use crate::Error;

/// Owned 2D pixel buffer in row-major order.
///
/// Dimensions are given as `(height, width)` and pixels addressed as
/// `(row, col)`. Row `r` starts at `data[r * width]`; there is no stored
/// row table to keep in sync with reallocations.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Default for Image<T> {
    fn default() -> Self {
        Self::empty()
    }
}

fn checked_len(height: usize, width: usize) -> Result<usize, Error> {
    height
        .checked_mul(width)
        .ok_or(Error::Allocation { height, width })
}

impl<T> Image<T> {
    /// The `0x0` image. Holds no storage.
    pub const fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    pub fn from_vec(height: usize, width: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = checked_len(height, width)?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(height, width)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of pixels the current storage holds without reallocating.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Linear index of `(row, col)` in [`Image::data`].
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.height, "row index out of bounds");
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        assert!(row < self.height, "row index out of bounds");
        let start = row * self.width;
        &mut self.data[start..start + self.width]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(self.offset(row, col))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let idx = self.offset(row, col);
        self.data.get_mut(idx)
    }

    /// Returns a pixel reference without bounds checks.
    ///
    /// # Safety
    /// Caller must guarantee `row < self.height()` and `col < self.width()`.
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> &T {
        // SAFETY: Caller guarantees `row < height` and `col < width`, so the
        // offset is below `height * width == data.len()`.
        unsafe { self.data.get_unchecked(row * self.width + col) }
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }

    /// Applies `f` to every pixel, producing an image of the same size.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Image<U> {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Copy> Image<T> {
    /// Fast-path read.
    ///
    /// Bounds are the caller's contract and are only checked in debug
    /// builds. In release a column past the row end reads a pixel of the
    /// next row; an offset past the storage panics.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.height && col < self.width, "pixel ({row}, {col}) out of bounds");
        self.data[row * self.width + col]
    }

    /// Fast-path write, same contract as [`Image::at`].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        debug_assert!(row < self.height && col < self.width, "pixel ({row}, {col}) out of bounds");
        let idx = row * self.width + col;
        self.data[idx] = value;
    }

    /// Reads a pixel without any bounds check.
    ///
    /// # Safety
    /// Caller must guarantee `row < self.height()` and `col < self.width()`.
    #[inline]
    pub unsafe fn at_unchecked(&self, row: usize, col: usize) -> T {
        // SAFETY: Forwarded caller guarantee.
        unsafe { *self.get_unchecked(row, col) }
    }

    pub fn try_set(&mut self, row: usize, col: usize, value: T) -> Result<(), Error> {
        let px = self.get_mut(row, col).ok_or(Error::OutOfBounds)?;
        *px = value;
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T: Clone + Default> Image<T> {
    /// `height x width` image of `T::default()`.
    pub fn new(height: usize, width: usize) -> Result<Self, Error> {
        let mut img = Self::empty();
        img.resize(height, width)?;
        Ok(img)
    }

    pub fn new_fill(height: usize, width: usize, value: T) -> Result<Self, Error> {
        let mut img = Self::empty();
        img.init_fill(height, width, value)?;
        Ok(img)
    }

    /// Changes the logical dimensions.
    ///
    /// Storage grows only when `height * width` exceeds the current
    /// capacity; shrinking keeps the allocation. Pixel content afterwards is
    /// unspecified by contract: the surviving prefix of `data` is kept and
    /// new pixels are `T::default()`.
    pub fn resize(&mut self, height: usize, width: usize) -> Result<(), Error> {
        let len = checked_len(height, width)?;
        if len > self.data.capacity() {
            self.data
                .try_reserve_exact(len - self.data.len())
                .map_err(|_| Error::Allocation { height, width })?;
        }
        self.data.resize(len, T::default());
        self.height = height;
        self.width = width;
        Ok(())
    }

    /// Sets the dimensions, reusing storage when possible.
    pub fn init(&mut self, height: usize, width: usize) -> Result<(), Error> {
        self.resize(height, width)
    }

    /// Sets the dimensions and every pixel to `value`.
    pub fn init_fill(&mut self, height: usize, width: usize, value: T) -> Result<(), Error> {
        self.resize(height, width)?;
        self.data.fill(value);
        Ok(())
    }
}

impl<T> Index<usize> for Image<T> {
    type Output = [T];

    fn index(&self, row: usize) -> &[T] {
        self.row(row)
    }
}

impl<T> IndexMut<usize> for Image<T> {
    fn index_mut(&mut self, row: usize) -> &mut [T] {
        self.row_mut(row)
    }
}

/// Borrowed read-only window over row-major pixels.
///
/// `stride` is the distance, in elements, between adjacent row starts and
/// may exceed `width`.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        height: usize,
        width: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::InvalidStride);
        }

        let min_len = min_required_len(height, width, stride).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;
        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn row(&self, row: usize) -> &'a [T] {
        assert!(row < self.height, "row index out of bounds");
        let start = row * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&'a T> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.stride + col)
    }

    /// Returns a pixel reference without bounds checks.
    ///
    /// # Safety
    /// Caller must guarantee `row < self.height()` and `col < self.width()`.
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> &'a T {
        // SAFETY: Caller guarantees `row < height` and `col < width`. The
        // constructor checked `data` covers every such offset.
        unsafe { self.data.get_unchecked(row * self.stride + col) }
    }

    /// Window of `height x width` pixels whose top-left pixel is
    /// `(row, col)` of this view.
    pub fn subview(
        &self,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    ) -> Result<ImageView<'a, T>, Error> {
        if row > self.height
            || col > self.width
            || height > self.height - row
            || width > self.width - col
        {
            return Err(Error::OutOfBounds);
        }

        if height == 0 || width == 0 {
            return Ok(ImageView {
                width,
                height,
                stride: self.stride,
                data: &[],
            });
        }

        let start = row * self.stride + col;
        Ok(ImageView {
            width,
            height,
            stride: self.stride,
            data: &self.data[start..],
        })
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.width
    }

    pub fn as_contiguous_slice(&self) -> Option<&'a [T]> {
        if !self.is_contiguous() {
            return None;
        }
        self.data.get(0..self.width * self.height)
    }
}

impl<T: Clone> ImageView<'_, T> {
    /// Copies the view into an owned, contiguous image.
    pub fn to_image(&self) -> Image<T> {
        let mut data = Vec::with_capacity(self.width * self.height);
        for r in 0..self.height {
            data.extend_from_slice(self.row(r));
        }
        Image {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

fn min_required_len(height: usize, width: usize, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }
    (height - 1).checked_mul(stride)?.checked_add(width)
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView};
    use crate::Error;

    #[test]
    fn init_fill_sets_every_pixel() {
        let mut img = Image::<u16>::empty();
        for (h, w) in [(1, 1), (3, 5), (4, 4), (7, 2)] {
            img.init_fill(h, w, 42).expect("small image");
            assert_eq!(img.dimensions(), (h, w));
            for r in 0..h {
                for c in 0..w {
                    assert_eq!(img.at(r, c), 42);
                }
            }
        }
    }

    #[test]
    fn pixel_count_tracks_dimensions() {
        let mut img = Image::<f32>::new(4, 6).expect("valid image");
        assert_eq!(img.pixel_count(), 24);

        img.resize(2, 3).expect("shrink");
        assert_eq!(img.pixel_count(), 6);
        assert!(img.capacity() >= 24);

        img.init(5, 5).expect("grow");
        assert_eq!(img.pixel_count(), 25);
        assert_eq!(img.pixel_count(), img.height() * img.width());

        img.resize(0, 0).expect("empty");
        assert!(img.is_empty());
        assert_eq!(img.dimensions(), (0, 0));
    }

    #[test]
    fn resize_overflow_is_allocation_error() {
        let mut img = Image::<u8>::empty();
        let err = img.resize(usize::MAX, 2).expect_err("overflowing size");
        assert_eq!(
            err,
            Error::Allocation {
                height: usize::MAX,
                width: 2
            }
        );
        assert!(img.is_empty());
    }

    #[test]
    fn failed_reservation_is_allocation_error() {
        // Fits in `usize` elements but not in addressable bytes.
        let height = usize::MAX / 4;
        let err = Image::<u64>::new(height, 1).expect_err("reservation fails");
        assert_eq!(err, Error::Allocation { height, width: 1 });

        let mut img = Image::new_fill(2, 3, 7u64).expect("alloc");
        let err = img.resize(height, 1).expect_err("reservation fails");
        assert!(matches!(err, Error::Allocation { .. }));
        assert_eq!(img.dimensions(), (2, 3));
        assert!(img.data().iter().all(|&v| v == 7));
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Image::from_vec(2, 3, vec![0u8; 5]).expect_err("short data");
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn row_indexing_and_checked_access() {
        let mut img = Image::from_vec(2, 3, vec![1u8, 2, 3, 4, 5, 6]).expect("valid image");
        assert_eq!(&img[1], &[4, 5, 6]);
        img[0][2] = 9;
        assert_eq!(img.at(0, 2), 9);
        assert_eq!(img.get(1, 3), None);
        assert_eq!(img.try_set(2, 0, 1), Err(Error::OutOfBounds));
        img.try_set(1, 1, 7).expect("in bounds");
        assert_eq!(img.get(1, 1), Some(&7));
        // SAFETY: (1, 2) is inside the 2x3 image.
        assert_eq!(unsafe { img.at_unchecked(1, 2) }, 6);
    }

    #[test]
    fn clone_is_deep() {
        let a = Image::new_fill(2, 2, 1.0f64).expect("valid image");
        let mut b = a.clone();
        b.set(0, 0, 3.0);
        assert_eq!(a.at(0, 0), 1.0);
        assert_eq!(b.at(0, 0), 3.0);
    }

    #[test]
    fn strided_view_and_subview() {
        let data = vec![
            10u8, 11, 12, 13, 99, // row 0
            20, 21, 22, 23, 98, // row 1
            30, 31, 32, 33, 97, // row 2
        ];
        let view = ImageView::from_slice(3, 4, 5, &data).expect("valid view");
        assert!(!view.is_contiguous());
        assert!(view.as_contiguous_slice().is_none());
        assert_eq!(view.get(2, 3), Some(&33));
        assert_eq!(view.get(0, 4), None);

        let sub = view.subview(1, 1, 2, 3).expect("valid subview");
        assert_eq!(sub.row(0), &[21, 22, 23]);
        assert_eq!(sub.row(1), &[31, 32, 33]);
        assert_eq!(sub.to_image().data(), &[21, 22, 23, 31, 32, 33]);

        assert_eq!(view.subview(2, 0, 2, 1).err(), Some(Error::OutOfBounds));
        assert_eq!(ImageView::from_slice(1, 4, 3, &data).err(), Some(Error::InvalidStride));
    }

    #[test]
    fn map_converts_pixels() {
        let img = Image::from_vec(1, 3, vec![1u8, 2, 3]).expect("valid image");
        let out = img.map(|&p| p as f32 * 0.5);
        assert_eq!(out.data(), &[0.5, 1.0, 1.5]);
    }
}
