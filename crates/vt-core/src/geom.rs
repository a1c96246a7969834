use core::fmt;

use crate::Error;

/// Sub-pixel image location: `i` along rows, `j` along columns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImagePoint {
    pub i: f64,
    pub j: f64,
}

impl ImagePoint {
    pub const fn new(i: f64, j: f64) -> Self {
        Self { i, j }
    }
}

/// Axis-aligned rectangle in image coordinates.
///
/// `right()` and `bottom()` are inclusive: a rectangle of width `w` starting
/// at `left` covers columns `left ..= left + w - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_corners(top_left: ImagePoint, bottom_right: ImagePoint) -> Self {
        let mut rect = Self::new(top_left.j, top_left.i, 0.0, 0.0);
        rect.set_bottom(bottom_right.i);
        rect.set_right(bottom_right.j);
        rect
    }

    /// Smallest rectangle containing every point.
    pub fn bounding(points: &[ImagePoint]) -> Result<Self, Error> {
        let (first, rest) = points.split_first().ok_or(Error::EmptyPointSet)?;
        let (mut min_i, mut max_i) = (first.i, first.i);
        let (mut min_j, mut max_j) = (first.j, first.j);
        for p in rest {
            min_i = min_i.min(p.i);
            max_i = max_i.max(p.i);
            min_j = min_j.min(p.j);
            max_j = max_j.max(p.j);
        }
        Ok(Self::from_corners(
            ImagePoint::new(min_i, min_j),
            ImagePoint::new(max_i, max_j),
        ))
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width - 1.0
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height - 1.0
    }

    pub fn top_left(&self) -> ImagePoint {
        ImagePoint::new(self.top, self.left)
    }

    pub fn bottom_right(&self) -> ImagePoint {
        ImagePoint::new(self.bottom(), self.right())
    }

    /// Moves the bottom edge, keeping the top edge.
    pub fn set_bottom(&mut self, bottom: f64) {
        self.height = bottom - self.top + 1.0;
    }

    /// Moves the right edge, keeping the left edge.
    pub fn set_right(&mut self, right: f64) {
        self.width = right - self.left + 1.0;
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, p: ImagePoint) -> bool {
        p.i >= self.top && p.i <= self.bottom() && p.j >= self.left && p.j <= self.right()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.left, self.top, self.width, self.height)
    }
}
