use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Backing data length does not match `height * width`.
    SizeMismatch { expected: usize, actual: usize },
    /// Binary operation on images of different `(height, width)`.
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Reduction over an image without pixels.
    EmptyImage,
    /// Storage for `height * width` pixels could not be reserved.
    Allocation { height: usize, width: usize },
    OutOfBounds,
    InvalidStride,
    EmptyPointSet,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::EmptyImage => write!(f, "image has no pixels"),
            Self::Allocation { height, width } => {
                write!(f, "cannot allocate a {height}x{width} image")
            }
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::InvalidStride => write!(f, "invalid stride"),
            Self::EmptyPointSet => write!(f, "at least one point is required"),
        }
    }
}

impl std::error::Error for Error {}
