use core::cmp::Ordering;
use core::fmt;

/// Element type storable in an [`Image`](crate::Image).
pub trait Pixel: Copy + Default + fmt::Debug + PartialEq {
    /// Pixel-wise `self - rhs`. Integer types wrap around.
    fn difference(self, rhs: Self) -> Self;

    /// Weighted sum of four samples; `weights` sum to one.
    ///
    /// Integer types round to nearest and saturate to their range.
    fn blend4(samples: [Self; 4], weights: [f64; 4]) -> Self;
}

/// Single-channel pixel with a total order.
pub trait Scalar: Pixel {
    fn to_f64(self) -> f64;

    fn total_cmp(&self, other: &Self) -> Ordering;
}

#[inline]
fn weighted_sum(samples: [f64; 4], weights: [f64; 4]) -> f64 {
    samples[0] * weights[0]
        + samples[1] * weights[1]
        + samples[2] * weights[2]
        + samples[3] * weights[3]
}

macro_rules! impl_int_pixel {
    ($($t:ty),*) => {$(
        impl Pixel for $t {
            #[inline]
            fn difference(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline]
            fn blend4(samples: [Self; 4], weights: [f64; 4]) -> Self {
                let v = weighted_sum(samples.map(|s| s as f64), weights);
                // `as` saturates out-of-range floats.
                v.round() as $t
            }
        }

        impl Scalar for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        }
    )*};
}

macro_rules! impl_float_pixel {
    ($($t:ty),*) => {$(
        impl Pixel for $t {
            #[inline]
            fn difference(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline]
            fn blend4(samples: [Self; 4], weights: [f64; 4]) -> Self {
                weighted_sum(samples.map(|s| s as f64), weights) as $t
            }
        }

        impl Scalar for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                <$t>::total_cmp(self, other)
            }
        }
    )*};
}

impl_int_pixel!(u8, u16, u32, i8, i16, i32);
impl_float_pixel!(f32, f64);

/// 8-bit RGBA color pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// ITU-R BT.601 luma, rounded.
    pub fn luminance(self) -> u8 {
        let y = 0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64;
        y.round() as u8
    }

    /// Packs into `0x00RRGGBB`, the layout of most software framebuffers.
    pub fn to_0rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(p: Rgba) -> Self {
        [p.r, p.g, p.b, p.a]
    }
}

impl Pixel for Rgba {
    #[inline]
    fn difference(self, rhs: Self) -> Self {
        Self {
            r: self.r.wrapping_sub(rhs.r),
            g: self.g.wrapping_sub(rhs.g),
            b: self.b.wrapping_sub(rhs.b),
            a: self.a.wrapping_sub(rhs.a),
        }
    }

    #[inline]
    fn blend4(samples: [Self; 4], weights: [f64; 4]) -> Self {
        Self {
            r: u8::blend4(samples.map(|p| p.r), weights),
            g: u8::blend4(samples.map(|p| p.g), weights),
            b: u8::blend4(samples.map(|p| p.b), weights),
            a: u8::blend4(samples.map(|p| p.a), weights),
        }
    }
}
