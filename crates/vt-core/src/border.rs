/// Rule for resolving sample indices that fall outside an image axis.
#[derive(Debug, Clone, PartialEq)]
pub enum BorderMode<T> {
    /// Saturate to the nearest edge pixel.
    Clamp,
    /// Out-of-range samples read this value.
    Constant(T),
    /// Mirror around edge pixels without repeating them (`dcb|abcd|cba`).
    Reflect101,
}

impl<T> BorderMode<T> {
    /// Maps a possibly out-of-range index on an axis of length `len` into
    /// `[0, len)`.
    ///
    /// Returns `None` for an empty axis, and for out-of-range indices under
    /// [`BorderMode::Constant`], where the caller substitutes the constant.
    pub fn resolve(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }

        match self {
            Self::Constant(_) => None,
            Self::Clamp => Some(if i < 0 { 0 } else { len - 1 }),
            Self::Reflect101 => {
                if len == 1 {
                    return Some(0);
                }
                let period = 2 * len - 2;
                let r = i.rem_euclid(period as isize) as usize;
                Some(if r < len { r } else { period - r })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BorderMode;

    #[test]
    fn clamp_saturates_both_ends() {
        let mode = BorderMode::<f64>::Clamp;
        let got: Vec<_> = (-2..6).map(|i| mode.resolve(i, 4)).collect();
        let want = [0, 0, 0, 1, 2, 3, 3, 3].map(Some);
        assert_eq!(got, want);
    }

    #[test]
    fn constant_only_resolves_inside() {
        let mode = BorderMode::Constant(7u8);
        assert_eq!(mode.resolve(-1, 3), None);
        assert_eq!(mode.resolve(2, 3), Some(2));
        assert_eq!(mode.resolve(3, 3), None);
    }

    #[test]
    fn reflect101_mirrors_without_repeating_edges() {
        let mode = BorderMode::<u8>::Reflect101;
        let got: Vec<_> = (-4..8).map(|i| mode.resolve(i, 4).expect("non-empty axis")).collect();
        assert_eq!(got, vec![2, 3, 2, 1, 0, 1, 2, 3, 2, 1, 0, 1]);

        assert_eq!(mode.resolve(-9, 1), Some(0));
        assert_eq!(mode.resolve(3, 2), Some(1));
    }

    #[test]
    fn empty_axis_never_resolves() {
        assert_eq!(BorderMode::<u8>::Clamp.resolve(0, 0), None);
        assert_eq!(BorderMode::<u8>::Reflect101.resolve(0, 0), None);
    }
}
