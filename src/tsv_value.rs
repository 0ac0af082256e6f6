use std::fmt::Display;

/// Display tag derived from the sign of a TSV value.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum ColorTag {
    /// `tsv >= 0`. Zero counts as positive.
    Positive,
    /// `tsv < 0`.
    Negative,
}

impl ColorTag {
    /// Tags `value` by sign, treating zero as [`Positive`](Self::Positive).
    #[inline]
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl Display for ColorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One Time Segmented Volume reading.
///
/// The color tag is not stored; it is derived from the value on every call
/// to [`tag`](Self::tag).
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct TsvValue {
    value: f64,
}

impl TsvValue {
    #[inline]
    pub(crate) fn new(value: f64) -> Self {
        Self { value }
    }

    /// Signed volume-weighted close change.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn tag(&self) -> ColorTag {
        ColorTag::of(self.value)
    }
}

impl Display for TsvValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TSV({}, {})", self.value, self.tag())
    }
}
