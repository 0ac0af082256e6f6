use std::{fmt::Display, num::NonZero};

use crate::{
    ConfigError, IndicatorConfig, IndicatorConfigBuilder, Price, error::length_from_input,
    rolling_sum::RollingSum,
};

/// Default moving-average length.
pub const DEFAULT_MA_LENGTH: usize = 6;

const DEFAULT_LENGTH: NonZero<usize> = NonZero::new(DEFAULT_MA_LENGTH).unwrap();

/// Configuration for the Simple Moving Average ([`Sma`]) of a TSV series.
///
/// # Example
///
/// ```rust
/// use tsv_ta::SmaConfig;
/// use std::num::NonZero;
///
/// let config = SmaConfig::new(NonZero::new(20).unwrap());
/// assert_eq!(config.length(), 20);
/// assert_eq!(SmaConfig::default().length(), 6);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SmaConfig {
    length: NonZero<usize>,
}

impl IndicatorConfig for SmaConfig {
    type Builder = SmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SmaConfigBuilder::new()
    }

    /// Counted in defined input values rather than bars.
    #[inline]
    fn required_bars(&self) -> usize {
        self.length.get()
    }
}

impl SmaConfig {
    /// SMA over the last `length` values.
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// Builds from a host-supplied integer length.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LengthOutOfRange`] unless
    /// `1 <= length <= MAX_LENGTH`.
    pub fn from_input(length: i64) -> Result<Self, ConfigError> {
        Self::builder()
            .length(length_from_input("ma length", length)?)
            .try_build()
    }

    /// Window length (number of values averaged).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length.get()
    }
}

impl Default for SmaConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }
}

impl Display for SmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmaConfig({})", self.length)
    }
}

/// Builder for [`SmaConfig`].
///
/// Length must be set before calling [`build`](IndicatorConfigBuilder::build).
pub struct SmaConfigBuilder {
    length: Option<NonZero<usize>>,
}

impl SmaConfigBuilder {
    fn new() -> Self {
        Self { length: None }
    }

    /// Sets the averaging window length.
    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length);
        self
    }
}

impl IndicatorConfigBuilder<SmaConfig> for SmaConfigBuilder {
    #[inline]
    fn try_build(self) -> Result<SmaConfig, ConfigError> {
        Ok(SmaConfig {
            length: self.length.ok_or(ConfigError::MissingLength { name: "ma length" })?,
        })
    }
}

/// Simple Moving Average (SMA) of a series with possibly undefined slots.
///
/// Computes the unweighted mean of the last *n* values, where *n* is the
/// configured window length. Returns `None` until *n* consecutive defined
/// values have been received. An undefined input empties the window, so an
/// average never spans a missing slot.
///
/// Uses a running sum for O(1) updates per value, seeded by a full scan of
/// the first complete window.
///
/// # Example
///
/// ```rust
/// use tsv_ta::{Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let mut sma = Sma::new(SmaConfig::new(NonZero::new(2).unwrap()));
///
/// assert_eq!(sma.compute(None), None);
/// assert_eq!(sma.compute(Some(40.0)), None);
/// assert_eq!(sma.compute(Some(-15.0)), Some(12.5));
/// assert_eq!(sma.compute(Some(120.0)), Some(52.5));
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    config: SmaConfig,
    window: RollingSum,
    length_reciprocal: f64,
    current: Option<Price>,
}

impl Sma {
    #[must_use]
    pub fn new(config: SmaConfig) -> Self {
        Self {
            config,
            window: RollingSum::new(config.length),
            #[allow(clippy::cast_precision_loss)]
            length_reciprocal: 1.0 / config.length.get() as f64,
            current: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SmaConfig {
        &self.config
    }

    /// Feeds the value of the next index and returns the updated average.
    #[inline]
    pub fn compute(&mut self, value: Option<Price>) -> Option<Price> {
        match value {
            Some(value) => self.window.push(value),
            None => self.window.clear(),
        }

        self.refresh()
    }

    /// Replaces the value of the newest index without advancing the window.
    ///
    /// Definedness of the newest slot is expected to stay the same across
    /// repaints; turning it undefined empties the window.
    #[inline]
    pub fn repaint(&mut self, value: Option<Price>) -> Option<Price> {
        match value {
            Some(value) => self.window.replace_last(value),
            None => self.window.clear(),
        }

        self.refresh()
    }

    /// Last computed average, or `None` if not yet computable.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<Price> {
        self.current
    }

    /// Forgets every value seen so far.
    pub fn reset(&mut self) {
        self.window.clear();
        self.current = None;
    }

    #[inline]
    fn refresh(&mut self) -> Option<Price> {
        self.current = self.window.sum().map(|sum| sum * self.length_reciprocal);

        self.current
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({})", self.config.length)
    }
}
