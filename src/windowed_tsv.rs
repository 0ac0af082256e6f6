use std::{fmt::Display, num::NonZero};

use crate::{
    Candle, ConfigError, Indicator, IndicatorConfig, IndicatorConfigBuilder, Price, TsvValue,
    Volume, candle::BarClock, error::length_from_input, rolling_sum::RollingSum,
};

/// Default trailing window of the windowed TSV.
pub const DEFAULT_TSV_LENGTH: usize = 12;

const DEFAULT_LENGTH: NonZero<usize> = NonZero::new(DEFAULT_TSV_LENGTH).unwrap();

/// Configuration for the windowed Time Segmented Volume ([`WindowedTsv`]).
///
/// # Example
///
/// ```rust
/// use tsv_ta::{IndicatorConfig, WindowedTsvConfig};
/// use std::num::NonZero;
///
/// let config = WindowedTsvConfig::new(NonZero::new(12).unwrap());
/// assert_eq!(config.length(), 12);
/// assert_eq!(config.required_bars(), 14);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct WindowedTsvConfig {
    length: NonZero<usize>,
}

impl IndicatorConfig for WindowedTsvConfig {
    type Builder = WindowedTsvConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        WindowedTsvConfigBuilder::new()
    }

    /// `length` close-changes are summed, and the first one needs two closes,
    /// all strictly before the evaluated bar.
    #[inline]
    fn required_bars(&self) -> usize {
        self.length.get().saturating_add(2)
    }
}

impl WindowedTsvConfig {
    /// Windowed TSV summing `length` close-changes.
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
            .length(length_from_input("tsv length", length)?)
            .try_build()
    }

    /// Number of close-changes in the trailing window.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length.get()
    }
}

impl Default for WindowedTsvConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }
}

impl Display for WindowedTsvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WindowedTsvConfig({})", self.length)
    }
}

/// Builder for [`WindowedTsvConfig`].
///
/// Length must be set before calling [`build`](IndicatorConfigBuilder::build).
pub struct WindowedTsvConfigBuilder {
    length: Option<NonZero<usize>>,
}

impl WindowedTsvConfigBuilder {
    fn new() -> Self {
        Self { length: None }
    }

    /// Sets the number of close-changes summed.
    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length);
        self
    }
}

impl IndicatorConfigBuilder<WindowedTsvConfig> for WindowedTsvConfigBuilder {
    #[inline]
    fn try_build(self) -> Result<WindowedTsvConfig, ConfigError> {
        Ok(WindowedTsvConfig {
            length: self.length.ok_or(ConfigError::MissingLength { name: "tsv length" })?,
        })
    }
}

/// Windowed Time Segmented Volume.
///
/// Sums the volume-weighted close changes of the `length` committed bars
/// before the evaluated one:
///
/// ```text
/// TSV[i] = Σ (close[k] − close[k−1]) × volume[k],  k = i−length ..= i−1
/// ```
///
/// Every term must have a previous close, so the first value appears at
/// index `length + 1`. The sum is seeded by one full scan of the first
/// complete window, then rolled forward in O(1): the expiring term is
/// subtracted and the entering term added.
///
/// The forming bar does not contribute to its own value. Repainting it
/// (same `open_time`) leaves the output unchanged; its final close and
/// volume enter the window when the next bar opens.
///
/// # Example
///
/// ```rust
/// use tsv_ta::{WindowedTsv, WindowedTsvConfig};
/// use std::num::NonZero;
/// # use tsv_ta::{Candle, Price, Timestamp, Volume};
/// #
/// # struct Bar(f64, f64, u64);
/// # impl Candle for Bar {
/// #     fn close(&self) -> Price { self.0 }
/// #     fn volume(&self) -> Volume { self.1 }
/// #     fn open_time(&self) -> Timestamp { self.2 }
/// # }
///
/// let mut tsv = WindowedTsv::new(WindowedTsvConfig::new(NonZero::new(2).unwrap()));
///
/// assert_eq!(tsv.compute(&Bar(100.0, 10.0, 1)), None);
/// assert_eq!(tsv.compute(&Bar(102.0, 20.0, 2)), None);
/// assert_eq!(tsv.compute(&Bar(101.0, 15.0, 3)), None);
/// // 40 + (-15)
/// assert_eq!(tsv.compute(&Bar(105.0, 30.0, 4)).map(|v| v.value()), Some(25.0));
/// ```
#[derive(Clone, Debug)]
pub struct WindowedTsv {
    config: WindowedTsvConfig,
    clock: BarClock,
    terms: RollingSum,
    /// Close of the newest committed bar.
    committed_close: Option<Price>,
    /// Latest tick of the bar that has not been committed yet.
    forming: Option<(Price, Volume)>,
    current: Option<TsvValue>,
}

impl WindowedTsv {
    /// Sums the current window from scratch.
    ///
    /// Agrees with [`value`](Self::value) up to floating-point rounding of
    /// the rolling update. `None` until the window is full.
    #[must_use]
    pub fn rescan(&self) -> Option<Price> {
        self.terms.rescan()
    }

    fn commit_forming(&mut self) {
        let Some((close, volume)) = self.forming.take() else {
            return;
        };

        if let Some(prev_close) = self.committed_close {
            self.terms.push((close - prev_close) * volume);
        }
        self.committed_close = Some(close);
    }
}

impl Indicator for WindowedTsv {
    type Config = WindowedTsvConfig;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            clock: BarClock::default(),
            terms: RollingSum::new(config.length),
            committed_close: None,
            forming: None,
            current: None,
        }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    #[inline]
    fn compute(&mut self, candle: &impl Candle) -> Option<TsvValue> {
        if self.clock.tick(candle) {
            self.commit_forming();
            self.current = self.terms.sum().map(TsvValue::new);
        }

        self.forming = Some((candle.close(), candle.volume()));

        self.current
    }

    #[inline]
    fn value(&self) -> Option<TsvValue> {
        self.current
    }
}

impl Display for WindowedTsv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TSV({})", self.config.length)
    }
}
