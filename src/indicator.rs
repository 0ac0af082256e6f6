use crate::{Candle, ConfigError, TsvValue};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a TSV [`Indicator`].
///
/// Every engine has a corresponding config type that holds its parameters.
/// Configs are value types: cheap to copy, compare, and hash.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;

    /// Number of bars that must be fed before the first value is produced.
    fn required_bars(&self) -> usize;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Builds the config, reporting missing or invalid parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required parameter was never set.
    fn try_build(self) -> Result<Config, ConfigError>;

    /// Builds the config. Panics if required fields are missing.
    #[must_use]
    fn build(self) -> Config
    where
        Self: Sized,
    {
        self.try_build().unwrap_or_else(|e| panic!("{e}"))
    }
}

/// A streaming TSV engine.
///
/// Engines maintain internal state and update incrementally on each call to
/// [`compute`](Indicator::compute). Output is `None` until enough bars have
/// been received.
///
/// Both [`Tsv`](crate::Tsv) and [`WindowedTsv`](crate::WindowedTsv)
/// implement this trait, so a [`TsvStudy`](crate::TsvStudy) can be driven by
/// either strategy.
///
/// # Example
///
/// ```
/// use tsv_ta::{Indicator, Tsv, TsvConfig};
/// # use tsv_ta::{Candle, Price, Timestamp, Volume};
/// #
/// # struct Bar(f64, f64, u64);
/// # impl Candle for Bar {
/// #     fn close(&self) -> Price { self.0 }
/// #     fn volume(&self) -> Volume { self.1 }
/// #     fn open_time(&self) -> Timestamp { self.2 }
/// # }
///
/// let mut tsv = Tsv::new(TsvConfig::default());
///
/// assert_eq!(tsv.compute(&Bar(100.0, 10.0, 1)), None);
/// assert_eq!(tsv.compute(&Bar(102.0, 20.0, 2)).map(|v| v.value()), Some(40.0));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this engine.
    type Config: IndicatorConfig;

    /// Creates a new engine from the given config.
    fn new(config: Self::Config) -> Self;

    /// The config this engine was created with.
    fn config(&self) -> &Self::Config;

    /// Feeds a bar and returns the updated value, or `None` if there is not
    /// yet enough history.
    fn compute(&mut self, candle: &impl Candle) -> Option<TsvValue>;

    /// Returns the last computed value without advancing state,
    /// or `None` if not yet computable.
    ///
    /// This is a cached field read, O(1) with no computation.
    fn value(&self) -> Option<TsvValue>;
}
