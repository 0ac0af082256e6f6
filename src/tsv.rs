use std::fmt::Display;

use crate::{
    Candle, ConfigError, Indicator, IndicatorConfig, IndicatorConfigBuilder, Price, TsvValue,
    candle::BarClock,
};

/// Configuration for the instantaneous Time Segmented Volume ([`Tsv`]).
///
/// Has no parameters: each value depends only on the current and previous
/// bar.
///
/// # Example
///
/// ```rust
/// use tsv_ta::{IndicatorConfig, TsvConfig};
///
/// let config = TsvConfig::default();
/// assert_eq!(config.required_bars(), 2);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub struct TsvConfig;

impl IndicatorConfig for TsvConfig {
    type Builder = TsvConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        TsvConfigBuilder
    }

    #[inline]
    fn required_bars(&self) -> usize {
        2
    }
}

impl Display for TsvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TsvConfig")
    }
}

/// Builder for [`TsvConfig`]. Never fails.
pub struct TsvConfigBuilder;

impl IndicatorConfigBuilder<TsvConfig> for TsvConfigBuilder {
    #[inline]
    fn try_build(self) -> Result<TsvConfig, ConfigError> {
        Ok(TsvConfig)
    }
}

/// Instantaneous Time Segmented Volume.
///
/// ```text
/// TSV[i] = (close[i] − close[i−1]) × volume[i]
/// ```
///
/// Returns `None` on the first bar, which has no previous close.
///
/// Supports live repainting: feeding a bar with the same `open_time`
/// recomputes against the same previous close without advancing.
///
/// # Example
///
/// ```rust
/// use tsv_ta::{ColorTag, Tsv, TsvConfig};
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
///
/// let v = tsv.compute(&Bar(101.0, 15.0, 2)).unwrap();
/// assert_eq!(v.value(), 15.0);
/// assert_eq!(v.tag(), ColorTag::Positive);
/// ```
#[derive(Clone, Debug)]
pub struct Tsv {
    config: TsvConfig,
    clock: BarClock,
    /// Close of the forming bar. On advance, becomes `prev_close`.
    cur_close: Option<Price>,
    prev_close: Option<Price>,
    current: Option<TsvValue>,
}

impl Indicator for Tsv {
    type Config = TsvConfig;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            clock: BarClock::default(),
            cur_close: None,
            prev_close: None,
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
            self.prev_close = self.cur_close;
        }

        let close = candle.close();
        self.cur_close = Some(close);

        self.current = self
            .prev_close
            .map(|prev_close| TsvValue::new((close - prev_close) * candle.volume()));

        self.current
    }

    #[inline]
    fn value(&self) -> Option<TsvValue> {
        self.current
    }
}

impl Display for Tsv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TSV")
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::ColorTag;
    use crate::test_util::bar;

    fn tsv() -> Tsv {
        Tsv::new(TsvConfig::default())
    }

    fn value(v: Option<TsvValue>) -> Option<f64> {
        v.map(|v| v.value())
    }

    mod filling {
        use super::*;

        #[test]
        fn none_on_first_bar() {
            let mut tsv = tsv();
            assert_eq!(tsv.compute(&bar(100.0, 10.0, 1)), None);
            assert_eq!(tsv.value(), None);
        }

        #[test]
        fn defined_from_second_bar() {
            let mut tsv = tsv();
            tsv.compute(&bar(100.0, 10.0, 1));
            assert_eq!(value(tsv.compute(&bar(102.0, 20.0, 2))), Some(40.0));
        }
    }

    mod advancing {
        use super::*;

        #[test]
        fn reference_sequence() {
            let mut tsv = tsv();
            tsv.compute(&bar(100.0, 10.0, 1));
            // (102 - 100) * 20
            assert_eq!(value(tsv.compute(&bar(102.0, 20.0, 2))), Some(40.0));
            // (101 - 102) * 15
            let v = tsv.compute(&bar(101.0, 15.0, 3)).unwrap();
            assert_eq!(v.value(), -15.0);
            assert_eq!(v.tag(), ColorTag::Negative);
            // (105 - 101) * 30
            assert_eq!(value(tsv.compute(&bar(105.0, 30.0, 4))), Some(120.0));
        }

        #[test]
        fn unchanged_close_is_zero_and_positive() {
            let mut tsv = tsv();
            tsv.compute(&bar(100.0, 10.0, 1));
            let v = tsv.compute(&bar(100.0, 50.0, 2)).unwrap();
            assert_eq!(v.value(), 0.0);
            assert_eq!(v.tag(), ColorTag::Positive);
        }

        #[test]
        fn zero_volume_is_zero() {
            let mut tsv = tsv();
            tsv.compute(&bar(100.0, 10.0, 1));
            assert_eq!(value(tsv.compute(&bar(90.0, 0.0, 2))), Some(0.0));
        }
    }

    mod repaint {
        use super::*;

        #[test]
        fn keeps_previous_close() {
            let mut tsv = tsv();
            tsv.compute(&bar(100.0, 10.0, 1));
            tsv.compute(&bar(102.0, 20.0, 2));
            // still measured against bar 1's close
            assert_eq!(value(tsv.compute(&bar(99.0, 25.0, 2))), Some(-25.0));
        }

        #[test]
        fn repaint_of_first_bar_stays_none() {
            let mut tsv = tsv();
            tsv.compute(&bar(100.0, 10.0, 1));
            assert_eq!(tsv.compute(&bar(101.0, 12.0, 1)), None);
            // uses the repainted close
            assert_eq!(value(tsv.compute(&bar(103.0, 5.0, 2))), Some(10.0));
        }

        #[test]
        fn advance_after_repaint_uses_final_close() {
            let mut tsv = tsv();
            tsv.compute(&bar(100.0, 10.0, 1));
            tsv.compute(&bar(102.0, 20.0, 2));
            tsv.compute(&bar(104.0, 20.0, 2));
            // (105 - 104) * 3
            assert_eq!(value(tsv.compute(&bar(105.0, 3.0, 3))), Some(3.0));
        }
    }

    mod config {
        use super::*;

        #[test]
        fn builder_matches_default() {
            assert_eq!(TsvConfig::builder().build(), TsvConfig::default());
        }

        #[test]
        fn display() {
            assert_eq!(TsvConfig.to_string(), "TsvConfig");
            assert_eq!(tsv().to_string(), "TSV");
        }
    }

    mod clone {
        use super::*;

        #[test]
        fn produces_independent_state() {
            let mut tsv = tsv();
            tsv.compute(&bar(100.0, 10.0, 1));

            let mut cloned = tsv.clone();

            assert_eq!(value(tsv.compute(&bar(101.0, 1.0, 2))), Some(1.0));
            assert_eq!(cloned.value(), None);
            assert_eq!(value(cloned.compute(&bar(90.0, 1.0, 2))), Some(-10.0));
        }
    }
}
