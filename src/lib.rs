//! Streaming Time Segmented Volume (TSV) for Rust.
//!
//! TSV weights each close-to-close change by the bar's volume. Two
//! strategies are provided: [`Tsv`] (instantaneous, one bar) and
//! [`WindowedTsv`] (rolling sum over a trailing window). [`Sma`] smooths
//! either one, and [`TsvStudy`] runs both over a shared bar index with
//! streaming ([`advance`](TsvStudy::advance)) and batch
//! ([`recompute`](TsvStudy::recompute)) entry points that produce identical
//! series.
//!
//! Engines accept any type implementing [`Candle`]. Values are `None` until
//! enough history has been received.
//!
//! [`Tsv`] and [`WindowedTsv`] expose [`new`](Tsv::new),
//! [`compute`](Tsv::compute), and [`value`](Tsv::value) as inherent
//! methods, so no trait import is needed. Import [`Indicator`] only for generic
//! code.

mod candle;
mod error;
mod indicator;
mod ring_buffer;
mod rolling_sum;
mod series;
mod sma;
mod study;
mod tsv;
mod tsv_value;
mod windowed_tsv;

pub use crate::candle::{Candle, Price, Timestamp, Volume};
pub use crate::error::{ConfigError, MAX_LENGTH};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::series::Series;
pub use crate::tsv_value::{ColorTag, TsvValue};

pub use crate::sma::{DEFAULT_MA_LENGTH, Sma, SmaConfig, SmaConfigBuilder};
pub use crate::study::{InstantTsvStudy, StudyPoint, TsvStudy, WindowedTsvStudy};
pub use crate::tsv::{Tsv, TsvConfig, TsvConfigBuilder};
pub use crate::windowed_tsv::{
    DEFAULT_TSV_LENGTH, WindowedTsv, WindowedTsvConfig, WindowedTsvConfigBuilder,
};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, candle: &impl Candle) -> Option<TsvValue> {
                <Self as Indicator>::compute(self, candle)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<TsvValue> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Tsv, TsvConfig);
impl_indicator_methods!(WindowedTsv, WindowedTsvConfig);

#[cfg(test)]
mod test_util;

#[cfg(test)]
mod inherent_methods {
    use super::{Tsv, TsvConfig, WindowedTsv, WindowedTsvConfig};
    use crate::test_util::bar;
    use std::num::NonZero;

    #[test]
    fn tsv_without_indicator_import() {
        let mut tsv = Tsv::new(TsvConfig::default());
        assert_eq!(tsv.compute(&bar(10.0, 1.0, 1)), None);
        assert!(tsv.compute(&bar(20.0, 2.0, 2)).is_some());
        assert!(tsv.value().is_some());
    }

    #[test]
    fn windowed_tsv_without_indicator_import() {
        let mut tsv = WindowedTsv::new(WindowedTsvConfig::new(NonZero::new(1).unwrap()));
        assert_eq!(tsv.compute(&bar(10.0, 1.0, 1)), None);
        assert_eq!(tsv.compute(&bar(20.0, 2.0, 2)), None);
        assert!(tsv.compute(&bar(30.0, 3.0, 3)).is_some());
        assert!(tsv.value().is_some());
    }
}
