use std::fmt::Display;

use log::{debug, trace};

use crate::{
    Candle, ColorTag, Indicator, IndicatorConfig, Price, Series, Sma, SmaConfig, Tsv, TsvValue,
    WindowedTsv, candle::BarClock,
};

/// Study over instantaneous TSV.
pub type InstantTsvStudy = TsvStudy<Tsv>;

/// Study over windowed TSV.
pub type WindowedTsvStudy = TsvStudy<WindowedTsv>;

/// Values of one bar index as seen by the rendering layer.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct StudyPoint {
    index: usize,
    tsv: Option<TsvValue>,
    ma: Option<Price>,
}

impl StudyPoint {
    /// Bar index this point belongs to.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn tsv(&self) -> Option<TsvValue> {
        self.tsv
    }

    /// Sign tag of the TSV value, if defined.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<ColorTag> {
        self.tsv.map(|tsv| tsv.tag())
    }

    /// Moving average of TSV ending at this index, if defined.
    #[inline]
    #[must_use]
    pub fn ma(&self) -> Option<Price> {
        self.ma
    }
}

impl Display for StudyPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.index)?;
        match self.tsv {
            Some(tsv) => write!(f, " {tsv}")?,
            None => f.write_str(" TSV(_)")?,
        }
        match self.ma {
            Some(ma) => write!(f, " MA({ma})"),
            None => f.write_str(" MA(_)"),
        }
    }
}

/// Time Segmented Volume and its moving average over a shared bar index.
///
/// Owns the TSV engine `E`, the moving average fed from it, and one
/// [`Series`] per output. Bars are either streamed one at a time with
/// [`advance`](Self::advance) or replayed in full with
/// [`recompute`](Self::recompute); both produce identical series.
///
/// A candle with the same `open_time` as the previous one repaints the newest
/// index: its TSV and MA slots are overwritten and no earlier slot changes.
///
/// # Example
///
/// ```rust
/// use tsv_ta::{ColorTag, InstantTsvStudy, SmaConfig, TsvConfig};
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
/// let mut study = InstantTsvStudy::new(
///     TsvConfig::default(),
///     SmaConfig::new(NonZero::new(2).unwrap()),
/// );
///
/// study.advance(&Bar(100.0, 10.0, 1));
/// study.advance(&Bar(102.0, 20.0, 2));
/// let point = study.advance(&Bar(101.0, 15.0, 3));
///
/// assert_eq!(point.tsv().map(|v| v.value()), Some(-15.0));
/// assert_eq!(point.tag(), Some(ColorTag::Negative));
/// assert_eq!(point.ma(), Some(12.5));
/// ```
#[derive(Clone, Debug)]
pub struct TsvStudy<E: Indicator> {
    tsv: E,
    ma: Sma,
    clock: BarClock,
    tsv_series: Series<TsvValue>,
    ma_series: Series<Price>,
}

impl<E: Indicator> TsvStudy<E> {
    #[must_use]
    pub fn new(tsv: E::Config, ma: SmaConfig) -> Self {
        Self {
            tsv: E::new(tsv),
            ma: Sma::new(ma),
            clock: BarClock::default(),
            tsv_series: Series::new(),
            ma_series: Series::new(),
        }
    }

    /// Feeds one candle: appends a new index, or repaints the newest one
    /// when `open_time` is unchanged.
    pub fn advance(&mut self, candle: &impl Candle) -> StudyPoint {
        let is_next_bar = self.clock.tick(candle);

        let tsv = self.tsv.compute(candle);
        let tsv_value = tsv.map(|tsv| tsv.value());

        let ma = if is_next_bar {
            let ma = self.ma.compute(tsv_value);
            self.tsv_series.push(tsv);
            self.ma_series.push(ma);
            ma
        } else {
            let ma = self.ma.repaint(tsv_value);
            self.tsv_series.set_last(tsv);
            self.ma_series.set_last(ma);
            ma
        };

        let index = self.tsv_series.len() - 1;
        if tsv.is_none() {
            trace!("{self}: bar {index} has insufficient history");
        }

        StudyPoint { index, tsv, ma }
    }

    /// Discards all state and recomputes every index from `candles`, in
    /// order.
    pub fn recompute<C: Candle>(&mut self, candles: impl IntoIterator<Item = C>) {
        let candles = candles.into_iter();

        self.reset(candles.size_hint().0);
        for candle in candles {
            self.advance(&candle);
        }

        debug!(
            "{self}: recomputed {} bars, {} TSV and {} MA values",
            self.len(),
            self.tsv_series.defined_count(),
            self.ma_series.defined_count(),
        );
        if self.tsv_series.first_defined().is_none() {
            debug!(
                "{self}: insufficient history, have {} bars, need {}",
                self.len(),
                self.tsv.config().required_bars(),
            );
        }
    }

    /// Swaps parameters. Every computed series is invalidated; feed the bars
    /// again (e.g. via [`recompute`](Self::recompute)) to rebuild them.
    pub fn reconfigure(&mut self, tsv: E::Config, ma: SmaConfig) {
        debug!(
            "{self}: reconfigured to {tsv}, {ma}, dropping {} bars",
            self.len()
        );

        *self = Self::new(tsv, ma);
    }

    /// Number of bar indices seen.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tsv_series.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tsv_series.is_empty()
    }

    /// Values at `index`, or `None` past the newest index.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<StudyPoint> {
        (index < self.len()).then(|| StudyPoint {
            index,
            tsv: self.tsv_series.get(index),
            ma: self.ma_series.get(index),
        })
    }

    /// Values at the newest index.
    #[must_use]
    pub fn last(&self) -> Option<StudyPoint> {
        self.len().checked_sub(1).and_then(|index| self.point(index))
    }

    #[inline]
    #[must_use]
    pub fn tsv_series(&self) -> &Series<TsvValue> {
        &self.tsv_series
    }

    #[inline]
    #[must_use]
    pub fn ma_series(&self) -> &Series<Price> {
        &self.ma_series
    }

    #[inline]
    #[must_use]
    pub fn tsv_config(&self) -> &E::Config {
        self.tsv.config()
    }

    #[inline]
    #[must_use]
    pub fn ma_config(&self) -> &SmaConfig {
        self.ma.config()
    }

    /// Bars needed before the first moving-average value.
    #[must_use]
    pub fn required_bars(&self) -> usize {
        self.tsv
            .config()
            .required_bars()
            .saturating_add(self.ma.config().length() - 1)
    }

    fn reset(&mut self, capacity: usize) {
        self.tsv = E::new(*self.tsv.config());
        self.ma.reset();
        self.clock = BarClock::default();
        self.tsv_series = Series::with_capacity(capacity);
        self.ma_series = Series::with_capacity(capacity);
    }
}

impl<E> Default for TsvStudy<E>
where
    E: Indicator,
    E::Config: Default,
{
    fn default() -> Self {
        Self::new(E::Config::default(), SmaConfig::default())
    }
}

impl<E: Indicator> Display for TsvStudy<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TsvStudy({}, {})", self.tsv, self.ma)
    }
}
