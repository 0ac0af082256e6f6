/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Traded volume of a bar.
pub type Volume = f64;

/// Bar open timestamp or sequence number.
///
/// Used for bar boundary detection. Must be non-decreasing
/// between consecutive calls to [`Indicator::compute`](crate::Indicator::compute).
pub type Timestamp = u64;

/// Bar data consumed by the TSV engines.
///
/// Implement this on your own kline/candle type to avoid per-tick
/// conversion. Only the close, the volume and the bar open time are read.
///
/// # Bar boundaries
///
/// Engines detect new bars by comparing [`open_time`](Candle::open_time)
/// values: the same timestamp updates (repaints) the forming bar, a new
/// timestamp commits the previous bar and appends a new index.
///
/// # Example
///
/// ```
/// use tsv_ta::{Candle, Price, Timestamp, Volume};
///
/// struct MyKline {
///     c: f64,
///     v: f64,
///     ts: u64,
/// }
///
/// impl Candle for MyKline {
///     fn close(&self) -> Price { self.c }
///     fn volume(&self) -> Volume { self.v }
///     fn open_time(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Candle {
    /// Closing (or latest) price of the bar.
    fn close(&self) -> Price;

    /// Volume traded during the bar.
    fn volume(&self) -> Volume;

    /// Bar open timestamp or sequence number.
    ///
    /// Consecutive calls with the same value repaint the forming bar; a new
    /// value advances to the next bar index.
    ///
    /// Values must be non-decreasing between calls. Behaviour is undefined if
    /// `open_time` decreases.
    fn open_time(&self) -> Timestamp;
}

impl<C: Candle + ?Sized> Candle for &C {
    #[inline]
    fn close(&self) -> Price {
        (**self).close()
    }

    #[inline]
    fn volume(&self) -> Volume {
        (**self).volume()
    }

    #[inline]
    fn open_time(&self) -> Timestamp {
        (**self).open_time()
    }
}

/// Tracks bar boundaries across successive [`Candle`] updates.
#[derive(Clone, Copy, Default, Debug)]
pub(crate) struct BarClock {
    last_open_time: Option<Timestamp>,
}

impl BarClock {
    /// Returns `true` when `candle` starts a new bar, `false` when it repaints
    /// the forming one.
    #[inline]
    pub(crate) fn tick(&mut self, candle: &impl Candle) -> bool {
        debug_assert!(
            self.last_open_time.is_none_or(|t| t <= candle.open_time()),
            "open_time must be non-decreasing: last={}, got={}",
            self.last_open_time.unwrap_or(0),
            candle.open_time(),
        );

        let is_next_bar = self
            .last_open_time
            .is_none_or(|t| t < candle.open_time());

        if is_next_bar {
            self.last_open_time = Some(candle.open_time());
        }

        is_next_bar
    }
}
