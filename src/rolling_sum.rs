use crate::ring_buffer::RingBuffer;
use std::num::NonZero;

/// Sum over a trailing window of fixed length.
///
/// The sum is seeded with one full scan of the window the moment it first
/// fills, then maintained in O(1) by subtracting the expiring value and adding
/// the entering one. A non-finite running sum is rebuilt by a full scan, so
/// an infinite or NaN value stops affecting the sum once it leaves the window.
#[derive(Clone, Debug)]
pub(crate) struct RollingSum {
    window: RingBuffer,
    /// `None` until the window has been filled and scanned once. Maintained
    /// incrementally afterwards, so it may accumulate FP rounding drift over
    /// very long runs relative to [`rescan`](Self::rescan).
    sum: Option<f64>,
}

impl RollingSum {
    pub(crate) fn new(length: NonZero<usize>) -> Self {
        Self {
            window: RingBuffer::new(length),
            sum: None,
        }
    }

    /// Appends a new value, sliding the window once it is full.
    #[inline]
    pub(crate) fn push(&mut self, value: f64) {
        match self.window.push(value) {
            Some(expired) => self.roll(expired, value),
            None if self.window.is_ready() => {
                self.sum = self.rescan();
            }
            None => {}
        }
    }

    /// Overwrites the newest value without sliding.
    ///
    /// Appends instead when the window is empty.
    #[inline]
    pub(crate) fn replace_last(&mut self, value: f64) {
        if self.window.is_empty() {
            self.push(value);
            return;
        }

        let old = self.window.replace(value);
        self.roll(old, value);
    }

    #[inline]
    fn roll(&mut self, leaving: f64, entering: f64) {
        let Some(sum) = self.sum.as_mut() else {
            return;
        };
        if leaving.to_bits() == entering.to_bits() {
            return;
        }

        *sum -= leaving;
        *sum += entering;

        if !sum.is_finite() {
            self.sum = self.rescan();
        }
    }

    pub(crate) fn clear(&mut self) {
        self.window.clear();
        self.sum = None;
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Running sum, or `None` until the window is full.
    #[inline]
    pub(crate) fn sum(&self) -> Option<f64> {
        self.sum
    }

    /// Sums the window from scratch, or `None` until it is full.
    pub(crate) fn rescan(&self) -> Option<f64> {
        self.window
            .is_ready()
            .then(|| self.window.iter().sum())
    }
}
