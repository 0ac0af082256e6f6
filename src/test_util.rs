// src/test_util.rs

use crate::{Candle, Price, Timestamp, Volume};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() < e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

#[derive(Clone, Copy, Debug)]
pub struct Bar {
    pub close: f64,
    pub volume: f64,
    pub open_time: u64,
}

/// Convenience: bar with a close, a volume and an open timestamp.
pub fn bar(close: f64, volume: f64, time: u64) -> Bar {
    Bar {
        close,
        volume,
        open_time: time,
    }
}

impl Candle for Bar {
    fn close(&self) -> Price {
        self.close
    }
    fn volume(&self) -> Volume {
        self.volume
    }
    fn open_time(&self) -> Timestamp {
        self.open_time
    }
}
