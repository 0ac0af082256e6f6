#![allow(dead_code)]

use serde::{Deserialize, de::DeserializeOwned};
use tsv_ta::{Candle, Price, Timestamp, Volume};

/// Hourly OHLCV bar parsed from the fixture CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle for RefBar {
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

const OHLCV_PATH: &str = "tests/fixtures/data/ohlcv-1h.csv";

/// Load reference OHLCV bars.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// `(close[i] - close[i-1]) * volume[i]`, undefined at index 0.
pub fn naive_tsv(bars: &[RefBar]) -> Vec<Option<f64>> {
    (0..bars.len())
        .map(|i| {
            (i >= 1).then(|| (bars[i].close - bars[i - 1].close) * bars[i].volume)
        })
        .collect()
}

/// Full-window scan: `Σ (close[k] - close[k-1]) * volume[k]` for
/// `k = i-length ..= i-1`, undefined unless every `k >= 1`.
pub fn naive_windowed_tsv(bars: &[RefBar], length: usize) -> Vec<Option<f64>> {
    (0..bars.len())
        .map(|i| {
            (i > length).then(|| {
                (i - length..i)
                    .map(|k| (bars[k].close - bars[k - 1].close) * bars[k].volume)
                    .sum::<f64>()
            })
        })
        .collect()
}

/// Mean of the `length` values ending at each index, undefined if any of
/// them is.
pub fn naive_sma(values: &[Option<f64>], length: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            if i + 1 < length {
                return None;
            }
            let window = &values[i + 1 - length..=i];
            let sum = window.iter().copied().sum::<Option<f64>>()?;
            #[allow(clippy::cast_precision_loss)]
            let length = length as f64;
            Some(sum / length)
        })
        .collect()
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Creates perturbed versions of a bar to simulate live repaints.
///
/// Returns 2 intermediate bars (with shifted close and partial volume)
/// followed by the original bar. All share the same `open_time`.
pub fn repaint_sequence(bar: &RefBar) -> Vec<RefBar> {
    let t = bar.open_time;
    vec![
        // First tick: close near open, almost no volume yet
        RefBar {
            close: bar.open * 1.0005,
            volume: bar.volume * 0.01,
            open_time: t,
            ..*bar
        },
        // Mid-bar: partial movement toward final values
        RefBar {
            close: bar.open.midpoint(bar.close),
            volume: bar.volume * 0.5,
            open_time: t,
            ..*bar
        },
        // Final: real OHLCV values
        bar.clone(),
    ]
}

pub fn assert_values_match(
    bar_idx: usize,
    expected: Option<f64>,
    actual: Option<f64>,
    tolerance: f64,
) {
    match (expected, actual) {
        (None, None) => {} // both not yet computable
        (Some(e), Some(a)) => {
            let diff = (e - a).abs();
            assert!(
                diff <= tolerance,
                "diverged at bar {bar_idx}: expected={e:.10}, actual={a:.10}, diff={diff:.2e}"
            );
        }
        (e, a) => {
            panic!("definedness mismatch at bar {bar_idx}: expected={e:?}, actual={a:?}");
        }
    }
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
