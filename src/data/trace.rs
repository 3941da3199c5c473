//! One fetch worth of decoded samples.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use super::decode::decode_samples;
use super::sample::Sample;

/// Samples decoded from a single response, plus when they arrived.
///
/// Each fetch produces a fresh trace; nothing carries over between
/// fetches. Index `i` in `samples` is tick `i`, one second apart.
#[derive(Debug, Clone)]
pub struct Trace {
    pub samples: Vec<Sample>,
    /// Voltage the power values were derived with.
    pub voltage: f64,
    /// When the response was received (for "updated Xs ago").
    pub received_at: Instant,
    /// Wall-clock capture time, milliseconds since the Unix epoch.
    pub captured_ms: u64,
}

/// Summary statistics over a trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceSummary {
    pub count: usize,
    pub latest_current_ma: Option<u16>,
    pub latest_power_w: Option<f64>,
    pub peak_current_ma: Option<u16>,
    pub mean_current_ma: Option<f64>,
    pub peak_power_w: Option<f64>,
    pub mean_power_w: Option<f64>,
}

impl Trace {
    /// Decode a response body into a trace.
    pub fn from_bytes(bytes: &[u8], voltage: f64) -> Self {
        Self {
            samples: decode_samples(bytes, voltage),
            voltage,
            received_at: Instant::now(),
            captured_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Chart points of (tick, current in mA).
    pub fn current_points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(tick, s)| (tick as f64, f64::from(s.current_ma)))
            .collect()
    }

    /// Chart points of (tick, power in W).
    pub fn power_points(&self) -> Vec<(f64, f64)> {
        self.samples.iter().enumerate().map(|(tick, s)| (tick as f64, s.power_w)).collect()
    }

    pub fn summary(&self) -> TraceSummary {
        let count = self.samples.len();
        let latest = self.latest();

        let (mean_current_ma, mean_power_w) = if count == 0 {
            (None, None)
        } else {
            let current_sum: f64 = self.samples.iter().map(|s| f64::from(s.current_ma)).sum();
            let power_sum: f64 = self.samples.iter().map(|s| s.power_w).sum();
            (Some(current_sum / count as f64), Some(power_sum / count as f64))
        };

        TraceSummary {
            count,
            latest_current_ma: latest.map(|s| s.current_ma),
            latest_power_w: latest.map(|s| s.power_w),
            peak_current_ma: self.samples.iter().map(|s| s.current_ma).max(),
            mean_current_ma,
            peak_power_w: self.samples.iter().map(|s| s.power_w).reduce(f64::max),
            mean_power_w,
        }
    }
}
