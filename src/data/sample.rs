//! A single current/power reading.

use serde::Serialize;

/// Mains voltage used to derive power from current.
pub const DEFAULT_VOLTAGE: f64 = 220.0;

/// Derive power in watts from a current in milliamps.
pub fn power_watts(current_ma: u16, voltage: f64) -> f64 {
    voltage * f64::from(current_ma) / 1000.0
}

/// One (current, power) reading for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Current in milliamps.
    pub current_ma: u16,
    /// Power in watts, derived from `current_ma`.
    pub power_w: f64,
}

impl Sample {
    /// Build a sample from a raw current reading.
    pub fn new(current_ma: u16, voltage: f64) -> Self {
        Self {
            current_ma,
            power_w: power_watts(current_ma, voltage),
        }
    }
}
