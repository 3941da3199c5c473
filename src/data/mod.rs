//! Data models and decoding for smart plug readings.
//!
//! ## Submodules
//!
//! - [`decode`]: The byte-pair decoder for the device's `current.log`
//! - [`sample`]: A single reading ([`Sample`]) and the current-to-power formula
//! - [`trace`]: All samples from one fetch ([`Trace`]) with summary statistics
//! - [`duration`]: Parsing and formatting of interval strings (e.g., "100s", "500ms")
//!
//! ## Data Flow
//!
//! ```text
//! response body (raw bytes)
//!        │
//!        ▼
//! decode::decode_samples()   (u16 LE pairs -> mA, mA -> W)
//!        │
//!        ▼
//! Trace::from_bytes() ──▶ chart points + TraceSummary
//! ```

pub mod decode;
pub mod duration;
pub mod sample;
pub mod trace;

pub use decode::{decode_currents, decode_samples};
pub use sample::{power_watts, Sample, DEFAULT_VOLTAGE};
pub use trace::{Trace, TraceSummary};
