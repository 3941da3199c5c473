//! Decoder for the plug's `current.log` byte stream.
//!
//! The device writes one reading per second as a little-endian `u16`
//! (milliamps): low byte first, then high byte. There is no header and
//! no framing beyond the byte pairs.

use tracing::debug;

use super::sample::Sample;

/// Decode raw bytes into current readings in milliamps.
///
/// An odd trailing byte is dropped.
pub fn decode_currents(bytes: &[u8]) -> Vec<u16> {
    let pairs = bytes.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        debug!(len = bytes.len(), "dropping odd trailing byte");
    }
    pairs.map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect()
}

/// Decode raw bytes into samples, deriving power with `voltage`.
pub fn decode_samples(bytes: &[u8], voltage: f64) -> Vec<Sample> {
    decode_currents(bytes)
        .into_iter()
        .map(|current| Sample::new(current, voltage))
        .collect()
}
