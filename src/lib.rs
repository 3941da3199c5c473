//! # smartplug-monitor
//!
//! A terminal chart for an ESP8266 smart plug.
//!
//! The plug serves its readings as `current.log`: a flat run of
//! little-endian `u16` milliamp values, one per second. This crate polls
//! that file, decodes it, derives power from a fixed mains voltage, and
//! draws current and power as two stacked line charts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (decode) │    │ (charts)│    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource                     │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, fetch scheduling, and export
//! - **[`source`]**: The [`DataSource`] trait with HTTP and file implementations
//! - **[`data`]**: The byte-pair decoder, [`Sample`], and [`Trace`]
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings (defaults, file, environment, flags)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the plug every 100 seconds (the default)
//! smartplug --url http://smartplug.local/current.log
//!
//! # Replay a captured log
//! smartplug --file current.log
//!
//! # Fetch once and dump the samples
//! smartplug --export samples.json
//! ```
//!
//! ### Decoding
//!
//! ```
//! use smartplug_monitor::{decode_samples, DEFAULT_VOLTAGE};
//!
//! let samples = decode_samples(&[0x10, 0x00, 0x20, 0x00], DEFAULT_VOLTAGE);
//! assert_eq!(samples[1].current_ma, 32);
//! assert!((samples[1].power_w - 7.04).abs() < 1e-9);
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use std::time::Duration;
//! use smartplug_monitor::{App, FileSource, DEFAULT_VOLTAGE};
//!
//! let source = Box::new(FileSource::new("current.log"));
//! let app = App::new(source, DEFAULT_VOLTAGE, Duration::from_secs(100));
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, FetchOutcome};
pub use config::Settings;
pub use data::{decode_currents, decode_samples, Sample, Trace, TraceSummary, DEFAULT_VOLTAGE};
pub use source::{DataSource, FileSource, HttpSource, SourceError};
pub use ui::Theme;
