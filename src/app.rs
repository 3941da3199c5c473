//! Application state for the live chart.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::data::{Sample, Trace, TraceSummary};
use crate::source::{DataSource, SourceError};
use crate::ui::Theme;

/// Default file written by the export key.
pub const EXPORT_PATH: &str = "smartplug_export.json";

/// What a fetch produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A new trace with this many samples replaced the old one.
    Updated(usize),
    /// The device returned an empty body; nothing to draw.
    Empty,
}

/// Main application state.
///
/// Owns the data source and the single trace currently on screen.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub trace: Option<Trace>,
    pub voltage: f64,
    pub refresh_interval: Duration,
    /// When the next fetch is due. `None` means immediately.
    pub next_fetch: Option<Instant>,

    // Counters for the status bar and logs
    pub fetch_count: u64,
    pub empty_count: u64,

    // UI
    pub title: String,
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App polling `source` every `refresh_interval`.
    pub fn new(source: Box<dyn DataSource>, voltage: f64, refresh_interval: Duration) -> Self {
        Self {
            running: true,
            show_help: false,
            source,
            trace: None,
            voltage,
            refresh_interval,
            next_fetch: None,
            fetch_count: 0,
            empty_count: 0,
            title: "SmartPlug".to_string(),
            theme: Theme::dark(),
            status_message: None,
        }
    }

    /// Set the title shown in the header.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Use `theme` instead of the default dark theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Whether a fetch is due at `now`.
    pub fn fetch_due(&self, now: Instant) -> bool {
        self.next_fetch.is_none_or(|due| now >= due)
    }

    /// Time left until the next fetch.
    pub fn time_until_fetch(&self) -> Duration {
        self.next_fetch
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or_default()
    }

    /// Ask for a fetch on the next loop iteration.
    pub fn request_refresh(&mut self) {
        self.next_fetch = None;
    }

    /// Fetch from the source and replace the trace.
    ///
    /// An empty body leaves the current trace alone and schedules the
    /// next fetch immediately. Any source error is returned to the caller.
    pub fn reload_data(&mut self) -> Result<FetchOutcome, SourceError> {
        let bytes = self.source.fetch()?;
        self.fetch_count += 1;

        if bytes.is_empty() {
            self.empty_count += 1;
            self.next_fetch = None;
            debug!(source = self.source.description(), "empty response, retrying");
            return Ok(FetchOutcome::Empty);
        }

        let trace = Trace::from_bytes(&bytes, self.voltage);
        let count = trace.len();
        info!(samples = count, bytes = bytes.len(), "trace updated");

        self.trace = Some(trace);
        self.next_fetch = Some(Instant::now() + self.refresh_interval);
        Ok(FetchOutcome::Updated(count))
    }

    /// Summary statistics of the trace on screen.
    pub fn summary(&self) -> Option<TraceSummary> {
        self.trace.as_ref().map(Trace::summary)
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current trace to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref trace) = self.trace else {
            anyhow::bail!("No samples to export");
        };
        write_export(path, self.source_description(), trace)?;
        info!(path = %path.display(), samples = trace.len(), "exported trace");
        Ok(())
    }
}

#[derive(Serialize)]
struct ExportedSample {
    tick: usize,
    #[serde(flatten)]
    sample: Sample,
}

/// Write `trace` as pretty JSON to `path`.
pub fn write_export(path: &Path, source: &str, trace: &Trace) -> Result<()> {
    let samples: Vec<ExportedSample> = trace
        .samples
        .iter()
        .enumerate()
        .map(|(tick, sample)| ExportedSample {
            tick,
            sample: *sample,
        })
        .collect();

    let export = serde_json::json!({
        "source": source,
        "voltage": trace.voltage,
        "captured_ms": trace.captured_ms,
        "summary": trace.summary(),
        "samples": samples,
    });

    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Fetch once from `source` and export the samples to `path`.
///
/// An empty body is an error here: there is nothing to retry into.
/// Returns the number of samples written.
pub fn export_once(source: &mut dyn DataSource, voltage: f64, path: &Path) -> Result<usize> {
    let bytes = source.fetch()?;
    if bytes.is_empty() {
        anyhow::bail!("{} returned no data", source.description());
    }

    let trace = Trace::from_bytes(&bytes, voltage);
    write_export(path, source.description(), &trace)?;
    info!(path = %path.display(), samples = trace.len(), "exported trace");
    Ok(trace.len())
}
