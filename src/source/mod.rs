//! Data source abstraction for fetching raw plug readings.
//!
//! The plug serves its log as raw bytes; a source's only job is to hand
//! those bytes back. Decoding happens in [`crate::data`].

mod error;
mod file;
mod http;

pub use error::SourceError;
pub use file::FileSource;
pub use http::{HttpSource, DEFAULT_URL};

use std::fmt::Debug;

/// Trait for fetching the raw `current.log` bytes from somewhere.
///
/// # Example
///
/// ```no_run
/// use smartplug_monitor::{DataSource, FileSource};
///
/// let mut source = FileSource::new("current.log");
/// let bytes = source.fetch()?;
/// println!("Got {} bytes", bytes.len());
/// # Ok::<(), smartplug_monitor::SourceError>(())
/// ```
pub trait DataSource: Send + Debug {
    /// Fetch the full response body.
    ///
    /// Blocks until the body is available. An empty body is not an error.
    fn fetch(&mut self) -> Result<Vec<u8>, SourceError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
