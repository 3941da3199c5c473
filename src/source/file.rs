//! File-based data source.
//!
//! Replays a `current.log` captured from the plug.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{DataSource, SourceError};

/// A data source that reads a captured `current.log` from disk.
///
/// The whole file is re-read on every fetch, mirroring how the device
/// serves its full log on every request.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }
}

impl DataSource for FileSource {
    fn fetch(&mut self) -> Result<Vec<u8>, SourceError> {
        let bytes = fs::read(&self.path)?;
        debug!(path = %self.path.display(), len = bytes.len(), "read captured log");
        Ok(bytes)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/current.log");
        assert_eq!(source.description(), "file: /tmp/current.log");
    }

    #[test]
    fn test_file_source_reads_raw_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x10, 0x00, 0x20, 0x00]).unwrap();
        file.flush().unwrap();

        let mut source = FileSource::new(file.path());
        assert_eq!(source.fetch().unwrap(), vec![0x10, 0x00, 0x20, 0x00]);

        // Every fetch returns the whole file again
        assert_eq!(source.fetch().unwrap().len(), 4);
    }

    #[test]
    fn test_file_source_sees_appended_readings() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x01, 0x00]).unwrap();
        file.flush().unwrap();

        let mut source = FileSource::new(file.path());
        assert_eq!(source.fetch().unwrap().len(), 2);

        file.write_all(&[0x02, 0x00]).unwrap();
        file.flush().unwrap();
        assert_eq!(source.fetch().unwrap(), vec![0x01, 0x00, 0x02, 0x00]);
    }

    #[test]
    fn test_file_source_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let mut source = FileSource::new(file.path());
        assert!(source.fetch().unwrap().is_empty());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/current.log");
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
        assert!(err.to_string().contains("Read error"));
    }
}
