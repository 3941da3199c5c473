//! HTTP data source.
//!
//! Polls the plug's web server for its `current.log`.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use super::{DataSource, SourceError};

/// Default location of the plug's log on the local network.
pub const DEFAULT_URL: &str = "http://smartplug.local/current.log";

/// A data source that fetches readings from the plug over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
    description: String,
}

impl HttpSource {
    /// Create a source for `url`, giving up on a request after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let url = url.into();
        let client = Client::builder().timeout(timeout).build()?;
        let description = format!("http: {}", url);
        Ok(Self {
            client,
            url,
            description,
        })
    }
}

impl DataSource for HttpSource {
    fn fetch(&mut self) -> Result<Vec<u8>, SourceError> {
        let response = self.client.get(&self.url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes()?;
        debug!(url = %self.url, len = body.len(), "fetched readings");
        Ok(body.to_vec())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve a single HTTP response on a random local port, returning its URL.
    fn serve_once(status: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            // Drain the request headers
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }

            let mut stream = reader.into_inner();
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            )
            .unwrap();
            stream.write_all(body).unwrap();
            stream.flush().unwrap();
        });

        format!("http://{}/current.log", addr)
    }

    #[test]
    fn test_http_source_new() {
        let source = HttpSource::new(DEFAULT_URL, Duration::from_secs(1)).unwrap();
        assert_eq!(source.description(), "http: http://smartplug.local/current.log");
    }

    #[test]
    fn test_http_source_returns_body_bytes() {
        let url = serve_once("200 OK", &[0x10, 0x00, 0x20, 0x00, 0xFF]);
        let mut source = HttpSource::new(url, Duration::from_secs(5)).unwrap();

        assert_eq!(source.fetch().unwrap(), vec![0x10, 0x00, 0x20, 0x00, 0xFF]);
    }

    #[test]
    fn test_http_source_empty_body_is_ok() {
        let url = serve_once("200 OK", b"");
        let mut source = HttpSource::new(url, Duration::from_secs(5)).unwrap();

        assert!(source.fetch().unwrap().is_empty());
    }

    #[test]
    fn test_http_source_error_status() {
        let url = serve_once("404 Not Found", b"missing");
        let mut source = HttpSource::new(url, Duration::from_secs(5)).unwrap();

        let err = source.fetch().unwrap_err();
        assert!(matches!(err, SourceError::Status(404)));
        assert_eq!(err.to_string(), "Device returned status 404");
    }

    #[test]
    fn test_http_source_connection_refused() {
        // Grab a free port, then close it so nothing is listening
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{}/current.log", port);
        let mut source = HttpSource::new(url, Duration::from_secs(5)).unwrap();

        let err = source.fetch().unwrap_err();
        assert!(matches!(err, SourceError::Connection(_)));
    }
}
