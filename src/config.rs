//! Layered configuration.
//!
//! Settings are resolved from, lowest to highest priority: built-in
//! defaults, an optional config file, `SMARTPLUG_*` environment
//! variables, and finally command-line flags.
//!
//! ```toml
//! url = "http://smartplug.local/current.log"
//! refresh = "100s"
//! timeout = "10s"
//! voltage = 220.0
//! title = "SmartPlug"
//! log_dir = "logs"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::data::DEFAULT_VOLTAGE;
use crate::source::{DataSource, FileSource, HttpSource, DEFAULT_URL};

/// Environment variable prefix (`SMARTPLUG_URL`, `SMARTPLUG_VOLTAGE`, ...).
const ENV_PREFIX: &str = "SMARTPLUG";

/// Resolved settings for a monitoring session.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// URL of the plug's `current.log`.
    pub url: String,
    /// Replay a captured log instead of polling the device.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Pause between fetches (e.g., "100s").
    pub refresh: String,
    /// HTTP request timeout (e.g., "10s").
    pub timeout: String,
    /// Mains voltage used to derive power.
    pub voltage: f64,
    /// Title shown in the header bar.
    pub title: String,
    /// Directory for the log file.
    pub log_dir: PathBuf,
}

/// Values supplied on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub file: Option<PathBuf>,
    pub refresh: Option<String>,
    pub timeout: Option<String>,
    pub voltage: Option<f64>,
    pub title: Option<String>,
    pub log_dir: Option<PathBuf>,
}

fn path_string(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.to_string_lossy().into_owned())
}

impl Settings {
    /// Load settings from all layers and validate them.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::load_with_env(config_path, Environment::with_prefix(ENV_PREFIX), overrides)
    }

    /// Load settings, reading environment variables through `env`.
    pub fn load_with_env(
        config_path: Option<&Path>,
        env: Environment,
        overrides: &Overrides,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("url", DEFAULT_URL)?
            .set_default("refresh", "100s")?
            .set_default("timeout", "10s")?
            .set_default("voltage", DEFAULT_VOLTAGE)?
            .set_default("title", "SmartPlug")?
            .set_default("log_dir", "logs")?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(env)
            .set_override_option("url", overrides.url.clone())?
            .set_override_option("file", path_string(&overrides.file))?
            .set_override_option("refresh", overrides.refresh.clone())?
            .set_override_option("timeout", overrides.timeout.clone())?
            .set_override_option("voltage", overrides.voltage)?
            .set_override_option("title", overrides.title.clone())?
            .set_override_option("log_dir", path_string(&overrides.log_dir))?
            .build()
            .context("Failed to load configuration")?;

        let mut settings: Settings =
            config.try_deserialize().context("Invalid configuration")?;

        // A URL given on the command line beats a file from a lower layer
        if overrides.url.is_some() && overrides.file.is_none() {
            settings.file = None;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Check values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<()> {
        if !self.voltage.is_finite() || self.voltage <= 0.0 {
            bail!("Voltage must be a positive number, got {}", self.voltage);
        }
        if self.refresh_interval()?.is_zero() {
            bail!("Refresh interval must be greater than zero");
        }
        self.request_timeout()?;
        Ok(())
    }

    /// Pause between fetches.
    pub fn refresh_interval(&self) -> Result<Duration> {
        parse_duration(&self.refresh)
            .with_context(|| format!("Invalid refresh interval: {}", self.refresh))
    }

    /// HTTP request timeout.
    pub fn request_timeout(&self) -> Result<Duration> {
        parse_duration(&self.timeout).with_context(|| format!("Invalid timeout: {}", self.timeout))
    }

    /// Build the data source these settings describe.
    pub fn build_source(&self) -> Result<Box<dyn DataSource>> {
        if let Some(ref path) = self.file {
            return Ok(Box::new(FileSource::new(path)));
        }
        let source = HttpSource::new(self.url.clone(), self.request_timeout()?)
            .with_context(|| format!("Failed to create HTTP client for {}", self.url))?;
        Ok(Box::new(source))
    }
}
