use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::{FetchConfig, HttpConfig};

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchSettings,
    #[serde(default)]
    pub archive: ArchiveSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Which pages to fetch and where they go
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchSettings {
    /// Prefix of every page URL; the index is appended directly
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_image_count")]
    pub image_count: u32,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Appended after the index (`.jpg` gives `{base}{i}.jpg`, empty gives `{base}{i}`)
    #[serde(default = "default_url_suffix")]
    pub url_suffix: String,
    #[serde(default = "default_pad_width")]
    pub pad_width: usize,
    #[serde(default = "default_fallback_extension")]
    pub fallback_extension: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            image_count: default_image_count(),
            output_dir: default_output_dir(),
            url_suffix: default_url_suffix(),
            pad_width: default_pad_width(),
            fallback_extension: default_fallback_extension(),
        }
    }
}

fn default_image_count() -> u32 {
    1
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_url_suffix() -> String {
    ".jpg".to_string()
}

fn default_pad_width() -> usize {
    3
}

fn default_fallback_extension() -> String {
    ".jpg".to_string()
}

/// CBZ packaging
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveSettings {
    #[serde(default)]
    pub enabled: bool,
    /// Archive base name, written as `<output_dir>/<name>.cbz`
    #[serde(default = "default_archive_name")]
    pub name: String,
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            name: default_archive_name(),
        }
    }
}

fn default_archive_name() -> String {
    "chapter".to_string()
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpSettings {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    HttpConfig::default().user_agent
}

fn default_max_redirects() -> usize {
    10
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Write logs to this file instead of stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Input record for the fetch collector
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            base_url: self.fetch.base_url.clone(),
            image_count: self.fetch.image_count,
            output_dir: self.fetch.output_dir.clone(),
            url_suffix: self.fetch.url_suffix.clone(),
            pad_width: self.fetch.pad_width,
            fallback_extension: self.fetch.fallback_extension.clone(),
        }
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            connect_timeout: Duration::from_secs(self.http.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.http.request_timeout_secs),
            max_redirects: self.http.max_redirects,
            user_agent: self.http.user_agent.clone(),
        }
    }

    /// Destination of the CBZ, if packaging is enabled
    pub fn archive_path(&self) -> Option<PathBuf> {
        self.archive
            .enabled
            .then(|| crate::archive::cbz_path(&self.fetch.output_dir, &self.archive.name))
    }
}
