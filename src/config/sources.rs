use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "PAGEFETCH_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/pagefetch.toml";
const ENV_PREFIX: &str = "PAGEFETCH";
const ENV_SEPARATOR: &str = "__";

/// Path of the TOML file: `$PAGEFETCH_CONFIG` or the default location
pub fn config_path() -> PathBuf {
    env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    load_from_sources(config_path())
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // PAGEFETCH__FETCH__BASE_URL -> fetch.base_url
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.fetch.pad_width, 3);
        assert_eq!(config.fetch.url_suffix, ".jpg");
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[fetch]
base_url = "https://cdn.example.com/series/12/"
image_count = 24
output_dir = "chapter-12"
url_suffix = ""

[archive]
enabled = true
name = "series-12"

[http]
request_timeout_secs = 15
user_agent = "test-agent/1.0"

[telemetry]
log_level = "debug"
log_file = "download_images.log"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.fetch.base_url, "https://cdn.example.com/series/12/");
        assert_eq!(config.fetch.image_count, 24);
        assert_eq!(config.fetch.output_dir, PathBuf::from("chapter-12"));
        assert_eq!(config.fetch.url_suffix, "");
        assert!(config.archive.enabled);
        assert_eq!(config.archive.name, "series-12");
        assert_eq!(config.http.request_timeout_secs, 15);
        assert_eq!(config.http.connect_timeout_secs, 10);
        assert_eq!(config.http.user_agent, "test-agent/1.0");
        assert_eq!(
            config.telemetry.log_file,
            Some(PathBuf::from("download_images.log"))
        );
    }

    // Note: no env override test, env::set_var is unsafe in edition 2024
}
