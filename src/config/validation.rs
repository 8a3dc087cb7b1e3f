use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("fetch.base_url is empty")]
    MissingBaseUrl,

    #[error("fetch.base_url '{url}' is not a valid http(s) URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("fetch.image_count must be at least 1")]
    NoImages,

    #[error("fetch.pad_width must be between 1 and 9, got {0}")]
    InvalidPadWidth(usize),

    #[error("fetch.fallback_extension must start with '.', got '{0}'")]
    InvalidFallbackExtension(String),

    #[error("archive.name '{0}' must be non-empty and contain no path separators")]
    InvalidArchiveName(String),

    #[error("http.request_timeout_secs must be positive")]
    ZeroRequestTimeout,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_fetch(config)?;
    validate_archive(config)?;
    validate_http(config)?;
    Ok(())
}

fn validate_fetch(config: &Config) -> Result<(), ValidationError> {
    let base_url = config.fetch.base_url.trim();
    if base_url.is_empty() {
        return Err(ValidationError::MissingBaseUrl);
    }

    // Probe with a sample index so that prefixes like "https://host/page="
    // are checked the way they will actually be requested.
    let probe = format!("{}1{}", base_url, config.fetch.url_suffix);
    let parsed = reqwest::Url::parse(&probe).map_err(|e| ValidationError::InvalidBaseUrl {
        url: config.fetch.base_url.clone(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidBaseUrl {
            url: config.fetch.base_url.clone(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    if config.fetch.image_count == 0 {
        return Err(ValidationError::NoImages);
    }

    if !(1..=9).contains(&config.fetch.pad_width) {
        return Err(ValidationError::InvalidPadWidth(config.fetch.pad_width));
    }

    let fallback = &config.fetch.fallback_extension;
    if !fallback.starts_with('.') || fallback.len() < 2 {
        return Err(ValidationError::InvalidFallbackExtension(fallback.clone()));
    }

    Ok(())
}

fn validate_archive(config: &Config) -> Result<(), ValidationError> {
    let name = &config.archive.name;
    if name.trim().is_empty() || name.contains(['/', '\\']) || name == ".." {
        return Err(ValidationError::InvalidArchiveName(name.clone()));
    }

    Ok(())
}

fn validate_http(config: &Config) -> Result<(), ValidationError> {
    if config.http.request_timeout_secs == 0 {
        return Err(ValidationError::ZeroRequestTimeout);
    }

    Ok(())
}
