use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    /// Maximum upload size in bytes, checked before the request is sent
    pub max_upload_size: u64,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL without a trailing slash
    pub base_url: String,
    /// Fixed `size` query parameter for material listings
    pub page_size: u32,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory holding the session database
    pub dir: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            page_size: 100,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: "./.classroom-buddy".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            max_upload_size: 50 * 1024 * 1024, // 50MB
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let base_url = std::env::var("API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let page_size = std::env::var("PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        let session_dir =
            std::env::var("SESSION_DIR").unwrap_or_else(|_| "./.classroom-buddy".to_string());

        let max_upload_size = std::env::var("MAX_UPLOAD_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(50 * 1024 * 1024);

        let config = Config {
            api: ApiConfig {
                base_url,
                page_size,
            },
            session: SessionConfig { dir: session_dir },
            max_upload_size,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::ValidationError(format!(
                "API_URL '{}' is not a valid URL: {e}",
                self.api.base_url
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "API_URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.api.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "PAGE_SIZE must be greater than 0".to_string(),
            ));
        }

        if self.max_upload_size == 0 {
            return Err(ConfigError::ValidationError(
                "MAX_UPLOAD_SIZE must be greater than 0".to_string(),
            ));
        }

        if self.session.dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "SESSION_DIR cannot be empty".to_string(),
            ));
        }

        if url.scheme() == "http" && !matches!(url.host_str(), Some("localhost" | "127.0.0.1")) {
            tracing::warn!(
                "API_URL {} is plain http. Session tokens will be sent unencrypted.",
                self.api.base_url
            );
        }

        Ok(())
    }
}
