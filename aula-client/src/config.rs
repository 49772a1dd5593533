//! Client configuration

use std::path::PathBuf;

/// Client configuration for connecting to the center API
///
/// # Environment variables
///
/// All fields can be set from the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | AULA_API_URL | http://localhost:3000 | Center API base URL |
/// | AULA_TIMEOUT_SECS | 30 | Request timeout in seconds |
/// | AULA_CREDENTIALS_DIR | .aula | Directory for the credential file |
///
/// # Example
///
/// ```ignore
/// AULA_API_URL=https://center.example.com aula-console
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Center API base URL (e.g., "http://localhost:3000")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Directory holding the persisted credential file
    pub credentials_dir: PathBuf,
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but the URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
            credentials_dir: PathBuf::from(".aula"),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("AULA_API_URL").unwrap_or_else(|_| "http://localhost:3000".into());
        Self {
            timeout_secs: std::env::var("AULA_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            credentials_dir: std::env::var("AULA_CREDENTIALS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".aula")),
            ..Self::new(base_url)
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Set the credential directory
    pub fn with_credentials_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.credentials_dir = dir.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.credentials_dir, PathBuf::from(".aula"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("https://center.example.com")
            .with_timeout(5)
            .with_credentials_dir("/tmp/aula-test");
        assert_eq!(config.base_url, "https://center.example.com");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.credentials_dir, PathBuf::from("/tmp/aula-test"));
    }
}
