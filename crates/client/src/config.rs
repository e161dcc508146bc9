use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::ClientError;

pub const API_URL_ENV: &str = "ADMIN_API_URL";
pub const API_TOKEN_ENV: &str = "ADMIN_API_TOKEN";

/// Connection settings for [`crate::RestClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub token: Option<SecretString>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            token: None,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Read `ADMIN_API_URL` and the optional `ADMIN_API_TOKEN` from the environment.
    pub fn from_env() -> Result<Self, ClientError> {
        let url = std::env::var(API_URL_ENV)
            .map_err(|_| ClientError::InvalidUrl(format!("{API_URL_ENV} is not set")))?;
        let config = Self::new(&url)?;
        Ok(match std::env::var(API_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => config.with_token(token),
            _ => config,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parse a base URL, forcing a trailing slash so relative joins keep the path prefix.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let config = ClientConfig::new("https://shop.example/api/v1").unwrap();
        assert_eq!(config.base_url.as_str(), "https://shop.example/api/v1/");
        assert_eq!(
            config.base_url.join("products").unwrap().as_str(),
            "https://shop.example/api/v1/products"
        );
    }

    #[test]
    fn test_rejects_garbage_url() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
