//! REST identity provider.
//!
//! Talks to a GoTrue-style auth API (`/auth/v1/token`, `/auth/v1/signup`,
//! `/auth/v1/recover`). The base URL and anon key come from the
//! environment; with either missing or invalid the provider reports itself
//! unconfigured and refuses calls locally instead of hitting a placeholder
//! endpoint.

use std::time::Duration;

use serde_json::json;
use url::Url;

use super::{IdentityProvider, ProviderError};

const URL_ENV: &str = "DRAGON_GATE_AUTH_URL";
const KEY_ENV: &str = "DRAGON_GATE_AUTH_KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

struct ProviderConfig {
    base: Url,
    api_key: String,
}

pub struct RestProvider {
    http: reqwest::blocking::Client,
    config: Option<ProviderConfig>,
}

impl RestProvider {
    /// Read configuration from the environment
    pub fn from_env() -> Self {
        let url = std::env::var(URL_ENV).ok().unwrap_or_default();
        let key = std::env::var(KEY_ENV).ok().unwrap_or_default();
        Self::new(&url, &key)
    }

    pub fn new(base_url: &str, api_key: &str) -> Self {
        let config = match (Url::parse(base_url), api_key.is_empty()) {
            (Ok(base), false) => Some(ProviderConfig {
                base,
                api_key: api_key.to_string(),
            }),
            _ => {
                tracing::warn!(
                    "identity service not configured, set {} and {}",
                    URL_ENV,
                    KEY_ENV
                );
                None
            }
        };

        Self {
            http: reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build http client"),
            config,
        }
    }

    fn post(
        &self,
        path: &str,
        query: Option<&str>,
        body: serde_json::Value,
    ) -> Result<(), ProviderError> {
        let Some(config) = &self.config else {
            return Err(ProviderError::NotConfigured);
        };

        let mut endpoint = config.base.clone();
        endpoint.set_path(path);
        endpoint.set_query(query);

        let response = self
            .http
            .post(endpoint)
            .header("apikey", &config.api_key)
            .json(&body)
            .send()
            .map_err(|err| ProviderError::Service(err.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let message = extract_error_message(response.text().unwrap_or_default())
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Err(classify_error(message))
    }
}

impl IdentityProvider for RestProvider {
    fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<(), ProviderError> {
        self.post(
            "/auth/v1/token",
            Some("grant_type=password"),
            json!({ "email": email, "password": password }),
        )
    }

    fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<(), ProviderError> {
        self.post(
            "/auth/v1/signup",
            None,
            json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name },
            }),
        )
    }

    fn reset_password(&self, email: &str) -> Result<(), ProviderError> {
        self.post("/auth/v1/recover", None, json!({ "email": email }))
    }
}

/// Pull a human-readable message out of an error response body.
/// GoTrue variously uses `msg`, `message` and `error_description`.
fn extract_error_message(body: String) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(&body).ok()?;
    for key in ["msg", "message", "error_description"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
    }
    None
}

/// Map the two well-known service messages onto dedicated variants; all
/// other messages pass through verbatim
fn classify_error(message: String) -> ProviderError {
    if message.contains("already registered") {
        ProviderError::AlreadyRegistered
    } else if message.contains("Invalid login credentials") {
        ProviderError::InvalidCredentials
    } else {
        ProviderError::Service(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_reports_unconfigured() {
        let provider = RestProvider::new("", "");
        assert!(!provider.is_configured());
        assert_eq!(
            provider.sign_in("a@b.com", "pw"),
            Err(ProviderError::NotConfigured)
        );
    }

    #[test]
    fn test_invalid_url_reports_unconfigured() {
        let provider = RestProvider::new("not a url", "some-key");
        assert!(!provider.is_configured());
    }

    #[test]
    fn test_valid_config_is_configured() {
        let provider = RestProvider::new("https://auth.example.com", "anon-key");
        assert!(provider.is_configured());
    }

    #[test]
    fn test_error_classification() {
        assert_eq!(
            classify_error("User already registered".into()),
            ProviderError::AlreadyRegistered
        );
        assert_eq!(
            classify_error("Invalid login credentials".into()),
            ProviderError::InvalidCredentials
        );
        assert_eq!(
            classify_error("server exploded".into()),
            ProviderError::Service("server exploded".into())
        );
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            extract_error_message(r#"{"msg":"bad things"}"#.into()),
            Some("bad things".into())
        );
        assert_eq!(
            extract_error_message(r#"{"error_description":"no"}"#.into()),
            Some("no".into())
        );
        assert_eq!(extract_error_message("not json".into()), None);
    }
}
