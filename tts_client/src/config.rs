// Connection settings for the Text-to-Speech API

use std::{fmt, time::Duration};

use crate::error::ClientError;

const DEFAULT_LOCATION: &str = "global";
const DEFAULT_API_VERSION: &str = "v1beta1";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Clone)]
pub enum Credentials {
    /// OAuth access token, e.g. from `gcloud auth application-default print-access-token`.
    AccessToken(String),
    ApiKey(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            Credentials::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Billing / quota project sent as `x-goog-user-project`.
    pub project_id: Option<String>,
    pub location: String,
    /// Full base URL; overrides the one derived from `location`.
    pub endpoint: Option<String>,
    pub api_version: String,
    pub credentials: Credentials,
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            project_id: None,
            location: DEFAULT_LOCATION.to_string(),
            endpoint: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            credentials,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let credentials = if let Some(token) = get("GOOGLE_ACCESS_TOKEN") {
            Credentials::AccessToken(token)
        } else if let Some(key) = get("GOOGLE_API_KEY") {
            Credentials::ApiKey(key)
        } else {
            return Err(ClientError::Config(
                "set GOOGLE_ACCESS_TOKEN or GOOGLE_API_KEY".to_string(),
            ));
        };

        let request_timeout_secs = match get("TTS_REQUEST_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|_| {
                ClientError::Config(format!("TTS_REQUEST_TIMEOUT_SECS is not a number: {v}"))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            project_id: get("GOOGLE_CLOUD_PROJECT"),
            location: get("TTS_LOCATION").unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            endpoint: get("TTS_API_ENDPOINT"),
            api_version: get("TTS_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            credentials,
            request_timeout_secs,
        })
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Regional locations get their own host; `global` uses the default one.
    pub fn api_endpoint(&self) -> String {
        if let Some(ref endpoint) = self.endpoint {
            return endpoint.trim_end_matches('/').to_string();
        }
        if self.location == DEFAULT_LOCATION {
            "https://texttospeech.googleapis.com".to_string()
        } else {
            format!("https://{}-texttospeech.googleapis.com", self.location)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_endpoint_follows_location() {
        let cfg = ClientConfig::new(Credentials::ApiKey("k".into()));
        assert_eq!(cfg.api_endpoint(), "https://texttospeech.googleapis.com");

        let cfg = cfg.with_location("eu");
        assert_eq!(cfg.api_endpoint(), "https://eu-texttospeech.googleapis.com");

        let cfg = cfg.with_endpoint("http://127.0.0.1:9000/");
        assert_eq!(cfg.api_endpoint(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_from_vars_defaults() {
        let cfg = ClientConfig::from_vars(vars(&[("GOOGLE_ACCESS_TOKEN", "tok")])).unwrap();
        assert!(matches!(cfg.credentials, Credentials::AccessToken(ref t) if t == "tok"));
        assert_eq!(cfg.location, "global");
        assert_eq!(cfg.api_version, "v1beta1");
        assert_eq!(cfg.project_id, None);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_from_vars_overrides() {
        let cfg = ClientConfig::from_vars(vars(&[
            ("GOOGLE_ACCESS_TOKEN", "  "),
            ("GOOGLE_API_KEY", "key"),
            ("GOOGLE_CLOUD_PROJECT", "my-project"),
            ("TTS_LOCATION", "us"),
            ("TTS_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert!(matches!(cfg.credentials, Credentials::ApiKey(ref k) if k == "key"));
        assert_eq!(cfg.project_id.as_deref(), Some("my-project"));
        assert_eq!(cfg.api_endpoint(), "https://us-texttospeech.googleapis.com");
        assert_eq!(cfg.request_timeout_secs, 5);
    }

    #[test]
    fn test_from_vars_requires_credentials() {
        let err = ClientConfig::from_vars(vars(&[("GOOGLE_CLOUD_PROJECT", "p")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_from_vars_rejects_bad_timeout() {
        let err = ClientConfig::from_vars(vars(&[
            ("GOOGLE_API_KEY", "k"),
            ("TTS_REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(msg) if msg.contains("soon")));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cfg = ClientConfig::new(Credentials::AccessToken("secret-token".into()));
        assert!(!format!("{cfg:?}").contains("secret-token"));
    }
}
