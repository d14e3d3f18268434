use serde::Deserialize;
use thiserror::Error;
use tts_core::TtsError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the Text-to-Speech API.
    #[error("Text-to-Speech API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid audioContent: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl From<ClientError> for TtsError {
    fn from(err: ClientError) -> Self {
        TtsError::upstream(err)
    }
}

/// Google API error body: `{"error": {"code": 403, "message": "...", "status": "PERMISSION_DENIED"}}`
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl ClientError {
    /// Build an `Api` error from a failed response body.
    pub(crate) fn from_response_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(env) => match env.error.status {
                Some(code) => format!("{code}: {}", env.error.message),
                None => env.error.message,
            },
            Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
            Err(_) => body.trim().to_string(),
        };
        ClientError::Api { status, message }
    }
}
