use std::path::PathBuf;

use thiserror::Error;
use tts_client::ClientError;
use tts_core::TtsError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("TTS error: {0}")]
    Tts(#[from] TtsError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}
