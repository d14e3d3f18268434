use thiserror::Error;

/// Errors surfaced by the synthesis core.
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A streamed chunk ended in the middle of a 16-bit sample.
    #[error("Audio chunk #{index} is {len} bytes, not a whole number of 16-bit samples")]
    Decoding { index: usize, len: usize },

    /// Streamed PCM arrived at a rate other than the one it is accumulated at.
    #[error("Audio is {actual} Hz, expected {expected} Hz")]
    SampleRate { expected: u32, actual: u32 },

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Raised by the synthesis service and passed through untouched.
    #[error("Synthesis service error: {0}")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl TtsError {
    pub fn upstream<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        TtsError::Upstream(Box::new(err))
    }
}

pub type Result<T, E = TtsError> = std::result::Result<T, E>;
