//! The seam between the core and a text-to-speech backend.
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioEncoding, SynthesizedAudio};
use crate::error::{Result, TtsError};
use crate::voice::VoiceSelector;

pub const MIN_SPEAKING_RATE: f32 = 0.25;
pub const MAX_SPEAKING_RATE: f32 = 2.0;

/// `rate` must lie in `MIN_SPEAKING_RATE..=MAX_SPEAKING_RATE`; 1.0 is normal speed.
pub fn check_speaking_rate(rate: f32) -> Result<()> {
    if (MIN_SPEAKING_RATE..=MAX_SPEAKING_RATE).contains(&rate) {
        Ok(())
    } else {
        Err(TtsError::InvalidInput(format!(
            "Speaking rate {rate} is outside {MIN_SPEAKING_RATE}..={MAX_SPEAKING_RATE}"
        )))
    }
}

/// Audio and style settings for a single synthesis request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SynthesisSettings {
    pub encoding: AudioEncoding,
    pub speaking_rate: Option<f32>,
    pub sample_rate_hertz: Option<u32>,
    /// Style instruction, read by Gemini-TTS models only.
    pub prompt: Option<String>,
}

impl SynthesisSettings {
    pub fn new(encoding: AudioEncoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    pub fn with_speaking_rate(mut self, rate: f32) -> Self {
        self.speaking_rate = Some(rate);
        self
    }

    pub fn with_sample_rate(mut self, hertz: u32) -> Self {
        self.sample_rate_hertz = Some(hertz);
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(rate) = self.speaking_rate {
            check_speaking_rate(rate)?;
        }
        if self.sample_rate_hertz == Some(0) {
            return Err(TtsError::InvalidInput("Sample rate must be positive".to_string()));
        }
        Ok(())
    }
}

/// Settings sent once at the start of a streaming call.
///
/// Streaming always returns LINEAR16 at the streaming sample rate, so only
/// the voice and its delivery are configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingConfig {
    pub voice: VoiceSelector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaking_rate: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl StreamingConfig {
    pub fn new(voice: VoiceSelector) -> Self {
        Self {
            voice,
            speaking_rate: None,
            prompt: None,
        }
    }

    pub fn with_speaking_rate(mut self, rate: f32) -> Self {
        self.speaking_rate = Some(rate);
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        match self.speaking_rate {
            Some(rate) => check_speaking_rate(rate),
            None => Ok(()),
        }
    }
}

impl From<VoiceSelector> for StreamingConfig {
    fn from(voice: VoiceSelector) -> Self {
        Self::new(voice)
    }
}

/// One message of a client-streaming synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamingRequest {
    /// Must come first, exactly once. Carries no text.
    Config(StreamingConfig),
    Input(String),
}

/// The request sequence for `texts`: one config message, then one input per text.
pub fn streaming_requests<C, I>(config: C, texts: I) -> impl Iterator<Item = StreamingRequest>
where
    C: Into<StreamingConfig>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    std::iter::once(StreamingRequest::Config(config.into()))
        .chain(texts.into_iter().map(|t| StreamingRequest::Input(t.into())))
}

#[async_trait]
pub trait SynthesisService: Send + Sync {
    /// Synthesize a whole text in one request.
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSelector,
        settings: &SynthesisSettings,
    ) -> Result<SynthesizedAudio>;

    /// Turn a request stream into raw PCM chunks, in input order.
    ///
    /// A stream that does not open with [`StreamingRequest::Config`], or that
    /// repeats it, yields `TtsError::InvalidInput`.
    fn streaming_synthesize(
        &self,
        requests: BoxStream<'static, StreamingRequest>,
    ) -> BoxStream<'static, Result<Bytes>>;
}
