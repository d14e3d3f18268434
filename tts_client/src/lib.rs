pub mod config;
pub mod error;

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use futures::{stream::BoxStream, StreamExt};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;
use tts_core::{
    AudioEncoding, PcmBuffer, StreamingRequest, SynthesisService, SynthesisSettings,
    SynthesizedAudio, TtsError, VoiceSelector, STREAMING_SAMPLE_RATE,
};

pub use config::{ClientConfig, Credentials};
pub use error::ClientError;

/// Body of `text:synthesize`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: &'a VoiceSelector,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
    /// Gemini-TTS style instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: AudioEncoding,
    #[serde(skip_serializing_if = "Option::is_none")]
    speaking_rate: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_rate_hertz: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[derive(Deserialize)]
struct ListVoicesResponse {
    #[serde(default)]
    voices: Vec<VoiceInfo>,
}

/// One entry of the `voices` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceInfo {
    pub name: String,
    #[serde(default)]
    pub language_codes: Vec<String>,
    #[serde(default)]
    pub ssml_gender: Option<String>,
    #[serde(default)]
    pub natural_sample_rate_hertz: Option<u32>,
}

/// Client for the Cloud Text-to-Speech REST API.
#[derive(Clone)]
pub struct GoogleTtsClient {
    config: ClientConfig,
    client: Client,
}

impl GoogleTtsClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { config, client })
    }

    /// Build a client from `GOOGLE_*` / `TTS_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, method: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.api_endpoint(),
            self.config.api_version,
            method
        )
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let req = match self.config.credentials {
            Credentials::AccessToken(ref token) => req.bearer_auth(token),
            Credentials::ApiKey(ref key) => req.header("x-goog-api-key", key),
        };
        match self.config.project_id {
            Some(ref project) => req.header("x-goog-user-project", project),
            None => req,
        }
    }

    /// Synthesize `text` and return the decoded `audioContent`.
    async fn synthesize_raw(
        &self,
        input: SynthesisInput<'_>,
        voice: &VoiceSelector,
        audio_config: AudioConfig,
    ) -> Result<Bytes, ClientError> {
        let body = SynthesizeRequest {
            input,
            voice,
            audio_config,
        };

        let response = self
            .authorize(self.client.post(self.url("text:synthesize")))
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;
        let payload = response.json::<SynthesizeResponse>().await?;

        let audio = base64::engine::general_purpose::STANDARD.decode(payload.audio_content)?;
        debug!(
            voice = %voice.name,
            encoding = %audio_config.audio_encoding,
            bytes = audio.len(),
            "synthesize response"
        );
        Ok(Bytes::from(audio))
    }

    /// List available voices, optionally only those for `language_code`.
    pub async fn list_voices(&self, language_code: Option<&str>) -> Result<Vec<VoiceInfo>, ClientError> {
        let mut req = self.client.get(self.url("voices"));
        if let Some(code) = language_code {
            req = req.query(&[("languageCode", code)]);
        }
        let response = self.authorize(req).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<ListVoicesResponse>().await?.voices)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::from_response_body(status.as_u16(), &body))
}

/// LINEAR16 responses arrive wrapped in a WAV header; streaming callers want
/// bare samples at `sample_rate`.
fn strip_wav_header(audio: Bytes, sample_rate: u32) -> tts_core::Result<Bytes> {
    if !audio.starts_with(b"RIFF") {
        return Ok(audio);
    }
    let pcm = PcmBuffer::from_wav_bytes(&audio)?;
    if pcm.sample_rate != sample_rate {
        return Err(TtsError::SampleRate {
            expected: sample_rate,
            actual: pcm.sample_rate,
        });
    }
    Ok(Bytes::from(pcm.to_le_bytes()))
}

#[async_trait]
impl SynthesisService for GoogleTtsClient {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSelector,
        settings: &SynthesisSettings,
    ) -> tts_core::Result<SynthesizedAudio> {
        settings.validate()?;
        let input = SynthesisInput {
            text,
            prompt: settings.prompt.as_deref(),
        };
        let audio_config = AudioConfig {
            audio_encoding: settings.encoding,
            speaking_rate: settings.speaking_rate,
            sample_rate_hertz: settings.sample_rate_hertz,
        };
        let bytes = self.synthesize_raw(input, voice, audio_config).await?;
        Ok(SynthesizedAudio {
            encoding: settings.encoding,
            bytes,
        })
    }

    /// The REST surface has no bidirectional streaming, so each input is sent
    /// as its own LINEAR16 request and the answers are yielded in order.
    fn streaming_synthesize(
        &self,
        requests: BoxStream<'static, StreamingRequest>,
    ) -> BoxStream<'static, tts_core::Result<Bytes>> {
        let client = self.clone();
        Box::pin(async_stream::stream! {
            let mut requests = requests;
            let config = match requests.next().await {
                Some(StreamingRequest::Config(config)) => config,
                Some(StreamingRequest::Input(_)) => {
                    yield Err(TtsError::InvalidInput(
                        "first streaming request must carry the streaming config".to_string(),
                    ));
                    return;
                }
                None => return,
            };
            if let Err(e) = config.validate() {
                yield Err(e);
                return;
            }
            let audio_config = AudioConfig {
                audio_encoding: AudioEncoding::Linear16,
                speaking_rate: config.speaking_rate,
                sample_rate_hertz: Some(STREAMING_SAMPLE_RATE),
            };

            let mut sent = 0usize;
            while let Some(request) = requests.next().await {
                let text = match request {
                    StreamingRequest::Input(text) => text,
                    StreamingRequest::Config(_) => {
                        yield Err(TtsError::InvalidInput(
                            "streaming config may only be sent once".to_string(),
                        ));
                        return;
                    }
                };
                if text.trim().is_empty() {
                    continue;
                }

                debug!(request = sent, chars = text.chars().count(), "streaming synthesis input");
                sent += 1;
                let input = SynthesisInput {
                    text: &text,
                    prompt: config.prompt.as_deref(),
                };
                let pcm = client
                    .synthesize_raw(input, &config.voice, audio_config)
                    .await
                    .map_err(TtsError::from)
                    .and_then(|audio| strip_wav_header(audio, STREAMING_SAMPLE_RATE));
                match pcm {
                    Ok(pcm) => {
                        yield Ok(pcm);
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        })
    }
}
