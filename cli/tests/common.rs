//! Common utilities for CLI integration tests

use base64::{engine::general_purpose::STANDARD, Engine};
use clap::Parser;
use cli::CliArgs;
use serde_json::json;
use tts_client::{ClientConfig, Credentials, GoogleTtsClient};
use tts_core::{PcmBuffer, STREAMING_SAMPLE_RATE};
use wiremock::{Request, Respond, ResponseTemplate};

/// LINEAR16 answers carry one sample per input byte; other encodings echo the text.
pub struct EchoSpeech;

impl Respond for EchoSpeech {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        let text = body["input"]["text"].as_str().unwrap();
        let audio = match body["audioConfig"]["audioEncoding"].as_str() {
            Some("LINEAR16") => {
                PcmBuffer::from_samples(text.bytes().map(i16::from).collect(), STREAMING_SAMPLE_RATE)
                    .to_wav_bytes()
                    .unwrap()
            }
            _ => text.as_bytes().to_vec(),
        };
        ResponseTemplate::new(200).set_body_json(json!({ "audioContent": STANDARD.encode(audio) }))
    }
}

pub fn test_client(uri: &str) -> GoogleTtsClient {
    let config = ClientConfig::new(Credentials::ApiKey("test-key".into())).with_endpoint(uri);
    GoogleTtsClient::new(config).unwrap()
}

pub fn parse_args(output_dir: &std::path::Path, rest: &[&str]) -> CliArgs {
    let mut argv = vec![
        "chirp",
        "--output-dir",
        output_dir.to_str().unwrap(),
        "--language-code",
        "en-US",
        "--voice",
        "Aoede",
    ];
    argv.extend_from_slice(rest);
    CliArgs::try_parse_from(argv).unwrap()
}
