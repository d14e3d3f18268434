//! End-to-end command tests against a mock Text-to-Speech server

mod common;

use common::{parse_args, test_client, EchoSpeech};
use cli::{run, CliError};
use serde_json::json;
use tts_core::{PcmBuffer, STREAMING_SAMPLE_RATE};
use wiremock::{
    matchers::{body_partial_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

async fn mock_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta1/text:synthesize"))
        .respond_with(EchoSpeech)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_synthesize_writes_speech_file() {
    let server = mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let args = parse_args(dir.path(), &["synthesize", "--text", "Hello world! I am Chirp 3"]);

    let written = run(&args, &test_client(&server.uri())).await.unwrap();

    let path = dir.path().join("speech.mp3");
    assert_eq!(written.audio.as_deref(), Some(path.as_path()));
    assert_eq!(std::fs::read(&path).unwrap(), b"Hello world! I am Chirp 3");
    assert!(written.chunks.is_empty());
}

#[tokio::test]
async fn test_synthesize_reads_text_file() {
    let server = mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let prompt = dir.path().join("prompt.txt");
    std::fs::write(&prompt, "From a file.").unwrap();
    let args = parse_args(
        dir.path(),
        &["synthesize", "--file", prompt.to_str().unwrap(), "--encoding", "ogg_opus"],
    );

    run(&args, &test_client(&server.uri())).await.unwrap();

    assert_eq!(std::fs::read(dir.path().join("speech.ogg")).unwrap(), b"From a file.");
}

#[tokio::test]
async fn test_stream_writes_accumulated_wav_and_chunks() {
    let server = mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let args = parse_args(
        dir.path(),
        &["stream", "--text", "Hello world! I am Chirp 3", "--emit-chunks"],
    );

    let written = run(&args, &test_client(&server.uri())).await.unwrap();

    let stream = PcmBuffer::from_wav_bytes(&std::fs::read(dir.path().join("stream.wav")).unwrap()).unwrap();
    let expected: Vec<i16> = "Hello world!I am Chirp 3".bytes().map(i16::from).collect();
    assert_eq!(stream.samples, expected);
    assert_eq!(stream.sample_rate, STREAMING_SAMPLE_RATE);

    assert_eq!(
        written.chunks,
        vec![dir.path().join("chunk_000.wav"), dir.path().join("chunk_001.wav")]
    );
    let second = PcmBuffer::from_wav_bytes(&std::fs::read(&written.chunks[1]).unwrap()).unwrap();
    assert_eq!(second.samples, "I am Chirp 3".bytes().map(i16::from).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_stream_without_emit_chunks_writes_only_the_result() {
    let server = mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let args = parse_args(dir.path(), &["stream", "--text", "One. Two."]);

    let written = run(&args, &test_client(&server.uri())).await.unwrap();

    assert!(written.chunks.is_empty());
    assert!(!dir.path().join("chunk_000.wav").exists());
    assert!(dir.path().join("stream.wav").exists());
}

#[tokio::test]
async fn test_invalid_input_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(EchoSpeech)
        .expect(0)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let client = test_client(&server.uri());

    let args = parse_args(dir.path(), &["stream", "--text", "   "]);
    assert!(matches!(run(&args, &client).await, Err(CliError::InvalidInput(_))));

    let mut args = parse_args(dir.path(), &["synthesize", "--text", "Hi."]);
    args.language_code = "english".to_string();
    assert!(matches!(run(&args, &client).await, Err(CliError::InvalidInput(_))));
}

#[tokio::test]
async fn test_upstream_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": 401, "message": "Request had invalid authentication credentials.", "status": "UNAUTHENTICATED" }
        })))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let args = parse_args(dir.path(), &["stream", "--text", "One. Two."]);

    let err = run(&args, &test_client(&server.uri())).await.unwrap_err();

    assert!(matches!(err, CliError::Tts(_)));
    assert!(!dir.path().join("stream.wav").exists());
}

#[tokio::test]
async fn test_voices_filters_by_language() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta1/voices"))
        .and(query_param("languageCode", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "voices": [{ "languageCodes": ["en-US"], "name": "en-US-Chirp3-HD-Aoede" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let args = parse_args(dir.path(), &["voices"]);

    let written = run(&args, &test_client(&server.uri())).await.unwrap();
    assert_eq!(written.audio, None);
}

#[tokio::test]
async fn test_synthesize_sends_speaking_rate_and_sample_rate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta1/text:synthesize"))
        .and(body_partial_json(json!({
            "voice": { "name": "en-US-Chirp3-HD-Aoede" },
            "audioConfig": {
                "audioEncoding": "MP3",
                "speakingRate": 1.5,
                "sampleRateHertz": 16000
            }
        })))
        .respond_with(EchoSpeech)
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let args = parse_args(
        dir.path(),
        &["synthesize", "--text", "Quickly.", "--speaking-rate", "1.5", "--sample-rate", "16000"],
    );

    run(&args, &test_client(&server.uri())).await.unwrap();

    assert_eq!(std::fs::read(dir.path().join("speech.mp3")).unwrap(), b"Quickly.");
}

#[tokio::test]
async fn test_stream_with_gemini_engine() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta1/text:synthesize"))
        .and(body_partial_json(json!({
            "input": { "prompt": "Read this like a news anchor" },
            "voice": { "name": "Aoede", "modelName": "gemini-2.5-flash-preview-tts" },
            "audioConfig": { "audioEncoding": "LINEAR16", "speakingRate": 0.75 }
        })))
        .respond_with(EchoSpeech)
        .expect(2)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let args = parse_args(
        dir.path(),
        &[
            "stream",
            "--text",
            "Good evening. Here is the news.",
            "--engine",
            "gemini-tts",
            "--prompt",
            "Read this like a news anchor",
            "--speaking-rate",
            "0.75",
        ],
    );

    run(&args, &test_client(&server.uri())).await.unwrap();

    let stream = PcmBuffer::from_wav_bytes(&std::fs::read(dir.path().join("stream.wav")).unwrap()).unwrap();
    let expected: Vec<i16> = "Good evening.Here is the news.".bytes().map(i16::from).collect();
    assert_eq!(stream.samples, expected);
}

#[tokio::test]
async fn test_bad_voice_settings_make_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(EchoSpeech)
        .expect(0)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let client = test_client(&server.uri());

    let args = parse_args(dir.path(), &["synthesize", "--text", "Hi.", "--speaking-rate", "3"]);
    assert!(matches!(run(&args, &client).await, Err(CliError::InvalidInput(_))));

    let args = parse_args(dir.path(), &["stream", "--text", "Hi.", "--prompt", "Cheerfully"]);
    assert!(matches!(run(&args, &client).await, Err(CliError::InvalidInput(_))));
}
