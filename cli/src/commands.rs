use std::path::{Path, PathBuf};

use tracing::{info, warn};
use tts_client::{GoogleTtsClient, VoiceInfo};
use tts_core::{
    is_known_language, synthesize_streaming, SynthesisService, SynthesisSettings, TtsEngine,
    GEMINI_TTS_MODELS,
};

use crate::config::{CliArgs, Command};
use crate::error::CliError;
use crate::validation::{
    validate_language_code, validate_stream_request, validate_tts_request,
    validate_voice_settings,
};

/// Files written by one command.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Written {
    pub audio: Option<PathBuf>,
    pub chunks: Vec<PathBuf>,
}

pub async fn run(args: &CliArgs, client: &GoogleTtsClient) -> Result<Written, CliError> {
    match &args.command {
        Command::Synthesize {
            input,
            encoding,
            sample_rate,
        } => {
            let text = input.read()?;
            let settings = args.synthesis_settings(*encoding, *sample_rate);
            synthesize_to_file(client, &text, args, &settings).await
        }
        Command::Stream { input, emit_chunks } => {
            let text = input.read()?;
            stream_to_file(client, &text, args, *emit_chunks).await
        }
        Command::Voices { all_languages } => {
            let language = if *all_languages {
                None
            } else {
                validate_language_code(&args.language_code)?;
                Some(args.language_code.as_str())
            };
            for voice in list_voices(client, language).await? {
                println!(
                    "{}\t{}\t{}",
                    voice.name,
                    voice.language_codes.join(","),
                    voice.ssml_gender.as_deref().unwrap_or("-")
                );
            }
            Ok(Written::default())
        }
    }
}

fn check_voice(args: &CliArgs) -> Result<(), CliError> {
    validate_voice_settings(args.engine, args.speaking_rate, args.prompt.as_deref())?;

    if !args.engine.is_known_voice(&args.voice) {
        warn!(engine = %args.engine, voice = %args.voice, "voice is not in the catalog");
    }
    match args.engine {
        TtsEngine::Chirp3 if !is_known_language(&args.language_code) => {
            warn!(language = %args.language_code, "language is not in the Chirp 3 HD catalog");
        }
        TtsEngine::GeminiTts if !GEMINI_TTS_MODELS.contains(&args.model.as_str()) => {
            warn!(model = %args.model, "unknown Gemini-TTS model");
        }
        _ => {}
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, bytes).map_err(|e| CliError::io(path, e))
}

fn ensure_output_dir(dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(dir).map_err(|e| CliError::io(dir, e))
}

/// One request for the whole text, saved as `speech.<ext>`.
pub async fn synthesize_to_file<S>(
    service: &S,
    text: &str,
    args: &CliArgs,
    settings: &SynthesisSettings,
) -> Result<Written, CliError>
where
    S: SynthesisService + ?Sized,
{
    validate_tts_request(text, &args.language_code)?;
    check_voice(args)?;
    ensure_output_dir(args.output_dir())?;

    let voice = args.voice_selector();
    let audio = service.synthesize(text, &voice, settings).await?;

    let path = args.output_path(&format!("speech.{}", audio.encoding.extension()));
    write_file(&path, &audio.bytes)?;
    info!(
        path = %path.display(),
        bytes = audio.bytes.len(),
        encoding = %audio.encoding,
        "Audio content written"
    );

    Ok(Written {
        audio: Some(path),
        chunks: Vec::new(),
    })
}

/// Stream the text sentence by sentence and save the accumulated audio as
/// `stream.wav`. With `emit_chunks`, each non-empty chunk is also saved as
/// `chunk_NNN.wav` the moment it arrives.
pub async fn stream_to_file<S>(
    service: &S,
    text: &str,
    args: &CliArgs,
    emit_chunks: bool,
) -> Result<Written, CliError>
where
    S: SynthesisService + ?Sized,
{
    validate_stream_request(text, &args.language_code)?;
    check_voice(args)?;
    ensure_output_dir(args.output_dir())?;

    let config = args.streaming_config();
    let mut chunks = Vec::new();
    // The observer cannot fail, so the first write error is parked here.
    let mut write_error: Option<CliError> = None;

    let audio = synthesize_streaming(service, text, &config, |event| {
        if !emit_chunks || write_error.is_some() {
            return;
        }
        info!("Processed chunk # {}", event.index);
        let path = args.output_path(&format!("chunk_{:03}.wav", event.index));
        let written = event
            .to_buffer()
            .to_wav_bytes()
            .map_err(CliError::from)
            .and_then(|wav| write_file(&path, &wav));
        match written {
            Ok(()) => chunks.push(path),
            Err(e) => write_error = Some(e),
        }
    })
    .await?;

    if let Some(e) = write_error {
        return Err(e);
    }

    let path = args.output_path("stream.wav");
    write_file(&path, &audio.to_wav_bytes()?)?;
    info!(
        path = %path.display(),
        samples = audio.len(),
        duration_ms = audio.duration_ms(),
        "Streamed audio written"
    );

    Ok(Written {
        audio: Some(path),
        chunks,
    })
}

pub async fn list_voices(
    client: &GoogleTtsClient,
    language_code: Option<&str>,
) -> Result<Vec<VoiceInfo>, CliError> {
    let voices = client.list_voices(language_code).await?;
    info!(count = voices.len(), "Voices listed");
    Ok(voices)
}
