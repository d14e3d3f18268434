// Command-line and environment configuration for the `chirp` binary

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tts_core::{
    AudioEncoding, StreamingConfig, SynthesisSettings, TtsEngine, VoiceSelector,
    DEFAULT_GEMINI_TTS_MODEL,
};

use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "chirp", version, about = "Synthesize speech with Chirp 3 HD and Gemini-TTS voices")]
pub struct CliArgs {
    /// BCP-47 language code, e.g. en-US or cmn-CN
    #[arg(long, env = "TTS_LANGUAGE_CODE", default_value = "en-US", global = true)]
    pub language_code: String,

    /// Voice family: chirp3 or gemini-tts
    #[arg(long, env = "TTS_ENGINE", default_value = "chirp3", global = true)]
    pub engine: TtsEngine,

    /// Short voice name, e.g. Aoede or Puck
    #[arg(long, env = "TTS_VOICE", default_value = "Aoede", global = true)]
    pub voice: String,

    /// Gemini-TTS model; ignored by chirp3
    #[arg(long, env = "TTS_MODEL", default_value = DEFAULT_GEMINI_TTS_MODEL, global = true)]
    pub model: String,

    /// Speaking rate from 0.25 to 2.0 (1.0 is normal speed)
    #[arg(long, env = "TTS_SPEAKING_RATE", global = true)]
    pub speaking_rate: Option<f32>,

    /// Style instruction for gemini-tts, e.g. "Say this cheerfully"
    #[arg(long, env = "TTS_PROMPT", global = true)]
    pub prompt: Option<String>,

    /// Directory that receives the audio files
    #[arg(long, env = "TTS_OUTPUT_DIR", default_value = ".", global = true)]
    pub output_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Synthesize the whole text with one request
    Synthesize {
        #[command(flatten)]
        input: TextInput,

        /// mp3, linear16 (wav), ogg_opus, mulaw or alaw
        #[arg(long, default_value = "mp3")]
        encoding: AudioEncoding,

        /// Output sample rate in Hz; the voice's natural rate when omitted
        #[arg(long)]
        sample_rate: Option<u32>,
    },
    /// Stream the text sentence by sentence and write the accumulated audio
    Stream {
        #[command(flatten)]
        input: TextInput,

        /// Also write every non-empty chunk as it arrives
        #[arg(long)]
        emit_chunks: bool,
    },
    /// List voices offered by the service
    Voices {
        /// List voices for every language instead of --language-code
        #[arg(long)]
        all_languages: bool,
    },
}

#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct TextInput {
    /// Text to synthesize
    #[arg(long)]
    pub text: Option<String>,

    /// Read the text from a UTF-8 file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl TextInput {
    pub fn read(&self) -> Result<String, CliError> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => {
                std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))
            }
            (None, None) => Err(CliError::InvalidInput(
                "either --text or --file is required".to_string(),
            )),
        }
    }
}

impl CliArgs {
    pub fn voice_selector(&self) -> VoiceSelector {
        self.engine.voice(&self.language_code, &self.voice, &self.model)
    }

    pub fn synthesis_settings(
        &self,
        encoding: AudioEncoding,
        sample_rate: Option<u32>,
    ) -> SynthesisSettings {
        SynthesisSettings {
            encoding,
            speaking_rate: self.speaking_rate,
            sample_rate_hertz: sample_rate,
            prompt: self.prompt.clone(),
        }
    }

    pub fn streaming_config(&self) -> StreamingConfig {
        StreamingConfig {
            voice: self.voice_selector(),
            speaking_rate: self.speaking_rate,
            prompt: self.prompt.clone(),
        }
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
