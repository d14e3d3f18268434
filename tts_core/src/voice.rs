use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Chirp 3 HD voice names.
pub const CHIRP3_HD_VOICES: &[&str] = &[
    "Aoede", "Puck", "Charon", "Kore", "Fenrir", "Leda", "Orus", "Zephyr",
];

/// Locales with Chirp 3 HD voices.
pub const CHIRP3_HD_LANGUAGES: &[&str] = &[
    "de-DE", "en-AU", "en-GB", "en-IN", "en-US", "fr-FR", "hi-IN", "pt-BR", "ar-XA", "es-ES",
    "fr-CA", "id-ID", "it-IT", "ja-JP", "tr-TR", "vi-VN", "bn-IN", "gu-IN", "kn-IN", "ml-IN",
    "mr-IN", "ta-IN", "te-IN", "nl-NL", "ko-KR", "cmn-CN", "pl-PL", "ru-RU", "th-TH",
];

/// Gemini-TTS voice names. Gemini voices are addressed by short name.
pub const GEMINI_TTS_VOICES: &[&str] = &[
    // female
    "Achernar", "Aoede", "Autonoe", "Callirrhoe", "Despina", "Erinome", "Gacrux", "Kore",
    "Laomedeia", "Leda", "Pulcherrima", "Sulafat", "Vindemiatrix", "Zephyr",
    // male
    "Achird", "Algenib", "Algieba", "Alnilam", "Charon", "Enceladus", "Fenrir", "Iapetus", "Orus",
    "Puck", "Rasalgethi", "Sadachbia", "Sadaltager", "Schedar", "Umbriel", "Zubenelgenubi",
];

pub const GEMINI_TTS_MODELS: &[&str] = &["gemini-2.5-flash-preview-tts", "gemini-2.5-pro-preview-tts"];

pub const DEFAULT_GEMINI_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

pub fn is_known_voice(voice: &str) -> bool {
    CHIRP3_HD_VOICES.iter().any(|v| v.eq_ignore_ascii_case(voice))
}

pub fn is_known_language(language_code: &str) -> bool {
    CHIRP3_HD_LANGUAGES.contains(&language_code)
}

/// Voice family used for synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TtsEngine {
    #[default]
    Chirp3,
    GeminiTts,
}

impl TtsEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chirp3 => "chirp3",
            Self::GeminiTts => "gemini-tts",
        }
    }

    /// Selector for `voice` in `language_code`. `model` is only read by Gemini-TTS.
    pub fn voice(&self, language_code: &str, voice: &str, model: &str) -> VoiceSelector {
        match self {
            Self::Chirp3 => VoiceSelector::chirp3_hd(language_code, voice),
            Self::GeminiTts => VoiceSelector::gemini_tts(language_code, voice, model),
        }
    }

    pub fn is_known_voice(&self, voice: &str) -> bool {
        match self {
            Self::Chirp3 => is_known_voice(voice),
            Self::GeminiTts => GEMINI_TTS_VOICES.iter().any(|v| v.eq_ignore_ascii_case(voice)),
        }
    }

    /// Only Gemini-TTS models take a style prompt.
    pub fn supports_prompt(&self) -> bool {
        matches!(self, Self::GeminiTts)
    }
}

impl fmt::Display for TtsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TtsEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "chirp3" | "chirp3-hd" | "chirp" => Ok(Self::Chirp3),
            "gemini-tts" | "gemini" => Ok(Self::GeminiTts),
            other => Err(format!("unknown TTS engine: {other}")),
        }
    }
}

/// Language code plus voice name, and the model for Gemini-TTS voices.
///
/// Not validated here; the synthesis service decides what exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelector {
    pub language_code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

impl VoiceSelector {
    pub fn new(language_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            name: name.into(),
            model_name: None,
        }
    }

    /// `en-US` + `Aoede` -> `en-US-Chirp3-HD-Aoede`
    pub fn chirp3_hd(language_code: &str, voice: &str) -> Self {
        Self::new(language_code, format!("{language_code}-Chirp3-HD-{voice}"))
    }

    pub fn gemini_tts(language_code: &str, voice: &str, model: &str) -> Self {
        Self {
            model_name: Some(model.to_string()),
            ..Self::new(language_code, voice)
        }
    }
}
