use tts_core::{check_speaking_rate, split_sentences, TtsEngine};

use crate::error::CliError;

/// Per-request input limit of the Text-to-Speech API, in bytes
pub const MAX_TEXT_BYTES: usize = 5000;

/// Validate text for a single synthesis request
pub fn validate_tts_request(text: &str, language_code: &str) -> Result<(), CliError> {
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("Text cannot be empty".to_string()));
    }
    if text.len() > MAX_TEXT_BYTES {
        return Err(CliError::InvalidInput(format!(
            "Text too long ({} bytes, max {})",
            text.len(),
            MAX_TEXT_BYTES
        )));
    }
    validate_language_code(language_code)
}

/// Validate text for streaming; the limit applies to each sentence, not the whole text
pub fn validate_stream_request(text: &str, language_code: &str) -> Result<(), CliError> {
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("Text cannot be empty".to_string()));
    }
    if let Some((i, sentence)) = split_sentences(text)
        .enumerate()
        .find(|(_, s)| s.len() > MAX_TEXT_BYTES)
    {
        return Err(CliError::InvalidInput(format!(
            "Sentence {} too long ({} bytes, max {})",
            i + 1,
            sentence.len(),
            MAX_TEXT_BYTES
        )));
    }
    validate_language_code(language_code)
}

pub fn validate_language_code(code: &str) -> Result<(), CliError> {
    if is_valid_language_code(code) {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!(
            "Invalid language code format: {}. Expected format: ll-CC (e.g., en-US, cmn-CN)",
            code
        )))
    }
}

/// Speaking rate and style prompt must suit the selected engine
pub fn validate_voice_settings(
    engine: TtsEngine,
    speaking_rate: Option<f32>,
    prompt: Option<&str>,
) -> Result<(), CliError> {
    if let Some(rate) = speaking_rate {
        check_speaking_rate(rate).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    }
    if prompt.is_some() && !engine.supports_prompt() {
        return Err(CliError::InvalidInput(format!(
            "--prompt is only supported by gemini-tts, not {}",
            engine
        )));
    }
    Ok(())
}

/// `ll-CC` or `lll-CC`: 2-3 lowercase letters, `-`, 2 uppercase letters
fn is_valid_language_code(code: &str) -> bool {
    let Some((lang, region)) = code.split_once('-') else {
        return false;
    };
    (2..=3).contains(&lang.len())
        && lang.chars().all(|c| c.is_ascii_lowercase())
        && region.len() == 2
        && region.chars().all(|c| c.is_ascii_uppercase())
}
