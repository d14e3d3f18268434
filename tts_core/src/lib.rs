//! Core of the Chirp 3 HD text-to-speech tools.
//!
//! Splits text into sentences for incremental synthesis and reassembles the
//! streamed PCM chunks. Talking to an actual backend goes through the
//! [`SynthesisService`] trait; this crate does no I/O of its own.
mod accumulate;
mod audio;
mod error;
mod pipeline;
mod segment;
mod service;
mod voice;

pub use accumulate::{accumulate_chunks, accumulate_stream, ChunkEvent, StreamAccumulator};
pub use audio::{
    decode_pcm_le, AudioEncoding, PcmBuffer, SynthesizedAudio, SAMPLE_WIDTH, STREAMING_SAMPLE_RATE,
};
pub use error::{Result, TtsError};
pub use pipeline::synthesize_streaming;
pub use segment::{split_sentences, Sentences};
pub use service::{
    check_speaking_rate, streaming_requests, StreamingConfig, StreamingRequest, SynthesisService,
    SynthesisSettings, MAX_SPEAKING_RATE, MIN_SPEAKING_RATE,
};
pub use voice::{
    is_known_language, is_known_voice, TtsEngine, VoiceSelector, CHIRP3_HD_LANGUAGES,
    CHIRP3_HD_VOICES, DEFAULT_GEMINI_TTS_MODEL, GEMINI_TTS_MODELS, GEMINI_TTS_VOICES,
};
