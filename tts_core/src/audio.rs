//! Audio buffers and encodings.
//!
//! Streaming synthesis produces raw mono 16-bit little-endian PCM at
//! [`STREAMING_SAMPLE_RATE`]; single requests produce an encoded container
//! such as MP3. The two are kept in separate types so they are never mixed.
use std::{fmt, io::Cursor, str::FromStr};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TtsError};

/// Sample rate of the PCM returned by streaming synthesis.
pub const STREAMING_SAMPLE_RATE: u32 = 24_000;

/// Bytes per PCM sample.
pub const SAMPLE_WIDTH: usize = std::mem::size_of::<i16>();

/// Decode little-endian 16-bit samples. `None` when a partial sample is left over.
pub fn decode_pcm_le(bytes: &[u8]) -> Option<impl ExactSizeIterator<Item = i16> + '_> {
    if bytes.len() % SAMPLE_WIDTH != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(SAMPLE_WIDTH)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]])),
    )
}

/// Mono 16-bit PCM audio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PcmBuffer {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl PcmBuffer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
        }
    }

    pub fn from_samples(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples (not bytes).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    /// Raw little-endian PCM bytes.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.samples.len() * SAMPLE_WIDTH);
        for s in &self.samples {
            out.extend_from_slice(&s.to_le_bytes());
        }
        out
    }

    /// Wrap the samples in a RIFF/WAV container.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        // WAV header (44 bytes) + samples
        let mut cursor = Cursor::new(Vec::<u8>::with_capacity(44 + self.samples.len() * SAMPLE_WIDTH));
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
            for &s in &self.samples {
                writer.write_sample(s)?;
            }
            // finalize writes the header lengths
            writer.finalize()?;
        }
        Ok(cursor.into_inner())
    }

    /// Read a mono 16-bit PCM WAV container.
    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self> {
        let reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();
        if spec.channels != 1
            || spec.bits_per_sample != 16
            || spec.sample_format != hound::SampleFormat::Int
        {
            return Err(TtsError::InvalidInput(format!(
                "expected mono 16-bit PCM WAV, got {} channel(s) at {} bits",
                spec.channels, spec.bits_per_sample
            )));
        }
        let samples = reader
            .into_samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::from_samples(samples, spec.sample_rate))
    }
}

/// Output encodings understood by the synthesis API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    #[default]
    Mp3,
    /// Uncompressed 16-bit signed little-endian samples.
    Linear16,
    OggOpus,
    Mulaw,
    Alaw,
}

impl AudioEncoding {
    /// Name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Linear16 => "LINEAR16",
            Self::OggOpus => "OGG_OPUS",
            Self::Mulaw => "MULAW",
            Self::Alaw => "ALAW",
        }
    }

    /// File extension for audio in this encoding. LINEAR16 responses carry a WAV header.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Linear16 | Self::Mulaw | Self::Alaw => "wav",
            Self::OggOpus => "ogg",
        }
    }
}

impl fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "mp3" => Ok(Self::Mp3),
            "linear16" | "wav" | "pcm" => Ok(Self::Linear16),
            "ogg_opus" | "ogg" | "opus" => Ok(Self::OggOpus),
            "mulaw" => Ok(Self::Mulaw),
            "alaw" => Ok(Self::Alaw),
            other => Err(format!("unknown audio encoding: {other}")),
        }
    }
}

/// Encoded audio from a single synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub encoding: AudioEncoding,
    pub bytes: Bytes,
}
