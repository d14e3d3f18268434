//! Reassembly of streamed PCM chunks.
//!
//! Chunks arrive in order and are appended to a single buffer. Every
//! non-empty chunk is reported to an optional observer together with its
//! position in the source sequence, which is how callers surface partial
//! audio while the stream is still running.
use futures::{Stream, StreamExt};
use tracing::{debug, info, trace};

use crate::audio::{decode_pcm_le, PcmBuffer};
use crate::error::{Result, TtsError};

/// A non-empty chunk that has just been appended.
#[derive(Debug, Clone, Copy)]
pub struct ChunkEvent<'a> {
    /// Position of the chunk in the source sequence, counting empty chunks.
    pub index: usize,
    pub samples: &'a [i16],
    pub sample_rate: u32,
}

impl ChunkEvent<'_> {
    pub fn to_buffer(&self) -> PcmBuffer {
        PcmBuffer::from_samples(self.samples.to_vec(), self.sample_rate)
    }
}

/// Owns the growing buffer for one streaming call.
#[derive(Debug)]
pub struct StreamAccumulator {
    buffer: PcmBuffer,
    next_index: usize,
}

impl StreamAccumulator {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            buffer: PcmBuffer::new(sample_rate),
            next_index: 0,
        }
    }

    /// Append one chunk of little-endian 16-bit samples.
    ///
    /// Returns `None` for an empty chunk. A chunk with an odd byte count is
    /// rejected and leaves the buffer untouched.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Option<ChunkEvent<'_>>> {
        let index = self.next_index;
        self.next_index += 1;

        let decoded = decode_pcm_le(chunk).ok_or(TtsError::Decoding {
            index,
            len: chunk.len(),
        })?;
        if chunk.is_empty() {
            trace!(chunk = index, "skipping empty audio chunk");
            return Ok(None);
        }

        let start = self.buffer.samples.len();
        self.buffer.samples.extend(decoded);
        let samples = &self.buffer.samples[start..];
        debug!(chunk = index, samples = samples.len(), "accumulated audio chunk");

        Ok(Some(ChunkEvent {
            index,
            samples,
            sample_rate: self.buffer.sample_rate,
        }))
    }

    /// Chunks consumed so far, empty ones included.
    pub fn chunks_seen(&self) -> usize {
        self.next_index
    }

    pub fn sample_count(&self) -> usize {
        self.buffer.len()
    }

    pub fn finish(self) -> PcmBuffer {
        info!(
            chunks = self.next_index,
            samples = self.buffer.len(),
            duration_ms = self.buffer.duration_ms(),
            "audio stream complete"
        );
        self.buffer
    }
}

/// Concatenate an in-memory sequence of chunks.
pub fn accumulate_chunks<I, F>(chunks: I, sample_rate: u32, mut on_chunk: F) -> Result<PcmBuffer>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
    F: FnMut(ChunkEvent<'_>),
{
    let mut acc = StreamAccumulator::new(sample_rate);
    for chunk in chunks {
        if let Some(event) = acc.push(chunk.as_ref())? {
            on_chunk(event);
        }
    }
    Ok(acc.finish())
}

/// Drain a stream of chunks into one buffer.
///
/// The first error from the stream is returned as-is and the partial buffer
/// is dropped.
pub async fn accumulate_stream<S, B, F>(stream: S, sample_rate: u32, mut on_chunk: F) -> Result<PcmBuffer>
where
    S: Stream<Item = Result<B>>,
    B: AsRef<[u8]>,
    F: FnMut(ChunkEvent<'_>),
{
    futures::pin_mut!(stream);
    let mut acc = StreamAccumulator::new(sample_rate);
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if let Some(event) = acc.push(chunk.as_ref())? {
            on_chunk(event);
        }
    }
    Ok(acc.finish())
}
