use futures::StreamExt;
use tracing::info;

use crate::accumulate::{accumulate_stream, ChunkEvent};
use crate::audio::{PcmBuffer, STREAMING_SAMPLE_RATE};
use crate::error::{Result, TtsError};
use crate::segment::split_sentences;
use crate::service::{streaming_requests, StreamingConfig, SynthesisService};

/// Segment `text`, stream it through `service` sentence by sentence with
/// `config`, and collect the returned PCM into one buffer.
///
/// `on_chunk` sees every non-empty chunk as it arrives. Errors from the
/// service are returned unchanged.
pub async fn synthesize_streaming<S, F>(
    service: &S,
    text: &str,
    config: &StreamingConfig,
    on_chunk: F,
) -> Result<PcmBuffer>
where
    S: SynthesisService + ?Sized,
    F: FnMut(ChunkEvent<'_>),
{
    // The request stream outlives `text`, so sentences are copied out here.
    let sentences: Vec<String> = split_sentences(text).map(str::to_owned).collect();
    if sentences.is_empty() {
        return Err(TtsError::InvalidInput("Text cannot be empty".to_string()));
    }
    config.validate()?;

    info!(
        sentences = sentences.len(),
        voice = %config.voice.name,
        "Streaming audio processing..."
    );

    let requests = futures::stream::iter(streaming_requests(config.clone(), sentences)).boxed();
    let chunks = service.streaming_synthesize(requests);
    let audio = accumulate_stream(chunks, STREAMING_SAMPLE_RATE, on_chunk).await?;

    info!(duration_ms = audio.duration_ms(), "Streaming audio processing complete");
    Ok(audio)
}
