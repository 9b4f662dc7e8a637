use async_trait::async_trait;

use crate::domain::AudioChunk;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Transcribes one audio chunk in the given language. An empty transcript
    /// means no speech was recognized; it is not an error.
    async fn transcribe(
        &self,
        audio: &AudioChunk,
        language: &str,
    ) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    // The provider rejected the payload itself (corrupt or unsupported audio).
    #[error("invalid audio: {0}")]
    InvalidAudio(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
