use async_trait::async_trait;
use reqwest::{StatusCode, header};
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::AudioChunk;
use crate::infrastructure::observability::sanitize_transcript;

const DEFAULT_BASE_URL: &str = "https://api.deepgram.com";
const DEFAULT_MODEL: &str = "nova-3";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

pub struct DeepgramEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl DeepgramEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListenResponse {
    #[serde(default)]
    pub results: Option<ListenResults>,
}

#[derive(Debug, Deserialize)]
pub struct ListenResults {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
pub struct Channel {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub transcript: String,
}

/// Pulls the transcript out of the first channel's first alternative. Any
/// shape mismatch maps to `None` instead of an error so upstream code can
/// treat it like silence.
pub fn extract_transcript(response: &ListenResponse) -> Option<String> {
    response
        .results
        .as_ref()?
        .channels
        .first()?
        .alternatives
        .first()
        .map(|alternative| alternative.transcript.clone())
}

#[async_trait]
impl TranscriptionEngine for DeepgramEngine {
    async fn transcribe(
        &self,
        audio: &AudioChunk,
        language: &str,
    ) -> Result<String, TranscriptionError> {
        let url = format!("{}/v1/listen", self.base_url.trim_end_matches('/'));
        let content_type = audio.mime_type.as_deref().unwrap_or(FALLBACK_CONTENT_TYPE);

        tracing::debug!(
            model = %self.model,
            language = %language,
            bytes = audio.len(),
            "Sending audio to Deepgram"
        );

        let response = self
            .client
            .post(&url)
            .query(&[("model", self.model.as_str()), ("language", language)])
            .header(header::AUTHORIZATION, format!("Token {}", self.api_key))
            .header(header::CONTENT_TYPE, content_type)
            .body(audio.data.clone())
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        // 400 is Deepgram's signal for audio it could not decode at all.
        if response.status() == StatusCode::BAD_REQUEST {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::InvalidAudio(body));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: ListenResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("parse response: {}", e)))?;

        let transcript = extract_transcript(&result).unwrap_or_default();

        tracing::info!(
            chars = transcript.chars().count(),
            "Deepgram transcription completed"
        );
        tracing::debug!(transcript = %sanitize_transcript(&transcript), "Deepgram transcript");

        Ok(transcript)
    }
}
