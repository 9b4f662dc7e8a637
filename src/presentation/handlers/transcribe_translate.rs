use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{LlmClient, TranscriptionEngine};
use crate::domain::{AudioChunk, DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE, LanguagePair};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TranslateResponse {
    pub translation: String,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Accepts one audio chunk as multipart form data, transcribes it, and
/// translates the transcript. Provider failures surface in the `notes` field
/// of an otherwise ordinary 200 response; only a request the server could not
/// read at all produces an error status.
#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_translate_handler<S, L>(
    State(state): State<AppState<S, L>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    S: TranscriptionEngine + 'static,
    L: LlmClient + 'static,
{
    let mut audio: Option<AudioChunk> = None;
    let mut src_lang = DEFAULT_SOURCE_LANGUAGE.to_string();
    let mut tgt_lang = DEFAULT_TARGET_LANGUAGE.to_string();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        // The name must be copied out before bytes() or text() consumes the
        // field.
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                let mime_type = field.content_type().map(String::from);
                let data = match field.bytes().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read file bytes");
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse {
                                error: format!("Failed to read file: {}", e),
                            }),
                        )
                            .into_response();
                    }
                };

                tracing::debug!(
                    bytes = data.len(),
                    content_type = mime_type.as_deref().unwrap_or("application/octet-stream"),
                    "Audio chunk received"
                );

                audio = Some(AudioChunk::new(data.to_vec(), mime_type));
            }
            "src_lang" | "tgt_lang" => {
                let value = match field.text().await {
                    Ok(v) => v,
                    Err(e) => {
                        tracing::error!(error = %e, field = %name, "Failed to read form field");
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse {
                                error: format!("Failed to read field {}: {}", name, e),
                            }),
                        )
                            .into_response();
                    }
                };
                if name == "src_lang" {
                    src_lang = value;
                } else {
                    tgt_lang = value;
                }
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    let Some(audio) = audio else {
        tracing::warn!("Transcribe request with no file");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No file uploaded".to_string(),
            }),
        )
            .into_response();
    };

    let languages = LanguagePair {
        source: src_lang,
        target: tgt_lang,
    };

    let outcome = state
        .interpretation_service
        .interpret(&audio, &languages)
        .await;

    (
        StatusCode::OK,
        Json(TranslateResponse {
            translation: outcome.translation,
            notes: Some(outcome.notes),
        }),
    )
        .into_response()
}
