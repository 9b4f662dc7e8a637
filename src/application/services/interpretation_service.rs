use std::sync::Arc;

use crate::application::ports::{LlmClient, TranscriptionEngine, TranscriptionError};
use crate::application::services::build_translation_instruction;
use crate::domain::{AudioChunk, LanguagePair};

const NOTE_EMPTY_AUDIO: &str = "Empty audio chunk";
const NOTE_CORRUPT_AUDIO: &str = "Deepgram error: corrupt or unsupported audio chunk";
const NOTE_NO_SPEECH: &str = "No speech detected";

pub struct InterpretationService<S, L>
where
    S: TranscriptionEngine,
    L: LlmClient,
{
    transcription_engine: Arc<S>,
    llm_client: Arc<L>,
}

impl<S, L> InterpretationService<S, L>
where
    S: TranscriptionEngine,
    L: LlmClient,
{
    pub fn new(transcription_engine: Arc<S>, llm_client: Arc<L>) -> Self {
        Self {
            transcription_engine,
            llm_client,
        }
    }

    // Never fails: every provider error is folded into the outcome's notes so
    // the caller can always hand the frontend a regular response.
    pub async fn interpret(
        &self,
        audio: &AudioChunk,
        languages: &LanguagePair,
    ) -> Interpretation {
        if audio.is_empty() {
            return Interpretation::note_only(NOTE_EMPTY_AUDIO);
        }

        let transcript = match self
            .transcription_engine
            .transcribe(audio, &languages.source)
            .await
        {
            Ok(transcript) => transcript,
            Err(TranscriptionError::InvalidAudio(reason)) => {
                tracing::warn!(reason = %reason, "Provider rejected audio chunk");
                return Interpretation::note_only(NOTE_CORRUPT_AUDIO);
            }
            Err(e) => {
                tracing::error!(error = %e, "Transcription failed");
                return Interpretation::note_only(format!("Deepgram error: {}", e));
            }
        };

        // Strictly empty only; a whitespace transcript still goes to the
        // translator.
        if transcript.is_empty() {
            return Interpretation::note_only(NOTE_NO_SPEECH);
        }

        let instruction = build_translation_instruction(languages, &transcript);

        match self.llm_client.generate(&instruction).await {
            Ok(translation) => Interpretation::translated(translation.trim()),
            Err(e) => {
                tracing::error!(error = %e, "Translation failed, falling back to raw transcript");
                Interpretation::fallback(transcript, format!("Gemini error: {}", e))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub translation: String,
    pub notes: String,
}

impl Interpretation {
    fn translated(translation: &str) -> Self {
        Self {
            translation: translation.to_string(),
            notes: String::new(),
        }
    }

    // Degraded outcome: nothing translatable, only a diagnostic note.
    fn note_only(notes: impl Into<String>) -> Self {
        Self {
            translation: String::new(),
            notes: notes.into(),
        }
    }

    // Translation failed after a usable transcript; hand back the transcript
    // untranslated rather than nothing.
    fn fallback(transcript: String, notes: String) -> Self {
        Self {
            translation: transcript,
            notes,
        }
    }
}
