mod audio_chunk;
mod language;

pub use audio_chunk::AudioChunk;
pub use language::{DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE, LanguagePair};
