mod deepgram_engine;

pub use deepgram_engine::{DeepgramEngine, ListenResponse, extract_transcript};
