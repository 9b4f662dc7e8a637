mod health;
mod transcribe_translate;

pub use health::health_handler;
pub use transcribe_translate::transcribe_translate_handler;
