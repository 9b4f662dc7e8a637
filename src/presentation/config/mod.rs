mod settings;

pub use settings::{DeepgramSettings, GeminiSettings, ServerSettings, Settings, SettingsError};
