use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10_000_000;
const DEFAULT_DEEPGRAM_MODEL: &str = "nova-3";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub deepgram: DeepgramSettings,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct DeepgramSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
}

impl Settings {
    /// Loads all settings from the process environment. Both provider
    /// credentials are required: the server refuses to start without them.
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            server: ServerSettings {
                host: optional("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: parsed("SERVER_PORT", DEFAULT_PORT)?,
                max_upload_bytes: parsed("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            },
            deepgram: DeepgramSettings {
                api_key: required("DEEPGRAM_API_KEY")?,
                model: optional("DEEPGRAM_MODEL")
                    .unwrap_or_else(|| DEFAULT_DEEPGRAM_MODEL.to_string()),
                base_url: optional("DEEPGRAM_BASE_URL"),
            },
            gemini: GeminiSettings {
                api_key: required("GEMINI_API_KEY")?,
                model: optional("GEMINI_MODEL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: optional("GEMINI_BASE_URL"),
            },
        })
    }
}

fn required(name: &'static str) -> Result<String, SettingsError> {
    optional(name).ok_or(SettingsError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, SettingsError> {
    match optional(name) {
        Some(value) => value
            .parse()
            .map_err(|_| SettingsError::Invalid { name, value }),
        None => Ok(default),
    }
}
