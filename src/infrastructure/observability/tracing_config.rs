const ENVIRONMENT_VAR: &str = "APP_ENV";
const FORMAT_VAR: &str = "LOG_FORMAT";
const DEFAULT_ENVIRONMENT: &str = "development";

/// Logging options read from the process environment, kept separate from the
/// service settings so tracing can come up even when those fail validation.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}

impl TracingConfig {
    /// Reads `APP_ENV` and `LOG_FORMAT`. Unset, blank, or unrecognized
    /// values fall back to a plain-text development setup.
    pub fn from_env() -> Self {
        let environment = std::env::var(ENVIRONMENT_VAR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let json_format = std::env::var(FORMAT_VAR)
            .map(|v| v.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            environment,
            json_format,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
