use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Classification oracle configuration
    pub classifier: ClassifierConfig,

    /// Telephony vendor configuration
    pub telephony: TelephonyConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: TRIAGE_)
            .add_source(
                config::Environment::with_prefix("TRIAGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Classification oracle backend
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierBackend {
    /// Remote chat-completions oracle
    #[default]
    Remote,
    /// Deterministic scripted answers (offline/testing)
    Scripted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Oracle backend
    #[serde(default)]
    pub backend: ClassifierBackend,

    /// Chat-completions endpoint
    #[serde(default = "default_classifier_endpoint")]
    pub endpoint: String,

    /// Model identifier
    #[serde(default = "default_classifier_model")]
    pub model: String,

    /// API key environment variable
    pub api_key_env: Option<String>,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum answer length in tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Oracle call timeout (seconds)
    #[serde(default = "default_classifier_timeout")]
    pub timeout_secs: u64,

    /// Canned answer for the scripted backend
    pub scripted_answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelephonyConfig {
    /// Call-initiation endpoint
    #[serde(default = "default_telephony_endpoint")]
    pub endpoint: String,

    /// Agent ID environment variable
    pub agent_id_env: Option<String>,

    /// Auth token environment variable
    pub auth_token_env: Option<String>,

    /// Vendor call timeout (seconds)
    #[serde(default = "default_telephony_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable Prometheus metrics
    #[serde(default = "default_true")]
    pub prometheus_enabled: bool,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_classifier_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_classifier_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_classifier_timeout() -> u64 {
    15
}

fn default_telephony_endpoint() -> String {
    "https://api.bolna.dev/call".to_string()
}

fn default_telephony_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "call-triage".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        assert_eq!(default_http_port(), 8000);
        assert_eq!(default_temperature(), 0.5);
        assert_eq!(default_max_tokens(), 1024);
        assert_eq!(default_log_level(), "info");
        assert!(default_true());
    }

    #[test]
    fn test_classifier_backend_default() {
        assert_eq!(ClassifierBackend::default(), ClassifierBackend::Remote);
    }
}
