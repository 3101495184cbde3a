//! Icebreaker generator configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external icebreaker text generator.
///
/// When `api_key` is unset the engine never calls out and always uses the
/// deterministic per-category fallback templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcebreakerConfig {
    /// API key for the generation endpoint. `None` disables remote calls.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Generation endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Overall timeout for one generation call, in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    /// Sampling temperature passed to the generator.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum output tokens requested from the generator.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for IcebreakerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            timeout_ms: default_timeout(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        .to_string()
}

fn default_timeout() -> u64 {
    4_000
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_output_tokens() -> u32 {
    60
}
