//! The external icebreaker generator boundary.

use async_trait::async_trait;

use joinin_core::config::icebreaker::IcebreakerConfig;
use joinin_core::error::AppError;
use joinin_core::result::AppResult;
use joinin_entity::session::Category;

/// A stateless, side-effect-free text-completion collaborator.
///
/// Implementations are treated as independently failing: any error is
/// absorbed by the injector and replaced with the local fallback.
#[async_trait]
pub trait IcebreakerGenerator: Send + Sync {
    /// Produce one short icebreaker sentence for the given activity.
    async fn generate(&self, activity: &str, category: Category) -> AppResult<String>;
}

const SYSTEM_PROMPT: &str = "You are a helpful college campus assistant for an app called JoinIn. \
Your job is to generate a one-sentence icebreaker tip when a student joins a live activity session.\n\n\
CRITICAL RULES:\n\
- Your tip must be STRICTLY about the specific activity title provided. The activity title is the most important input.\n\
- Do NOT give generic category advice. If the activity is \"Building a robotic arm\", talk about robotics, servos, or hardware — NOT about lab manuals or textbooks.\n\
- The category is only for tone. The CONTENT must come from the activity title.\n\
- One sentence only, under 25 words.\n\
- Start with a ✨ emoji.\n\
- Be warm, casual, and fun.\n\
- Do NOT wrap your response in quotes.";

/// Generator backed by a Gemini-style `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: reqwest::Client,
    config: IcebreakerConfig,
}

impl GeminiGenerator {
    /// Build a generator from configuration. The HTTP client carries the
    /// configured timeout so a hung endpoint cannot outlive it.
    pub fn new(config: IcebreakerConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    joinin_core::error::ErrorKind::Configuration,
                    "failed to build icebreaker HTTP client",
                    e,
                )
            })?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl IcebreakerGenerator for GeminiGenerator {
    async fn generate(&self, activity: &str, category: Category) -> AppResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::external_service("no icebreaker API key configured"))?;
        let url = format!("{}?key={}", self.config.endpoint, api_key);

        let body = serde_json::json!({
            "systemInstruction": {
                "parts": [{ "text": SYSTEM_PROMPT }]
            },
            "contents": [{
                "parts": [{
                    "text": format!(
                        "Activity: \"{activity}\"\nCategory: {category}\n\n\
                         Generate one icebreaker sentence specifically about \"{activity}\":"
                    )
                }]
            }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_output_tokens,
            }
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    joinin_core::error::ErrorKind::ExternalService,
                    "icebreaker generator request failed",
                    e,
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "icebreaker generator returned {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response.json().await.map_err(|e| {
            AppError::with_source(
                joinin_core::error::ErrorKind::ExternalService,
                "icebreaker generator returned unreadable body",
                e,
            )
        })?;

        data.pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::external_service("icebreaker generator returned empty text"))
    }
}
