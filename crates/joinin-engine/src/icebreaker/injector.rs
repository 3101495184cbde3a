//! Injects one welcome message per successful admission.

use std::sync::Arc;
use std::time::Duration;

use joinin_core::config::icebreaker::IcebreakerConfig;
use joinin_entity::session::Session;

use crate::chat::ChatStream;

use super::fallback::fallback_icebreaker;
use super::generator::IcebreakerGenerator;

/// Orchestrates the optional AI-generated welcome message.
///
/// Called by the engine exactly once per `Admitted` transition — repeat
/// join attempts by an existing member never reach it.
#[derive(Clone)]
pub struct IcebreakerInjector {
    generator: Arc<dyn IcebreakerGenerator>,
    chat: ChatStream,
    timeout: Duration,
}

impl IcebreakerInjector {
    /// Create an injector over the given generator and chat stream.
    pub fn new(
        generator: Arc<dyn IcebreakerGenerator>,
        chat: ChatStream,
        config: &IcebreakerConfig,
    ) -> Self {
        Self {
            generator,
            chat,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Produce and append the welcome message for a session someone just
    /// joined.
    ///
    /// Best-effort end to end: generator errors, timeouts, and empty
    /// responses all resolve to the deterministic fallback, and a failed
    /// append (session deleted in the meantime) is only logged. The
    /// admission this follows is already committed and is never undone.
    pub async fn inject(&self, session: &Session) {
        let generated = tokio::time::timeout(
            self.timeout,
            self.generator.generate(&session.activity, session.category),
        )
        .await;

        let text = match generated {
            Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(Ok(_)) => {
                tracing::warn!(session_id = %session.id, "icebreaker generator returned empty text, using fallback");
                fallback_icebreaker(&session.activity, session.category)
            }
            Ok(Err(e)) => {
                tracing::warn!(session_id = %session.id, error = %e, "icebreaker generation failed, using fallback");
                fallback_icebreaker(&session.activity, session.category)
            }
            Err(_) => {
                tracing::warn!(session_id = %session.id, "icebreaker generation timed out, using fallback");
                fallback_icebreaker(&session.activity, session.category)
            }
        };

        if let Err(e) = self.chat.send_system(session.id, text) {
            tracing::warn!(session_id = %session.id, error = %e, "failed to append icebreaker message");
        }
    }
}
