//! Chat stream — ordered, append-only message log per session.

use joinin_core::error::AppError;
use joinin_core::result::AppResult;
use joinin_core::types::id::SessionId;
use joinin_entity::chat::{ChatMessage, Sender};
use joinin_entity::identity::AuthenticatedUser;
use joinin_store::{FeedSubscription, SessionStore};

/// Append-only chat over a session, with realtime fan-out.
///
/// Every subscriber delivery is the full ordered history up to that point
/// (histories are short-lived and bounded by session duration). Delivery
/// is at-least-once; consumers de-duplicate on message `id`. System
/// messages are ordered exactly like user messages.
#[derive(Debug, Clone)]
pub struct ChatStream {
    store: SessionStore,
}

impl ChatStream {
    /// Create a chat stream over the given store.
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Append a user message. Fails with `Validation` for empty text and
    /// `NotFound` if the session does not exist or was deleted
    /// concurrently.
    pub fn send(
        &self,
        session_id: SessionId,
        user: &AuthenticatedUser,
        text: &str,
    ) -> AppResult<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::validation("chat message text is empty"));
        }
        self.store.append_message(
            session_id,
            Sender::User {
                id: user.id,
                name: user.display_name.clone(),
            },
            text.to_string(),
        )
    }

    /// Append a message from the reserved system sender.
    pub fn send_system(&self, session_id: SessionId, text: String) -> AppResult<ChatMessage> {
        self.store.append_message(session_id, Sender::System, text)
    }

    /// Full ordered history.
    pub fn history(&self, session_id: SessionId) -> AppResult<Vec<ChatMessage>> {
        self.store.messages(session_id)
    }

    /// Subscribe to the chat log. The first delivery is the history so
    /// far; the feed ends when the session is deleted. Drop to
    /// unsubscribe.
    pub fn subscribe(
        &self,
        session_id: SessionId,
    ) -> AppResult<FeedSubscription<Vec<ChatMessage>>> {
        self.store.subscribe_chat(session_id)
    }
}
