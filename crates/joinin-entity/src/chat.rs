//! Chat message entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use joinin_core::types::id::{MessageId, UserId};

/// Display name used for messages authored by the engine itself.
pub const SYSTEM_SENDER_NAME: &str = "AI Social Assistant";

/// Who authored a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sender {
    /// A session participant.
    User {
        /// The author's user ID.
        id: UserId,
        /// The author's display name at send time.
        name: String,
    },
    /// The reserved system sender (icebreaker messages).
    System,
}

impl Sender {
    /// The display name to render for this sender.
    pub fn display_name(&self) -> &str {
        match self {
            Self::User { name, .. } => name,
            Self::System => SYSTEM_SENDER_NAME,
        }
    }

    /// Whether this is the reserved system sender.
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

/// One message in a session's append-only chat log.
///
/// The ordering key is `(timestamp, seq)`; `seq` is a store-assigned
/// insertion sequence that is strictly monotonic per session, so the order
/// is total even when two messages land on the same timestamp. Messages
/// are never mutated or reordered after creation; `id` is the
/// de-duplication key for at-least-once delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: MessageId,
    /// The author.
    pub sender: Sender,
    /// Message body.
    pub text: String,
    /// When the store accepted the message.
    pub timestamp: DateTime<Utc>,
    /// Store-assigned insertion sequence within the session.
    pub seq: u64,
}

impl ChatMessage {
    /// The `(timestamp, seq)` ordering key.
    pub fn ordering_key(&self) -> (DateTime<Utc>, u64) {
        (self.timestamp, self.seq)
    }
}
