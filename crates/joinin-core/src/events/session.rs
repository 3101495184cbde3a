//! Session-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::id::{MessageId, SessionId, UserId};

/// Events emitted whenever a session document (or one of its children)
/// changes. Each event names the session it belongs to so subscribers can
/// recompute their view of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A new session was created and is discoverable.
    Created {
        /// The session ID.
        session_id: SessionId,
        /// The host who created it.
        host_id: UserId,
    },
    /// A user was admitted and added to the roster.
    ParticipantJoined {
        /// The session ID.
        session_id: SessionId,
        /// The admitted user.
        user_id: UserId,
    },
    /// A chat message was appended.
    MessageAppended {
        /// The session ID.
        session_id: SessionId,
        /// The appended message.
        message_id: MessageId,
    },
    /// The session and all of its children were deleted.
    Deleted {
        /// The session ID.
        session_id: SessionId,
    },
}

impl SessionEvent {
    /// The session this event belongs to.
    pub fn session_id(&self) -> SessionId {
        match self {
            Self::Created { session_id, .. }
            | Self::ParticipantJoined { session_id, .. }
            | Self::MessageAppended { session_id, .. }
            | Self::Deleted { session_id } => *session_id,
        }
    }
}
