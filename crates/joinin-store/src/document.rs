//! Session documents — one per session, exclusively owning its children.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use joinin_core::types::id::{MessageId, UserId};
use joinin_entity::chat::{ChatMessage, Sender};
use joinin_entity::participant::Participant;
use joinin_entity::session::Session;

/// The unit of storage: a session plus its participant and chat children.
///
/// Because the document owns its children, removing it from the map deletes
/// everything at once; there is no window in which orphaned participants or
/// messages are reachable by a new subscription.
///
/// `version` increments on every mutation and backs the conditional
/// admission commit.
#[derive(Debug, Clone)]
pub(crate) struct SessionDocument {
    /// The session record.
    pub session: Session,
    /// Roster children, keyed by user ID.
    pub participants: HashMap<UserId, Participant>,
    /// Chat children in insertion order.
    pub messages: Vec<ChatMessage>,
    /// Next message insertion sequence.
    pub next_seq: u64,
    /// Document version, bumped on every mutation.
    pub version: u64,
}

impl SessionDocument {
    /// Create a document for a fresh session with the host already on the
    /// roster.
    pub fn new(session: Session, host: Participant) -> Self {
        let participants = HashMap::from([(host.uid, host)]);
        Self {
            session,
            participants,
            messages: Vec::new(),
            next_seq: 0,
            version: 0,
        }
    }

    /// The roster as an unordered set snapshot.
    pub fn roster_snapshot(&self) -> Vec<Participant> {
        self.participants.values().cloned().collect()
    }

    /// The full chat history in `(timestamp, seq)` order.
    pub fn chat_snapshot(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    /// Add an admitted user to the roster. Caller has already decided
    /// admission is valid under the current version.
    pub fn admit(&mut self, participant: Participant) {
        self.session.participant_ids.insert(participant.uid);
        self.participants.insert(participant.uid, participant);
        self.version += 1;
    }

    /// Append a message, assigning its id, timestamp, and sequence.
    ///
    /// The timestamp is clamped to never run backwards so the stored
    /// insertion order and the `(timestamp, seq)` order always agree.
    pub fn append(&mut self, sender: Sender, text: String) -> ChatMessage {
        let floor = self
            .messages
            .last()
            .map(|m| m.timestamp)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let message = ChatMessage {
            id: MessageId::new(),
            sender,
            text,
            timestamp: Utc::now().max(floor),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.version += 1;
        self.messages.push(message.clone());
        message
    }
}
