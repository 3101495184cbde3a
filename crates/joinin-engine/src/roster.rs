//! Presence roster — the live set of a session's participants.

use joinin_core::result::AppResult;
use joinin_core::types::id::SessionId;
use joinin_entity::participant::Participant;
use joinin_store::{FeedSubscription, SessionStore};

/// Presents the current participant set of a session as a live feed.
///
/// Membership is a set, not a sequence: no ordering is guaranteed among
/// participants, and every delivery is a full replacement of the visible
/// roster rather than a diff.
#[derive(Debug, Clone)]
pub struct PresenceRoster {
    store: SessionStore,
}

impl PresenceRoster {
    /// Create a roster view over the given store.
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// The current roster.
    pub fn snapshot(&self, session_id: SessionId) -> AppResult<Vec<Participant>> {
        self.store.participants(session_id)
    }

    /// Subscribe to roster changes. The first delivery is the current
    /// roster; the feed ends when the session is deleted. Drop to
    /// unsubscribe.
    pub fn subscribe(
        &self,
        session_id: SessionId,
    ) -> AppResult<FeedSubscription<Vec<Participant>>> {
        self.store.subscribe_roster(session_id)
    }
}
