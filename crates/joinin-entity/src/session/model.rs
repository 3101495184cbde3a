//! Session entity model.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use joinin_core::types::id::{SessionId, UserId};

use crate::identity::AuthenticatedUser;

use super::category::Category;
use super::venue::Venue;

/// Stored session status.
///
/// `Closed` is a terminal, explicit state reached through host-initiated
/// deletion. Expiry is **not** a stored status; it is derived by comparing
/// the wall clock to [`Session::expires_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// The session is live and discoverable.
    Active,
    /// The host closed the session. Terminal.
    Closed,
}

/// A time-bounded, capacity-limited meetup advertisement ("beacon") with
/// an associated roster and chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Store-assigned identifier.
    pub id: SessionId,
    /// The user who created the session.
    pub host_id: UserId,
    /// Host display name at creation time.
    pub host_name: String,
    /// Free-text activity description.
    pub activity: String,
    /// Activity category tag.
    pub category: Category,
    /// Where the meetup happens.
    pub venue: Venue,
    /// Maximum roster size, host included. Always at least 1.
    pub capacity: u32,
    /// Current member set. Invariant: `participant_ids.len() <= capacity`
    /// and the host is always a member after creation.
    pub participant_ids: HashSet<UserId>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session stops being surfaced as active.
    pub expires_at: DateTime<Utc>,
    /// Stored status.
    pub status: SessionStatus,
}

impl Session {
    /// Whether the session is past its expiry timestamp.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Whether the given user is already on the roster.
    pub fn is_member(&self, user_id: UserId) -> bool {
        self.participant_ids.contains(&user_id)
    }

    /// Whether the roster is at capacity.
    pub fn is_full(&self) -> bool {
        self.participant_ids.len() as u32 >= self.capacity
    }

    /// How many slots remain, host included in the count.
    pub fn remaining_slots(&self) -> u32 {
        self.capacity
            .saturating_sub(self.participant_ids.len() as u32)
    }
}

/// Data required to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    /// The host creating the session.
    pub host: AuthenticatedUser,
    /// Free-text activity description.
    pub activity: String,
    /// Activity category tag.
    pub category: Category,
    /// Where the meetup happens.
    pub venue: Venue,
    /// How many *other* people the host is looking for. The stored
    /// capacity is `looking_for + 1` so the host occupies a slot.
    pub looking_for: u32,
    /// How long the session stays discoverable.
    pub duration: Duration,
}

impl CreateSession {
    /// The capacity this request will store (host included). Saturates
    /// instead of overflowing for absurd `looking_for` values.
    pub fn capacity(&self) -> u32 {
        self.looking_for.saturating_add(1)
    }
}
