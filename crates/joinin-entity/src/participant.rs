//! Participant records — the roster entries of a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use joinin_core::types::id::UserId;

use crate::identity::AuthenticatedUser;

/// A user admitted to a session.
///
/// Created exactly once per user per session on successful admission,
/// never mutated afterwards, and deleted only when the owning session is
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The participant's user ID.
    pub uid: UserId,
    /// Display name at the time of admission.
    pub display_name: String,
    /// Avatar URL at the time of admission.
    pub avatar_url: Option<String>,
    /// When the user was admitted.
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    /// Build a roster record for a freshly admitted user.
    pub fn admitted(user: &AuthenticatedUser, joined_at: DateTime<Utc>) -> Self {
        Self {
            uid: user.id,
            display_name: user.display_name.clone(),
            avatar_url: user.avatar_url.clone(),
            joined_at,
        }
    }
}
