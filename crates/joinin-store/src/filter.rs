//! Query filters for session listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use joinin_entity::session::{Category, Session, SessionStatus};

/// Equality filters plus the lazy-expiry visibility cut.
///
/// Results are always ordered ascending by `expires_at` (soonest-ending
/// first), matching how discovery surfaces sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionFilter {
    /// Match only sessions with this stored status.
    pub status: Option<SessionStatus>,
    /// Match only sessions with this category tag.
    pub category: Option<Category>,
    /// Drop sessions whose `expires_at` is in the past. This is the only
    /// place expiry affects anything: it hides sessions from discovery,
    /// it never changes stored state.
    pub exclude_expired: bool,
}

impl SessionFilter {
    /// Everything in the store, no cuts.
    pub fn all() -> Self {
        Self::default()
    }

    /// The discovery view: active, unexpired sessions.
    pub fn active() -> Self {
        Self {
            status: Some(SessionStatus::Active),
            category: None,
            exclude_expired: true,
        }
    }

    /// The discovery view narrowed to one category.
    pub fn active_in(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::active()
        }
    }

    /// Whether a session passes this filter at the given instant.
    pub fn matches(&self, session: &Session, now: DateTime<Utc>) -> bool {
        if let Some(status) = self.status {
            if session.status != status {
                return false;
            }
        }
        if let Some(category) = self.category {
            if session.category != category {
                return false;
            }
        }
        if self.exclude_expired && session.expires_at <= now {
            return false;
        }
        true
    }
}
