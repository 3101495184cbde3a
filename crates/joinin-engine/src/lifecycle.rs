//! Lifecycle manager — session creation, derived state, and host-only
//! cascading close.

use chrono::{DateTime, Utc};

use joinin_core::error::AppError;
use joinin_core::result::AppResult;
use joinin_core::types::id::{SessionId, UserId};
use joinin_entity::session::{Category, CreateSession, Session, SessionStatus};
use joinin_store::{ListingSubscription, SessionFilter, SessionStore};

/// Derived session state.
///
/// `Expired` is computed lazily by comparing the wall clock against
/// `expires_at`; there is no background sweep and no stored-state change.
/// An expired session stops being surfaced by active listings but its
/// record, roster, and chat remain retrievable until explicit close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Within `[created_at, expires_at)` and not closed.
    Active,
    /// Past `expires_at` but not yet closed.
    Expired,
    /// Explicitly closed by the host. Terminal.
    Closed,
}

/// Owns session creation, the active/expired/closed state machine, and
/// cascading deletion.
#[derive(Debug, Clone)]
pub struct LifecycleManager {
    store: SessionStore,
}

impl LifecycleManager {
    /// Create a lifecycle manager over the given store.
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Create and broadcast a new session. The host lands on the roster
    /// immediately and occupies one capacity slot.
    pub fn create(&self, mut req: CreateSession) -> AppResult<Session> {
        req.activity = req.activity.trim().to_string();
        if req.activity.is_empty() {
            return Err(AppError::validation("activity must not be empty"));
        }
        if req.looking_for == 0 {
            return Err(AppError::validation(
                "a session must look for at least one other participant",
            ));
        }
        if req.duration <= chrono::Duration::zero() {
            return Err(AppError::validation("session duration must be positive"));
        }
        self.store.create(req)
    }

    /// Fetch one session.
    pub fn get(&self, session_id: SessionId) -> AppResult<Session> {
        self.store.get(session_id)
    }

    /// Derive the state of a session at the given instant.
    pub fn state_of(session: &Session, now: DateTime<Utc>) -> SessionState {
        if session.status == SessionStatus::Closed {
            SessionState::Closed
        } else if session.expires_at <= now {
            SessionState::Expired
        } else {
            SessionState::Active
        }
    }

    /// Active, unexpired sessions in ascending `expires_at` order,
    /// optionally narrowed to one category.
    pub fn list_active(&self, category: Option<Category>) -> Vec<Session> {
        self.store.list(&Self::active_filter(category))
    }

    /// Live view over the active listing. Initial snapshot immediately,
    /// then a fresh snapshot whenever the result changes.
    pub fn subscribe_active(&self, category: Option<Category>) -> ListingSubscription {
        self.store.subscribe(Self::active_filter(category))
    }

    /// Close a session: delete all of its participants and messages
    /// together with the record itself.
    ///
    /// Only the host may close. Safe to re-issue and safe against an
    /// in-flight join: the join either fails NotFound or lands before the
    /// removal and is deleted with everything else, so no orphaned
    /// participant survives.
    pub fn close(&self, session_id: SessionId, requester: UserId) -> AppResult<()> {
        let session = self.store.get(session_id)?;
        if session.host_id != requester {
            tracing::warn!(
                session_id = %session_id,
                requester = %requester,
                "non-host attempted to close session"
            );
            return Err(AppError::forbidden("only the host may close a session"));
        }
        // A delete racing between the host check and here already did our
        // work; treat it as success.
        self.store.delete(session_id);
        Ok(())
    }

    fn active_filter(category: Option<Category>) -> SessionFilter {
        match category {
            Some(category) => SessionFilter::active_in(category),
            None => SessionFilter::active(),
        }
    }
}
