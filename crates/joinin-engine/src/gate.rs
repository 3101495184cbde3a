//! Capacity gate — the only place participant-count-vs-capacity is
//! checked and enforced.

use chrono::Utc;
use rand::RngExt;

use joinin_core::config::admission::AdmissionConfig;
use joinin_core::error::AppError;
use joinin_core::result::AppResult;
use joinin_core::types::id::SessionId;
use joinin_entity::identity::AuthenticatedUser;
use joinin_entity::participant::Participant;
use joinin_store::{AdmissionTxn, CommitError, SessionStore};

/// Result of an admission attempt. All three are ordinary user-facing
/// outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The user was added to the roster.
    Admitted,
    /// The user was already on the roster; nothing changed.
    AlreadyMember,
    /// The session has no remaining slots.
    Full,
}

/// Admission control over the session store's conditional transaction.
#[derive(Debug, Clone)]
pub struct CapacityGate {
    store: SessionStore,
    config: AdmissionConfig,
    /// Commits left to reject as conflicts, so the retry path can be
    /// driven deterministically.
    #[cfg(test)]
    forced_conflicts: std::sync::Arc<std::sync::atomic::AtomicU32>,
}

impl CapacityGate {
    /// Create a gate over the given store.
    pub fn new(store: SessionStore, config: AdmissionConfig) -> Self {
        Self {
            store,
            config,
            #[cfg(test)]
            forced_conflicts: Default::default(),
        }
    }

    /// Attempt to join a session.
    ///
    /// Reads the session under a transaction snapshot, decides, and
    /// commits conditionally: if the document changed underneath us the
    /// commit conflicts and the whole read-check-write is retried, so two
    /// callers racing for the last slot can never both be admitted.
    ///
    /// Idempotent for existing members (returns
    /// [`JoinOutcome::AlreadyMember`] with no side effects). Expiry does
    /// not block admission; it only affects discovery filtering.
    ///
    /// Fails with `NotFound` if the session does not exist (or was deleted
    /// mid-flight) and with `Transient` once the retry budget is exhausted
    /// under sustained contention.
    pub async fn try_join(
        &self,
        session_id: SessionId,
        user: &AuthenticatedUser,
    ) -> AppResult<JoinOutcome> {
        let attempts = self.config.max_retries.max(1);
        for attempt in 0..attempts {
            let txn = self.store.begin_admission(session_id)?;
            if txn.session.is_member(user.id) {
                return Ok(JoinOutcome::AlreadyMember);
            }
            if txn.session.is_full() {
                return Ok(JoinOutcome::Full);
            }

            let participant = Participant::admitted(user, Utc::now());
            match self.commit(&txn, participant) {
                Ok(()) => {
                    tracing::info!(
                        session_id = %session_id,
                        user_id = %user.id,
                        "user admitted to session"
                    );
                    return Ok(JoinOutcome::Admitted);
                }
                Err(CommitError::NotFound) => {
                    return Err(AppError::not_found(format!(
                        "session {session_id} was deleted during admission"
                    )));
                }
                Err(CommitError::Conflict) => {
                    tracing::debug!(
                        session_id = %session_id,
                        user_id = %user.id,
                        attempt,
                        "admission conflict, retrying"
                    );
                    self.backoff(attempt).await;
                }
            }
        }

        Err(AppError::transient(format!(
            "admission to session {session_id} kept conflicting after {attempts} attempts"
        )))
    }

    fn commit(&self, txn: &AdmissionTxn, participant: Participant) -> Result<(), CommitError> {
        #[cfg(test)]
        if self.consume_forced_conflict() {
            return Err(CommitError::Conflict);
        }
        self.store.commit_admission(txn, participant)
    }

    /// Jittered backoff between conflicting attempts so racing callers do
    /// not retry in lockstep.
    async fn backoff(&self, attempt: u32) {
        let base = self.config.retry_backoff_ms;
        if base == 0 {
            tokio::task::yield_now().await;
            return;
        }
        let jitter = rand::rng().random_range(0..=base);
        let delay = base * u64::from(attempt + 1) + jitter;
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
    }
}

#[cfg(test)]
impl CapacityGate {
    fn force_conflicts(&self, n: u32) {
        self.forced_conflicts
            .store(n, std::sync::atomic::Ordering::SeqCst);
    }

    fn consume_forced_conflict(&self) -> bool {
        use std::sync::atomic::Ordering;
        self.forced_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}
