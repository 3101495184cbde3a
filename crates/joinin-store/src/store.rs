//! The session store: CRUD, queries, feeds, and the admission transaction.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::broadcast;

use joinin_core::config::store::StoreConfig;
use joinin_core::error::AppError;
use joinin_core::events::session::SessionEvent;
use joinin_core::result::AppResult;
use joinin_core::types::id::SessionId;
use joinin_entity::chat::{ChatMessage, Sender};
use joinin_entity::participant::Participant;
use joinin_entity::session::{CreateSession, Session, SessionStatus};

use crate::document::SessionDocument;
use crate::feed::{Feed, FeedSubscription};
use crate::filter::SessionFilter;

/// Why a conditional admission commit was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommitError {
    /// The document changed since the transaction snapshot was taken.
    #[error("session document version changed since snapshot")]
    Conflict,
    /// The session was deleted since the snapshot was taken.
    #[error("session no longer exists")]
    NotFound,
}

/// A consistent read of one session taken at a document version.
///
/// Produced by [`SessionStore::begin_admission`]; the paired
/// [`SessionStore::commit_admission`] only applies if the document is still
/// at this version, so the read-check-write is one conditional transaction.
#[derive(Debug, Clone)]
pub struct AdmissionTxn {
    /// The session as of the snapshot.
    pub session: Session,
    version: u64,
}

/// Per-session realtime feeds.
#[derive(Debug)]
struct SessionFeeds {
    roster: Feed<Vec<Participant>>,
    chat: Feed<Vec<ChatMessage>>,
}

#[derive(Debug)]
struct StoreInner {
    /// Session ID → document. The document owns all children.
    docs: DashMap<SessionId, SessionDocument>,
    /// Session ID → feeds. Removed (closing all subscriptions) on delete.
    feeds: DashMap<SessionId, SessionFeeds>,
    /// Store-wide change events; drives listing subscriptions.
    events: broadcast::Sender<SessionEvent>,
    config: StoreConfig,
}

/// In-memory hierarchical session store.
///
/// Cheap to clone; all clones share the same underlying store. Mutations
/// publish full snapshots to the affected feeds while the document entry
/// lock is held, so every subscriber observes snapshots in mutation order.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new(config: StoreConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_buffer_size);
        Self {
            inner: Arc::new(StoreInner {
                docs: DashMap::new(),
                feeds: DashMap::new(),
                events,
                config,
            }),
        }
    }

    /// Create a session. Assigns the ID and timestamps, puts the host on
    /// the roster, and makes the session discoverable.
    pub fn create(&self, req: CreateSession) -> AppResult<Session> {
        let created_at = Utc::now();
        let expires_at = created_at + req.duration;
        if expires_at <= created_at {
            return Err(AppError::validation("session duration must be positive"));
        }

        let capacity = req.capacity();
        let session = Session {
            id: SessionId::new(),
            host_id: req.host.id,
            host_name: req.host.display_name.clone(),
            activity: req.activity,
            category: req.category,
            venue: req.venue,
            capacity,
            participant_ids: [req.host.id].into_iter().collect(),
            created_at,
            expires_at,
            status: SessionStatus::Active,
        };
        let host = Participant::admitted(&req.host, created_at);
        let doc = SessionDocument::new(session.clone(), host);

        self.inner.docs.insert(session.id, doc);
        self.emit(SessionEvent::Created {
            session_id: session.id,
            host_id: session.host_id,
        });
        tracing::info!(session_id = %session.id, host_id = %session.host_id, "session created");
        Ok(session)
    }

    /// Fetch one session record.
    pub fn get(&self, id: SessionId) -> AppResult<Session> {
        self.inner
            .docs
            .get(&id)
            .map(|doc| doc.session.clone())
            .ok_or_else(|| AppError::not_found(format!("session {id} not found")))
    }

    /// Current roster snapshot.
    pub fn participants(&self, id: SessionId) -> AppResult<Vec<Participant>> {
        self.inner
            .docs
            .get(&id)
            .map(|doc| doc.roster_snapshot())
            .ok_or_else(|| AppError::not_found(format!("session {id} not found")))
    }

    /// Full ordered chat history.
    pub fn messages(&self, id: SessionId) -> AppResult<Vec<ChatMessage>> {
        self.inner
            .docs
            .get(&id)
            .map(|doc| doc.chat_snapshot())
            .ok_or_else(|| AppError::not_found(format!("session {id} not found")))
    }

    /// Sessions passing the filter, ascending by `expires_at`.
    pub fn list(&self, filter: &SessionFilter) -> Vec<Session> {
        let now = Utc::now();
        let mut sessions: Vec<Session> = self
            .inner
            .docs
            .iter()
            .filter(|doc| filter.matches(&doc.session, now))
            .map(|doc| doc.session.clone())
            .collect();
        sessions.sort_by_key(|s| (s.expires_at, s.id.into_uuid()));
        sessions
    }

    /// Subscribe to the filtered session listing.
    ///
    /// Delivers the current snapshot immediately, then a recomputed
    /// snapshot whenever a store change alters the filtered result. Drop
    /// to unsubscribe.
    pub fn subscribe(&self, filter: SessionFilter) -> ListingSubscription {
        ListingSubscription {
            store: self.clone(),
            filter,
            rx: self.inner.events.subscribe(),
            last: None,
            delivered_initial: false,
        }
    }

    /// Subscribe to a session's live roster.
    ///
    /// Each delivery is a full replacement of the roster. The feed ends
    /// (`next()` → `None`) when the session is deleted.
    pub fn subscribe_roster(
        &self,
        id: SessionId,
    ) -> AppResult<FeedSubscription<Vec<Participant>>> {
        // Holding the doc guard makes the initial snapshot and the
        // receiver registration atomic with respect to mutations.
        let doc = self
            .inner
            .docs
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("session {id} not found")))?;
        let snapshot = doc.roster_snapshot();
        Ok(self.feeds(id, |f| f.roster.subscribe(snapshot)))
    }

    /// Subscribe to a session's chat log.
    ///
    /// Each delivery is the full ordered history up to that point. The
    /// feed ends when the session is deleted.
    pub fn subscribe_chat(
        &self,
        id: SessionId,
    ) -> AppResult<FeedSubscription<Vec<ChatMessage>>> {
        let doc = self
            .inner
            .docs
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("session {id} not found")))?;
        let snapshot = doc.chat_snapshot();
        Ok(self.feeds(id, |f| f.chat.subscribe(snapshot)))
    }

    /// Take the consistent snapshot that starts an admission transaction.
    pub fn begin_admission(&self, id: SessionId) -> AppResult<AdmissionTxn> {
        self.inner
            .docs
            .get(&id)
            .map(|doc| AdmissionTxn {
                session: doc.session.clone(),
                version: doc.version,
            })
            .ok_or_else(|| AppError::not_found(format!("session {id} not found")))
    }

    /// Conditionally commit an admission.
    ///
    /// Applies only if the document is still at the transaction's version;
    /// any interleaved mutation (another admission, a message, a delete)
    /// rejects the commit and the caller must re-read and retry. This is
    /// what makes two callers racing for the last slot mutually exclusive.
    pub fn commit_admission(
        &self,
        txn: &AdmissionTxn,
        participant: Participant,
    ) -> Result<(), CommitError> {
        let id = txn.session.id;
        let mut doc = self.inner.docs.get_mut(&id).ok_or(CommitError::NotFound)?;
        if doc.version != txn.version {
            return Err(CommitError::Conflict);
        }
        let user_id = participant.uid;
        doc.admit(participant);
        let roster = doc.roster_snapshot();
        self.feeds(id, |f| f.roster.publish(roster));
        drop(doc);

        self.emit(SessionEvent::ParticipantJoined {
            session_id: id,
            user_id,
        });
        tracing::debug!(session_id = %id, user_id = %user_id, "participant admitted");
        Ok(())
    }

    /// Append a chat message. Fails with NotFound if the session was
    /// deleted concurrently.
    pub fn append_message(
        &self,
        id: SessionId,
        sender: Sender,
        text: String,
    ) -> AppResult<ChatMessage> {
        let mut doc = self
            .inner
            .docs
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("session {id} not found")))?;
        let message = doc.append(sender, text);
        let history = doc.chat_snapshot();
        self.feeds(id, |f| f.chat.publish(history));
        drop(doc);

        self.emit(SessionEvent::MessageAppended {
            session_id: id,
            message_id: message.id,
        });
        Ok(message)
    }

    /// Delete a session and everything it owns.
    ///
    /// The document removal is atomic: participants and messages vanish
    /// with it, and all roster/chat feeds for the session end after one
    /// final empty snapshot. Returns whether anything was deleted, so a
    /// re-issued delete is a harmless no-op.
    pub fn delete(&self, id: SessionId) -> bool {
        let removed = self.inner.docs.remove(&id).is_some();
        if removed {
            if let Some((_, feeds)) = self.inner.feeds.remove(&id) {
                feeds.roster.publish(Vec::new());
                feeds.chat.publish(Vec::new());
            }
            self.emit(SessionEvent::Deleted { session_id: id });
            tracing::info!(session_id = %id, "session deleted");
        }
        removed
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.inner.docs.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.inner.docs.is_empty()
    }

    fn feeds<R>(&self, id: SessionId, f: impl FnOnce(&SessionFeeds) -> R) -> R {
        let entry = self.inner.feeds.entry(id).or_insert_with(|| SessionFeeds {
            roster: Feed::new(self.inner.config.feed_buffer_size),
            chat: Feed::new(self.inner.config.feed_buffer_size),
        });
        f(entry.value())
    }

    fn emit(&self, event: SessionEvent) {
        // No listing subscribers is fine; the event is simply dropped.
        let _ = self.inner.events.send(event);
    }
}

/// Live view over a filtered session listing.
///
/// Drop to unsubscribe (idempotent; no further deliveries).
pub struct ListingSubscription {
    store: SessionStore,
    filter: SessionFilter,
    rx: broadcast::Receiver<SessionEvent>,
    last: Option<Vec<Session>>,
    delivered_initial: bool,
}

impl ListingSubscription {
    /// Wait for the next full-result snapshot.
    ///
    /// The first call resolves immediately with the current result. Later
    /// calls resolve when a store change alters the filtered result;
    /// changes that leave the result identical are coalesced away.
    pub async fn next(&mut self) -> Option<Vec<Session>> {
        if !self.delivered_initial {
            self.delivered_initial = true;
            let snapshot = self.store.list(&self.filter);
            self.last = Some(snapshot.clone());
            return Some(snapshot);
        }
        loop {
            match self.rx.recv().await {
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    let snapshot = self.store.list(&self.filter);
                    if self.last.as_ref() != Some(&snapshot) {
                        self.last = Some(snapshot.clone());
                        return Some(snapshot);
                    }
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
