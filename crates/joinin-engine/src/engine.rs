//! The engine facade wiring admission, presence, chat, lifecycle, and
//! icebreaker injection together.

use std::sync::Arc;

use joinin_core::config::AppConfig;
use joinin_core::result::AppResult;
use joinin_core::types::id::{SessionId, UserId};
use joinin_entity::chat::ChatMessage;
use joinin_entity::identity::AuthenticatedUser;
use joinin_entity::session::{Category, CreateSession, Session};
use joinin_store::{FeedSubscription, ListingSubscription, SessionStore};

use crate::chat::ChatStream;
use crate::gate::{CapacityGate, JoinOutcome};
use crate::icebreaker::{GeminiGenerator, IcebreakerGenerator, IcebreakerInjector};
use crate::lifecycle::LifecycleManager;
use crate::roster::PresenceRoster;

/// The assembled coordination engine.
///
/// One instance per process; cheap to clone and share.
#[derive(Clone)]
pub struct JoinInEngine {
    store: SessionStore,
    gate: CapacityGate,
    roster: PresenceRoster,
    chat: ChatStream,
    lifecycle: LifecycleManager,
    injector: IcebreakerInjector,
}

impl JoinInEngine {
    /// Assemble an engine over a store with an explicit generator.
    pub fn new(
        store: SessionStore,
        generator: Arc<dyn IcebreakerGenerator>,
        config: &AppConfig,
    ) -> Self {
        let chat = ChatStream::new(store.clone());
        Self {
            gate: CapacityGate::new(store.clone(), config.admission.clone()),
            roster: PresenceRoster::new(store.clone()),
            lifecycle: LifecycleManager::new(store.clone()),
            injector: IcebreakerInjector::new(generator, chat.clone(), &config.icebreaker),
            chat,
            store,
        }
    }

    /// Assemble an engine with a fresh store and the production generator.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let store = SessionStore::new(config.store.clone());
        let generator = Arc::new(GeminiGenerator::new(config.icebreaker.clone())?);
        Ok(Self::new(store, generator, config))
    }

    /// Create and broadcast a new session.
    pub fn create_session(&self, req: CreateSession) -> AppResult<Session> {
        self.lifecycle.create(req)
    }

    /// Fetch one session.
    pub fn get_session(&self, session_id: SessionId) -> AppResult<Session> {
        self.store.get(session_id)
    }

    /// Join a session.
    ///
    /// On `Admitted` the icebreaker is produced and appended before this
    /// returns; that step is bounded by the configured generator timeout
    /// and begins only after the admission has committed, so it can delay
    /// the response slightly but can never block or undo the join itself.
    /// `AlreadyMember` and `Full` trigger nothing.
    pub async fn join(
        &self,
        session_id: SessionId,
        user: &AuthenticatedUser,
    ) -> AppResult<JoinOutcome> {
        let outcome = self.gate.try_join(session_id, user).await?;
        if outcome == JoinOutcome::Admitted {
            // Tolerate a concurrent close: the session may already be gone.
            if let Ok(session) = self.store.get(session_id) {
                self.injector.inject(&session).await;
            }
        }
        Ok(outcome)
    }

    /// Close a session (host only); cascades to all children.
    pub fn close_session(&self, session_id: SessionId, requester: UserId) -> AppResult<()> {
        self.lifecycle.close(session_id, requester)
    }

    /// Active, unexpired sessions for discovery.
    pub fn list_active(&self, category: Option<Category>) -> Vec<Session> {
        self.lifecycle.list_active(category)
    }

    /// Live discovery listing.
    pub fn subscribe_active(&self, category: Option<Category>) -> ListingSubscription {
        self.lifecycle.subscribe_active(category)
    }

    /// Send a chat message as a participant-facing user.
    pub fn send_message(
        &self,
        session_id: SessionId,
        user: &AuthenticatedUser,
        text: &str,
    ) -> AppResult<ChatMessage> {
        self.chat.send(session_id, user, text)
    }

    /// Subscribe to a session's chat log.
    pub fn subscribe_chat(
        &self,
        session_id: SessionId,
    ) -> AppResult<FeedSubscription<Vec<ChatMessage>>> {
        self.chat.subscribe(session_id)
    }

    /// Subscribe to a session's roster.
    pub fn subscribe_roster(
        &self,
        session_id: SessionId,
    ) -> AppResult<FeedSubscription<Vec<joinin_entity::participant::Participant>>> {
        self.roster.subscribe(session_id)
    }

    /// The presence roster component.
    pub fn roster(&self) -> &PresenceRoster {
        &self.roster
    }

    /// The chat stream component.
    pub fn chat(&self) -> &ChatStream {
        &self.chat
    }

    /// The lifecycle manager component.
    pub fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    /// The underlying store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}
