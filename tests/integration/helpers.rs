//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Duration;

use joinin::core::config::AppConfig;
use joinin::core::error::AppError;
use joinin::core::types::id::UserId;
use joinin::engine::{IcebreakerGenerator, JoinInEngine};
use joinin::entity::identity::AuthenticatedUser;
use joinin::entity::session::{Category, CreateSession, Venue};
use joinin::store::SessionStore;

/// How a scripted generator behaves.
#[derive(Debug, Clone)]
pub enum GeneratorScript {
    /// Resolve with this text.
    Reply(String),
    /// Fail with an external-service error.
    Fail,
    /// Never resolve (forces the injector's timeout path).
    Hang,
}

/// Test double for the external icebreaker generator.
pub struct ScriptedGenerator {
    script: GeneratorScript,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(script: GeneratorScript) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times the engine asked for a generation.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IcebreakerGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _activity: &str,
        _category: Category,
    ) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            GeneratorScript::Reply(text) => Ok(text.clone()),
            GeneratorScript::Fail => Err(AppError::external_service("scripted failure")),
            GeneratorScript::Hang => {
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
                unreachable!("hang script outlives every test timeout")
            }
        }
    }
}

/// An engine over a fresh in-memory store with a scripted generator.
pub struct TestApp {
    pub engine: JoinInEngine,
    pub store: SessionStore,
    pub generator: Arc<ScriptedGenerator>,
}

impl TestApp {
    /// Engine whose generator replies instantly.
    pub fn new() -> Self {
        Self::with_script(GeneratorScript::Reply("✨ scripted icebreaker".to_string()))
    }

    /// Engine with a specific generator script. The injector timeout is
    /// kept short so hang scripts resolve quickly.
    pub fn with_script(script: GeneratorScript) -> Self {
        let mut config = AppConfig::default();
        config.icebreaker.timeout_ms = 100;

        let store = SessionStore::new(config.store.clone());
        let generator = Arc::new(ScriptedGenerator::new(script));
        let engine = JoinInEngine::new(store.clone(), generator.clone(), &config);
        Self {
            engine,
            store,
            generator,
        }
    }
}

/// A fresh authenticated user, as handed over by the identity provider.
pub fn test_user(name: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(),
        display_name: name.to_string(),
        avatar_url: Some(format!("https://avatars.test/{name}.png")),
    }
}

/// A one-hour session request looking for `looking_for` others.
pub fn create_request(host: &AuthenticatedUser, looking_for: u32) -> CreateSession {
    CreateSession {
        host: host.clone(),
        activity: "Debugging Python code".to_string(),
        category: Category::Coding,
        venue: Venue::Library,
        looking_for,
        duration: Duration::hours(1),
    }
}
