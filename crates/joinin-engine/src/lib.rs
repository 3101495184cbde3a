//! # joinin-engine
//!
//! The session lifecycle and realtime coordination engine. Provides:
//!
//! - Capacity-safe join admission resolving concurrent races
//!   ([`CapacityGate`])
//! - Live participant rosters ([`PresenceRoster`])
//! - Ordered, append-only group chat ([`ChatStream`])
//! - Lazy expiry and host-only cascading close ([`LifecycleManager`])
//! - Best-effort AI icebreaker injection on join ([`IcebreakerInjector`])
//! - The [`JoinInEngine`] facade wiring them together

pub mod chat;
pub mod engine;
pub mod gate;
pub mod icebreaker;
pub mod lifecycle;
pub mod roster;

pub use chat::ChatStream;
pub use engine::JoinInEngine;
pub use gate::{CapacityGate, JoinOutcome};
pub use icebreaker::{GeminiGenerator, IcebreakerGenerator, IcebreakerInjector};
pub use lifecycle::{LifecycleManager, SessionState};
pub use roster::PresenceRoster;
