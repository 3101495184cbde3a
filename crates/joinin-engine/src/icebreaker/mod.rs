//! Icebreaker generation and injection.
//!
//! On every successful admission the engine posts one system-authored
//! welcome message to the session chat. The text comes from an external
//! generator when one is configured and reachable within its timeout;
//! otherwise from a deterministic per-category template that always
//! references the literal activity. This whole path is best-effort: its
//! failure never propagates to, blocks, or undoes the join.

pub mod fallback;
pub mod generator;
pub mod injector;

pub use fallback::fallback_icebreaker;
pub use generator::{GeminiGenerator, IcebreakerGenerator};
pub use injector::IcebreakerInjector;
