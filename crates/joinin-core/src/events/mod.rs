//! Domain events emitted by store mutations.
//!
//! Events are fanned out on the store's broadcast channel and consumed by
//! listing subscriptions and anything else that needs to react to session
//! changes.

pub mod session;

pub use session::SessionEvent;
