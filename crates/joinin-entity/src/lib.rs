//! # joinin-entity
//!
//! Domain entity models for JoinIn: sessions ("beacons"), participants,
//! chat messages, and the authenticated-user identity handed in by the
//! external identity provider.

pub mod chat;
pub mod identity;
pub mod participant;
pub mod session;

pub use chat::{ChatMessage, Sender};
pub use identity::AuthenticatedUser;
pub use participant::Participant;
pub use session::{Category, CreateSession, Session, SessionStatus, Venue};
