//! # joinin-store
//!
//! In-memory hierarchical document store for JoinIn sessions. Provides:
//!
//! - Session CRUD with each session exclusively owning its participant and
//!   chat-message children (cascade delete is a single atomic removal)
//! - Equality/expiry query filters with ascending `expires_at` ordering
//! - Realtime full-snapshot feeds for listings, rosters, and chat logs
//! - A versioned conditional admission transaction so concurrent joins
//!   racing for the last slot cannot both commit

pub mod document;
pub mod feed;
pub mod filter;
pub mod store;

pub use feed::FeedSubscription;
pub use filter::SessionFilter;
pub use store::{AdmissionTxn, CommitError, ListingSubscription, SessionStore};
