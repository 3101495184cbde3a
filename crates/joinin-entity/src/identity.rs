//! The identity boundary.

use serde::{Deserialize, Serialize};

use joinin_core::types::id::UserId;

/// A user that the external identity provider has already authenticated.
///
/// The engine performs no authentication of its own; it consumes this as
/// an opaque identity and only ever makes authorization decisions with it
/// (host-only close).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Stable user identifier.
    pub id: UserId,
    /// Display name shown in rosters and chat.
    pub display_name: String,
    /// Avatar image URL, if the provider supplied one.
    pub avatar_url: Option<String>,
}
