//! Join admission configuration.

use serde::{Deserialize, Serialize};

/// Capacity gate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionConfig {
    /// Maximum number of transaction attempts before the gate gives up
    /// and reports a transient failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff between conflicting attempts, in milliseconds. The
    /// actual delay is jittered to avoid racing callers retrying in
    /// lockstep.
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff(),
        }
    }
}

fn default_max_retries() -> u32 {
    8
}

fn default_retry_backoff() -> u64 {
    5
}
