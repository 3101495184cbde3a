//! Session store configuration.

use serde::{Deserialize, Serialize};

/// Session store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Buffer size for the per-feed broadcast channels. A subscriber that
    /// falls further behind than this simply skips to the latest snapshot.
    #[serde(default = "default_feed_buffer")]
    pub feed_buffer_size: usize,
    /// Buffer size for the store-wide event channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            feed_buffer_size: default_feed_buffer(),
            event_buffer_size: default_event_buffer(),
        }
    }
}

fn default_feed_buffer() -> usize {
    64
}

fn default_event_buffer() -> usize {
    256
}
