//! Full-snapshot realtime feeds.
//!
//! A [`Feed`] fans a stream of full snapshots out to any number of
//! subscribers over a `tokio::sync::broadcast` channel. Every delivery is
//! a complete replacement of the subscriber's view, which makes broadcast
//! lag harmless: a later snapshot subsumes any skipped ones, so a slow
//! subscriber converges instead of missing data.

use std::sync::Arc;

use futures::Stream;
use tokio::sync::broadcast;

/// Publisher side of a snapshot feed.
#[derive(Debug)]
pub(crate) struct Feed<T> {
    tx: broadcast::Sender<Arc<T>>,
}

impl<T: Send + Sync + 'static> Feed<T> {
    /// Create a feed with the given per-subscriber buffer.
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer);
        Self { tx }
    }

    /// Publish a new full snapshot. A feed with no subscribers drops it.
    pub fn publish(&self, snapshot: T) {
        let _ = self.tx.send(Arc::new(snapshot));
    }

    /// Register a subscriber whose first delivery is `initial`.
    pub fn subscribe(&self, initial: T) -> FeedSubscription<T> {
        FeedSubscription {
            initial: Some(Arc::new(initial)),
            rx: self.tx.subscribe(),
        }
    }
}

/// Subscriber side of a snapshot feed.
///
/// Dropping the subscription unsubscribes; no further deliveries occur and
/// dropping twice is trivially a no-op.
#[derive(Debug)]
pub struct FeedSubscription<T> {
    initial: Option<Arc<T>>,
    rx: broadcast::Receiver<Arc<T>>,
}

impl<T: Send + Sync + Clone + 'static> FeedSubscription<T> {
    /// Wait for the next snapshot.
    ///
    /// The first call resolves immediately with the snapshot taken at
    /// subscribe time. Returns `None` once the feed is closed (the owning
    /// entity was deleted); after that every call returns `None`.
    pub async fn next(&mut self) -> Option<Arc<T>> {
        if let Some(first) = self.initial.take() {
            return Some(first);
        }
        loop {
            match self.rx.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "feed subscriber lagged; skipping to latest snapshot");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Adapt the subscription into a [`Stream`] of snapshots.
    pub fn into_stream(self) -> impl Stream<Item = Arc<T>> {
        futures::stream::unfold(self, |mut sub| async move {
            sub.next().await.map(|snapshot| (snapshot, sub))
        })
    }
}
