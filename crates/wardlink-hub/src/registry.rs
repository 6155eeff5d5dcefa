//! Subscriber registry and the publish entry point.

use crate::channel::Channel;
use crate::event::{encode, BatchCompletion};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// The notification hub: a concurrent mapping from subscriber name to its
/// one live [`Channel`].
///
/// Constructed once at service start and passed by handle to whichever
/// component needs to subscribe or publish; clones share state. All map
/// mutation happens under a brief write lock that never spans an `.await`
/// on anything but the lock itself, so operations on different subscribers
/// effectively never contend.
#[derive(Clone, Default)]
pub struct NotificationHub {
    entries: Arc<RwLock<HashMap<String, Channel>>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stream for `name` and returns its receiving side.
    ///
    /// If `name` already has a channel, it is atomically swapped out and the
    /// old channel closed exactly once, so the superseded client's stream
    /// ends. The caller owns the returned receiver and is responsible for
    /// pumping it to the client until the connection ends.
    pub async fn subscribe(&self, name: &str) -> mpsc::Receiver<String> {
        let (channel, rx) = Channel::new();

        let previous = {
            let mut entries = self.entries.write().await;
            entries.insert(name.to_string(), channel)
        };

        if let Some(old) = previous {
            if old.close() {
                tracing::info!(
                    subscriber = %name,
                    "replaced existing notification stream; closed the old one"
                );
            }
        }

        rx
    }

    /// Non-mutating read of the current channel for `name`, if any.
    pub async fn lookup(&self, name: &str) -> Option<Channel> {
        self.entries.read().await.get(name).cloned()
    }

    /// Deletes the entry for `name` only if it still holds `channel`.
    ///
    /// The identity comparison keeps a racing removal from deleting a
    /// just-replaced live entry: if a newer subscribe already swapped the
    /// channel out, this is a no-op. Returns whether the entry was removed.
    pub async fn remove(&self, name: &str, channel: &Channel) -> bool {
        let mut entries = self.entries.write().await;
        match entries.get(name) {
            Some(current) if Channel::same(current, channel) => {
                entries.remove(name);
                true
            }
            _ => false,
        }
    }

    /// Number of registered entries, live or stale. Diagnostic only.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Hands one completion fact to whichever stream is currently live for
    /// `name`. Returns whether a write succeeded; the caller must treat that
    /// as a diagnostic, never as a delivery guarantee.
    ///
    /// A fact with no connected subscriber is dropped, not queued. A stale
    /// entry (channel already closed because the client went away) is
    /// garbage-collected here. A failed write is proof the connection is
    /// dead: the channel is closed, the entry removed, and the failure
    /// logged — never surfaced to the batch runner. No retries: recovery is
    /// the client reconnecting, which supersedes the dead entry.
    pub async fn publish(&self, name: &str, fact: &BatchCompletion) -> bool {
        let Some(channel) = self.lookup(name).await else {
            tracing::debug!(
                subscriber = %name,
                seq_id = fact.seq_id,
                "no notification stream registered; dropping completion notice"
            );
            return false;
        };

        if channel.is_closed() {
            self.remove(name, &channel).await;
            tracing::debug!(
                subscriber = %name,
                seq_id = fact.seq_id,
                "removed stale notification stream; dropping completion notice"
            );
            return false;
        }

        let notice = encode(fact);
        let payload = match serde_json::to_string(&notice) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(
                    subscriber = %name,
                    seq_id = fact.seq_id,
                    "failed to serialize completion notice: {}",
                    e
                );
                return false;
            }
        };

        match channel.write(payload) {
            Ok(()) => {
                tracing::info!(
                    subscriber = %name,
                    seq_id = fact.seq_id,
                    kind = %fact.kind,
                    file = %fact.file_name,
                    "delivered batch completion notice"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    subscriber = %name,
                    seq_id = fact.seq_id,
                    "failed to push completion notice, dropping stream: {}",
                    e
                );
                channel.close();
                self.remove(name, &channel).await;
                false
            }
        }
    }
}
