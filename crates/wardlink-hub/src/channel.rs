//! One live outbound stream to a connected subscriber.

use crate::HubError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Buffer size for a subscriber channel. Completion notices are rare and
/// small; a client that falls this far behind is not draining its stream
/// and is treated as dead on the next write.
const CHANNEL_CAPACITY: usize = 16;

/// One live, unidirectional stream of encoded events to a subscriber.
///
/// A `Channel` is a cheap handle (clones share state). It is exclusively
/// referenced by its registry entry until closed; once closed it is inert
/// and never reused. Closing is idempotent: the registry's replacement path
/// and the publish-failure path may race to close the same channel, and
/// both must be safe.
#[derive(Clone)]
pub struct Channel {
    inner: Arc<ChannelInner>,
}

struct ChannelInner {
    closed: AtomicBool,
    tx: mpsc::Sender<String>,
}

impl Channel {
    /// Creates an open channel and the receiving side the transport layer
    /// pumps to the client.
    pub(crate) fn new() -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let channel = Self {
            inner: Arc::new(ChannelInner {
                closed: AtomicBool::new(false),
                tx,
            }),
        };
        (channel, rx)
    }

    /// Whether this channel can no longer deliver events.
    ///
    /// True after [`close`](Self::close), and also once the receiving side
    /// has been dropped (the client disconnected and the transport tore down
    /// its stream).
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire) || self.inner.tx.is_closed()
    }

    /// Marks the channel closed. Terminal and idempotent; returns whether
    /// this call performed the transition.
    pub(crate) fn close(&self) -> bool {
        !self.inner.closed.swap(true, Ordering::AcqRel)
    }

    /// Attempts a single non-blocking write of one encoded event.
    ///
    /// A full buffer is treated like any other transport failure: the caller
    /// closes the channel rather than retrying.
    pub(crate) fn write(&self, payload: String) -> Result<(), HubError> {
        if self.inner.closed.load(Ordering::Acquire) {
            return Err(HubError::Closed);
        }
        self.inner.tx.try_send(payload).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => HubError::Backpressure,
            mpsc::error::TrySendError::Closed(_) => HubError::Disconnected,
        })
    }

    /// Identity comparison: true when both handles refer to the same
    /// underlying channel. Used for compare-and-delete in the registry.
    pub(crate) fn same(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("closed", &self.is_closed())
            .finish()
    }
}
