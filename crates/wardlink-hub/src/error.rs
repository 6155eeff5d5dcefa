//! Error types for the notification hub.

/// Errors that can occur while pushing an event down a subscriber channel.
///
/// These never cross the publish boundary: the hub absorbs them, closes the
/// offending channel, and logs the cause. They exist so the write path can
/// distinguish a full buffer from a gone receiver in its diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// The channel was closed before the write was attempted.
    #[error("channel is closed")]
    Closed,

    /// The subscriber's buffer is full; the client is not draining its stream.
    #[error("subscriber buffer is full")]
    Backpressure,

    /// The subscriber's receiving side is gone (client disconnected).
    #[error("subscriber disconnected")]
    Disconnected,
}
