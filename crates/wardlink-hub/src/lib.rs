//! Notification hub for batch-completion push delivery.
//!
//! When an operator triggers a long-running batch report job, they keep a
//! streaming connection open and expect a push notification the moment the
//! job finishes. This crate implements the server-side hub behind that:
//! a concurrent registry mapping each subscriber name to at most one live
//! outbound [`Channel`], and a [`NotificationHub::publish`] entry point the
//! batch runner calls with one [`BatchCompletion`] per finished job.
//!
//! Delivery is best-effort and strictly in-memory:
//!
//! - a completion published while nobody is connected is dropped, not queued;
//! - a re-connect for the same name supersedes (and closes) the previous
//!   stream, so each name has at most one live channel at any instant;
//! - a failed write is treated as proof the connection is dead: the channel
//!   is closed and its entry removed, and the caller is never handed the
//!   failure — the correct recovery is the client reconnecting.
//!
//! The hub holds no global lock across an operation; only individual map
//! accesses are serialised, so traffic for different subscribers never
//! contends.

mod channel;
mod error;
mod event;
mod registry;

pub use channel::Channel;
pub use error::HubError;
pub use event::{encode, BatchCompletion, BatchNotice, JobKind};
pub use registry::NotificationHub;
