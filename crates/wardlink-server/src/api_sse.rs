//! SSE notification stream handler.

use crate::AppState;
use axum::{
    extract::{Extension, Path},
    response::{
        sse::{Event, KeepAlive},
        Sse,
    },
};
use futures_util::Stream;
use std::{convert::Infallible, sync::Arc};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

/// Handler for `GET /events/batch/{name}`.
///
/// Opens the long-lived notification stream for the operator named in the
/// path. Re-connecting with the same name supersedes the previous stream:
/// the hub closes the old channel and this handler's stream becomes the sole
/// delivery target. The response ends when the channel is closed or removed.
pub async fn batch_stream_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(name): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::info!(subscriber = %name, "batch notification stream connected");

    let rx = state.hub.subscribe(&name).await;
    let stream =
        ReceiverStream::new(rx).map(|payload| Ok::<_, Infallible>(Event::default().data(payload)));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
