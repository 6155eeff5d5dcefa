//! Inbound batch-completion endpoint.

use crate::AppState;
use axum::{extract::Extension, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use wardlink_hub::{BatchCompletion, JobKind};

/// Request body posted by the batch runner once per completed job.
///
/// Field names mirror the wire payload pushed to subscribers (`seqId`,
/// `startDate`, `endDate`, `fileName`, `type`) so the runner and the client
/// share one vocabulary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCompletedRequest {
    /// The operator who triggered the job and should be notified.
    pub admin_name: String,
    pub seq_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub file_name: String,
    /// Ordinal of [`JobKind`].
    #[serde(rename = "type")]
    pub kind: u8,
}

/// Response for a processed completion.
#[derive(Debug, Serialize)]
pub struct BatchCompletedResponse {
    /// Whether a live write succeeded. Diagnostic only: the runner must not
    /// couple to notification delivery.
    pub delivered: bool,
}

/// Handler for `POST /api/batch/completed`.
///
/// Validates the fact and hands it to the hub. Always `202 Accepted` for a
/// well-formed fact, whether or not anyone was listening; delivery failures
/// are absorbed by the hub.
pub async fn batch_completed_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<BatchCompletedRequest>,
) -> Result<(StatusCode, Json<BatchCompletedResponse>), (StatusCode, Json<Value>)> {
    if req.admin_name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "adminName must not be empty" })),
        ));
    }

    let Some(kind) = JobKind::from_ordinal(req.kind) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("unknown job type ordinal {}", req.kind) })),
        ));
    };

    let fact = BatchCompletion {
        seq_id: req.seq_id,
        started_at: req.start_date,
        finished_at: req.end_date,
        file_name: req.file_name,
        kind,
    };

    let delivered = state.hub.publish(&req.admin_name, &fact).await;

    Ok((
        StatusCode::ACCEPTED,
        Json(BatchCompletedResponse { delivered }),
    ))
}
