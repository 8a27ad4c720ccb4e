use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::require_path_id;
use crate::middleware::{ApiResult, IntoApiResponse};
use crate::models::{UploadCompletionNotification, UploadJobStatus};
use crate::state::AppState;

/// POST /api/v1/jobs/:id/complete - upload-finished callback
pub async fn complete_post(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    body: Result<Json<UploadCompletionNotification>, JsonRejection>,
) -> ApiResult<Value> {
    let job_id = require_path_id(&job_id, "job")?;
    let Json(notification) = body
        .map_err(|rejection| ApiError::bad_request(format!("invalid callback parameters: {}", rejection.body_text())))?;

    if !notification.job_id.is_empty() && notification.job_id != job_id {
        return Err(ApiError::bad_request("job id mismatch"));
    }

    if let Some(storage) = state.storage_opt() {
        if !notification.bucket.is_empty() && !notification.key.is_empty() {
            match storage.file_exists(&notification.bucket, &notification.key).await {
                Ok(true) => {}
                Ok(false) => return Err(ApiError::not_found("uploaded object not found")),
                Err(e) => tracing::warn!("Could not confirm upload for job {}: {}", job_id, e),
            }
        }
    }

    // TODO: mark the job completed and enqueue detection once jobs are persisted
    tracing::info!(
        "Upload completed for job {} ({}/{}, {} bytes, etag {})",
        job_id,
        notification.bucket,
        notification.key,
        notification.size,
        notification.etag
    );

    Ok(json!({
        "message": "upload completion processed",
        "job_id": job_id,
        "status": UploadJobStatus::Completed,
    })
    .into_api_response())
}
