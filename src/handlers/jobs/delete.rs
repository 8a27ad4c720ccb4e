use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::handlers::require_path_id;
use crate::middleware::{ApiResult, IntoApiResponse};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DeleteJobQuery {
    /// Object key of the uploaded file, removed from the bucket when given
    pub key: Option<String>,
}

/// DELETE /api/v1/jobs/:id - drop a job and optionally its uploaded object
pub async fn job_delete(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Query(query): Query<DeleteJobQuery>,
) -> ApiResult<Value> {
    let job_id = require_path_id(&job_id, "job")?;

    let key = query.key.as_deref().map(str::trim).filter(|k| !k.is_empty());
    if let Some(key) = key {
        let storage = state.storage()?;
        storage.delete_file(&state.config.storage.bucket, key).await?;
        tracing::info!("Deleted object {} for job {}", key, job_id);
    }

    Ok(json!({
        "message": "job deleted",
        "job_id": job_id,
        "file_deleted": key.is_some(),
    })
    .into_api_response())
}
