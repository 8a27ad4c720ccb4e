use axum::extract::Path;
use chrono::Duration;

use crate::handlers::require_path_id;
use crate::middleware::{ApiResult, IntoApiResponse};
use crate::models::{UploadJob, UploadJobStatus};

use super::sample_job;

/// GET /api/v1/jobs/:id - job status (sample record)
pub async fn job_get(Path(job_id): Path<String>) -> ApiResult<UploadJob> {
    let job_id = require_path_id(&job_id, "job")?;

    let job = sample_job(
        job_id,
        "dev_001",
        "audio_sample.wav",
        1_024_000,
        UploadJobStatus::Pending,
        Duration::zero(),
        Duration::zero(),
    );

    Ok(job.into_api_response())
}
