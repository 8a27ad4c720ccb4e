use axum::extract::{rejection::QueryRejection, Query};
use chrono::Duration;

use crate::error::ApiError;
use crate::middleware::{ApiResult, IntoApiResponse};
use crate::models::{ListJobsQuery, PaginatedResponse, UploadJob, UploadJobStatus};
use crate::validation::invalid_params;

use super::sample_job;

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

/// GET /api/v1/jobs - list upload jobs, filtered by `device_id` / `status`
pub async fn list_get(query: Result<Query<ListJobsQuery>, QueryRejection>) -> ApiResult<PaginatedResponse<UploadJob>> {
    let Query(query) = query.map_err(|rejection| invalid_params(rejection.body_text()))?;

    let status = match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(raw.parse::<UploadJobStatus>().map_err(ApiError::bad_request)?),
        None => None,
    };
    let device_id = query.device_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let jobs: Vec<UploadJob> = sample_jobs()
        .into_iter()
        .filter(|job| device_id.map_or(true, |d| job.device_id == d))
        .filter(|job| status.map_or(true, |s| job.status == s))
        .collect();

    Ok(PaginatedResponse::paginate(jobs, page, page_size).into_api_response())
}

fn sample_jobs() -> Vec<UploadJob> {
    vec![
        sample_job(
            "job_abc123",
            "dev_001",
            "audio_sample.wav",
            1_024_000,
            UploadJobStatus::Completed,
            Duration::hours(1),
            Duration::minutes(30),
        ),
        sample_job(
            "job_def456",
            "dev_002",
            "audio_sample.mp3",
            2_048_000,
            UploadJobStatus::Pending,
            Duration::hours(2),
            Duration::hours(2),
        ),
    ]
}
