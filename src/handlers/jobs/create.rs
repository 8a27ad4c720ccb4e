use std::collections::HashMap;
use std::time::Duration as StdDuration;

use axum::{extract::State, Extension};
use chrono::{Duration, Utc};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{CreateUploadJobRequest, CreateUploadJobResponse, UploadJobStatus};
use crate::services::upload::{generate_job_id, generate_storage_key, validate_file_size, validate_file_type};
use crate::services::PresignedUrlParams;
use crate::state::AppState;
use crate::validation::ValidJson;

/// POST /api/v1/jobs - register an upload and hand back a presigned PUT URL
pub async fn create_post(
    State(state): State<AppState>,
    auth_user: Option<Extension<AuthUser>>,
    ValidJson(req): ValidJson<CreateUploadJobRequest>,
) -> ApiResult<CreateUploadJobResponse> {
    let upload_config = &state.config.upload;

    if !validate_file_type(&req.file_type, &upload_config.allowed_types) {
        return Err(ApiError::bad_request(format!("unsupported file type: {}", req.file_type)));
    }

    if !validate_file_size(req.file_size, upload_config.max_file_size) {
        return Err(ApiError::bad_request("file size exceeds limit"));
    }

    let storage = state.storage()?;
    let storage_config = &state.config.storage;

    let job_id = generate_job_id();
    let key = generate_storage_key(&req.device_id, &req.file_name);
    let now = Utc::now();
    let ttl_secs = (storage_config.expire_hours * 3600) as i64;

    let mut metadata = HashMap::from([
        ("device_id".to_string(), req.device_id.clone()),
        ("job_id".to_string(), job_id.clone()),
        ("file_type".to_string(), req.file_type.clone()),
        ("description".to_string(), req.description.clone()),
        ("upload_time".to_string(), now.to_rfc3339()),
    ]);
    if let Some(Extension(user)) = &auth_user {
        metadata.insert("user_id".to_string(), user.user_id.clone());
    }

    let upload_url = storage
        .generate_presigned_upload_url(PresignedUrlParams {
            bucket: storage_config.bucket.clone(),
            key: key.clone(),
            method: "PUT".to_string(),
            expires: Some(StdDuration::from_secs(ttl_secs as u64)),
            content_type: req.content_type.clone(),
            metadata,
        })
        .await?;

    // TODO: persist the job once the MySQL job table exists
    tracing::info!("Created upload job {} for device {} -> {}", job_id, req.device_id, key);

    Ok(ApiResponse::success(CreateUploadJobResponse {
        job_id,
        upload_url,
        bucket: storage_config.bucket.clone(),
        key,
        ttl: ttl_secs,
        expires_at: now + Duration::seconds(ttl_secs),
        content_type: req.content_type,
        max_file_size: req.file_size,
        required_fields: vec!["file".to_string()],
        status: UploadJobStatus::Pending,
        created_at: now,
    }))
}
