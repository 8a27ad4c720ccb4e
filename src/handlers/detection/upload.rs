use axum::extract::{multipart::MultipartRejection, Multipart, State};
use chrono::Utc;
use serde_json::{json, Value};

use crate::api::format::now_display;
use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{AudioFile, AudioUploadForm};
use crate::services::upload::{validate_file_size, validate_file_type};
use crate::state::AppState;
use crate::validation::{invalid_params, Validate};

/// POST /api/v1/detection/upload - accept an audio clip for detection
///
/// Multipart fields: `device_id`, `audio_type`, optional `timestamp`, and the
/// file part `audio_file`.
pub async fn upload_post(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Value> {
    let mut multipart = multipart.map_err(|rejection| invalid_params(rejection.body_text()))?;
    let form = read_form(&mut multipart, max_upload_size(state.config.upload.max_file_size)).await?;
    form.validate()?;

    if !validate_file_type(&form.audio_type, &state.config.upload.allowed_types) {
        return Err(ApiError::bad_request(format!("unsupported file type: {}", form.audio_type)));
    }

    let audio = form
        .audio_file
        .ok_or_else(|| upload_failed("missing field 'audio_file'"))?;
    if audio.size == 0 {
        return Err(upload_failed("audio file is empty"));
    }
    if !validate_file_size(audio.size as i64, state.config.upload.max_file_size) {
        return Err(upload_failed("file size exceeds limit"));
    }

    let task_id = format!("task_{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());

    // TODO: hand the clip to the detection queue once the Kafka producer lands
    tracing::info!(
        "Accepted audio upload {} from device {} ({} bytes)",
        task_id,
        form.device_id,
        audio.size
    );

    Ok(ApiResponse::success(json!({
        "message": "audio uploaded",
        "task_id": task_id,
        "device_id": form.device_id,
        "audio_type": form.audio_type,
        "timestamp": form.timestamp,
        "file_name": audio.file_name,
        "file_size": audio.size,
        "upload_time": now_display(),
    })))
}

/// Effective per-file limit; non-positive config values mean the default
fn max_upload_size(configured: i64) -> usize {
    let limit = if configured <= 0 { DEFAULT_MAX_FILE_SIZE } else { configured };
    usize::try_from(limit).unwrap_or(usize::MAX)
}

/// Reads the form fields. The audio part is streamed and only its size is kept;
/// reading stops as soon as it passes `max_file_size`.
async fn read_form(multipart: &mut Multipart, max_file_size: usize) -> Result<AudioUploadForm, ApiError> {
    let mut form = AudioUploadForm::default();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(upload_failed)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "device_id" => form.device_id = field.text().await.map_err(invalid_params)?,
            "audio_type" => form.audio_type = field.text().await.map_err(invalid_params)?,
            "timestamp" => {
                let raw = field.text().await.map_err(invalid_params)?;
                let raw = raw.trim();
                if !raw.is_empty() {
                    let ts = raw
                        .parse::<i64>()
                        .map_err(|_| invalid_params(format!("field 'timestamp' must be an integer, got '{}'", raw)))?;
                    form.timestamp = Some(ts);
                }
            }
            "audio_file" => {
                let file_name = field.file_name().map(|s| s.to_string());
                let mut size = 0usize;
                while let Some(chunk) = field.chunk().await.map_err(upload_failed)? {
                    size += chunk.len();
                    if size > max_file_size {
                        return Err(upload_failed("file size exceeds limit"));
                    }
                }
                form.audio_file = Some(AudioFile { file_name, size });
            }
            _ => {}
        }
    }

    Ok(form)
}

fn upload_failed(reason: impl std::fmt::Display) -> ApiError {
    ApiError::bad_request(format!("audio file upload failed: {}", reason))
}
