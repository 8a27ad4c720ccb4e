use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validation::{require_non_empty, require_positive, Validate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUploadJobRequest {
    pub device_id: String,
    pub file_name: String,
    /// Bytes
    pub file_size: i64,
    /// wav, mp3, flac, ...
    pub file_type: String,
    /// MIME type the client will upload with
    pub content_type: String,
    #[serde(default)]
    pub description: String,
}

impl Validate for CreateUploadJobRequest {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty("device_id", &self.device_id)?;
        require_non_empty("file_name", &self.file_name)?;
        require_positive("file_size", self.file_size)?;
        require_non_empty("file_type", &self.file_type)?;
        require_non_empty("content_type", &self.content_type)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUploadJobResponse {
    pub job_id: String,
    pub upload_url: String,
    pub bucket: String,
    pub key: String,
    /// Seconds the upload URL stays valid
    pub ttl: i64,
    pub expires_at: DateTime<Utc>,
    pub content_type: String,
    pub max_file_size: i64,
    /// Form fields the client must send with the upload
    pub required_fields: Vec<String>,
    pub status: UploadJobStatus,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle labels for an upload job. Nothing transitions them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadJobStatus {
    Pending,
    Uploading,
    Completed,
    Failed,
    Expired,
}

impl UploadJobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadJobStatus::Pending => "pending",
            UploadJobStatus::Uploading => "uploading",
            UploadJobStatus::Completed => "completed",
            UploadJobStatus::Failed => "failed",
            UploadJobStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for UploadJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadJobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(UploadJobStatus::Pending),
            "uploading" => Ok(UploadJobStatus::Uploading),
            "completed" => Ok(UploadJobStatus::Completed),
            "failed" => Ok(UploadJobStatus::Failed),
            "expired" => Ok(UploadJobStatus::Expired),
            other => Err(format!("unknown job status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadJob {
    pub id: String,
    pub device_id: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub content_type: String,
    pub description: String,
    pub bucket: String,
    pub key: String,
    pub status: UploadJobStatus,
    pub upload_url: String,
    pub ttl: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of the upload-completed callback. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadCompletionNotification {
    pub job_id: String,
    pub bucket: String,
    pub key: String,
    pub etag: String,
    pub size: i64,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Query string accepted by `GET /jobs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListJobsQuery {
    pub device_id: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}
