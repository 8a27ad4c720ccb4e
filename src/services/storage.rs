//! Object storage access for audio uploads.
//!
//! Clients never stream audio through this API. They receive a presigned PUT
//! URL and upload straight to the bucket; the service only signs URLs and
//! inspects or removes objects afterwards.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client as S3Client;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ObjectStorageConfig;

/// Upper bound for the startup connectivity probe
const PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("presign failed: {0}")]
    Presign(String),
    #[error("storage request failed: {0}")]
    Request(String),
    #[error("storage misconfigured: {0}")]
    Configuration(String),
}

/// Parameters for a presigned upload URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignedUrlParams {
    pub bucket: String,
    pub key: String,
    /// Only PUT uploads are signed today
    pub method: String,
    /// Falls back to the configured expiry when absent
    pub expires: Option<Duration>,
    pub content_type: String,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub key: String,
    pub size: i64,
    pub etag: String,
    pub content_type: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub metadata: HashMap<String, String>,
}

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn generate_presigned_upload_url(&self, params: PresignedUrlParams) -> Result<String, StorageError>;

    /// `Ok(None)` when the object does not exist
    async fn file_info(&self, bucket: &str, key: &str) -> Result<Option<FileInfo>, StorageError>;

    async fn file_exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError> {
        Ok(self.file_info(bucket, key).await?.is_some())
    }

    async fn delete_file(&self, bucket: &str, key: &str) -> Result<(), StorageError>;

    async fn ping(&self) -> Result<(), StorageError>;
}

/// MinIO / S3 implementation backed by the AWS SDK
pub struct S3StorageService {
    config: ObjectStorageConfig,
    client: S3Client,
}

impl S3StorageService {
    /// Build a client for the configured endpoint. No network traffic happens here.
    pub fn new(config: &ObjectStorageConfig) -> Result<Self, StorageError> {
        let endpoint = config
            .endpoint_url()
            .map_err(|e| StorageError::Configuration(format!("invalid endpoint '{}': {}", config.endpoint, e)))?;

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "pest-detection-static",
        );

        // MinIO needs path-style addressing (endpoint/bucket/key)
        let s3_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(endpoint.as_str().trim_end_matches('/'))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Ok(Self {
            config: config.clone(),
            client: S3Client::from_conf(s3_config),
        })
    }

    fn default_expiry(&self) -> Duration {
        Duration::from_secs(self.config.expire_hours * 3600)
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn generate_presigned_upload_url(&self, params: PresignedUrlParams) -> Result<String, StorageError> {
        if !params.method.eq_ignore_ascii_case("PUT") {
            return Err(StorageError::Presign(format!("unsupported upload method: {}", params.method)));
        }

        let expires = params.expires.unwrap_or_else(|| self.default_expiry());
        let presigning = PresigningConfig::expires_in(expires).map_err(|e| StorageError::Presign(e.to_string()))?;

        let mut request = self
            .client
            .put_object()
            .bucket(&params.bucket)
            .key(&params.key)
            .content_type(&params.content_type);
        for (name, value) in &params.metadata {
            request = request.metadata(name, value);
        }

        let presigned = request
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }

    async fn file_info(&self, bucket: &str, key: &str) -> Result<Option<FileInfo>, StorageError> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(output) => Ok(Some(FileInfo {
                key: key.to_string(),
                size: output.content_length().unwrap_or_default(),
                etag: output.e_tag().unwrap_or_default().trim_matches('"').to_string(),
                content_type: output.content_type().unwrap_or_default().to_string(),
                last_modified: output
                    .last_modified()
                    .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
                metadata: output.metadata().cloned().unwrap_or_default(),
            })),
            Err(err) => {
                let service_error = err.into_service_error();
                if service_error.is_not_found() {
                    Ok(None)
                } else {
                    Err(StorageError::Request(service_error.to_string()))
                }
            }
        }
    }

    async fn delete_file(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.client
            .list_buckets()
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        Ok(())
    }
}

/// Build the storage service for the server. Failures are logged and the server
/// keeps running without storage; dependent endpoints then answer 503.
pub async fn init_storage_service(config: &ObjectStorageConfig) -> Option<Arc<dyn StorageService>> {
    let service = match S3StorageService::new(config) {
        Ok(service) => service,
        Err(e) => {
            tracing::warn!("Storage service initialization failed: {}", e);
            return None;
        }
    };

    if config.verify_on_start {
        match tokio::time::timeout(PING_TIMEOUT, service.ping()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!("Storage service initialization failed ({}): {}", config.endpoint, e);
                return None;
            }
            Err(_) => {
                tracing::warn!(
                    "Storage service initialization failed: {} did not answer within {:?}",
                    config.endpoint,
                    PING_TIMEOUT
                );
                return None;
            }
        }
    }

    tracing::info!("Storage service ready: {} ({})", config.endpoint, config.provider);
    Some(Arc::new(service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn params(key: &str) -> PresignedUrlParams {
        PresignedUrlParams {
            bucket: "pest-detection".to_string(),
            key: key.to_string(),
            method: "PUT".to_string(),
            expires: None,
            content_type: "audio/wav".to_string(),
            metadata: HashMap::from([("device_id".to_string(), "dev_001".to_string())]),
        }
    }

    #[tokio::test]
    async fn presigns_path_style_put_url_offline() {
        let config = AppConfig::development().storage;
        let service = S3StorageService::new(&config).unwrap();

        let url = service
            .generate_presigned_upload_url(params("dev_001/2024/01/15/08/sample_ab12cd34.wav"))
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:9000/pest-detection/dev_001/"), "{}", url);
        assert!(url.contains("X-Amz-Signature="), "{}", url);
        assert!(url.contains("X-Amz-Expires=86400"), "{}", url);
    }

    #[tokio::test]
    async fn explicit_expiry_overrides_default() {
        let config = AppConfig::development().storage;
        let service = S3StorageService::new(&config).unwrap();

        let mut p = params("dev_001/file.wav");
        p.expires = Some(Duration::from_secs(900));
        let url = service.generate_presigned_upload_url(p).await.unwrap();

        assert!(url.contains("X-Amz-Expires=900"), "{}", url);
    }

    #[tokio::test]
    async fn rejects_non_put_methods() {
        let config = AppConfig::development().storage;
        let service = S3StorageService::new(&config).unwrap();

        let mut p = params("dev_001/file.wav");
        p.method = "POST".to_string();
        assert!(matches!(
            service.generate_presigned_upload_url(p).await,
            Err(StorageError::Presign(_))
        ));
    }

    #[test]
    fn invalid_endpoint_is_a_configuration_error() {
        let mut config = AppConfig::development().storage;
        config.endpoint = "http://".to_string();
        assert!(matches!(S3StorageService::new(&config), Err(StorageError::Configuration(_))));
    }
}
