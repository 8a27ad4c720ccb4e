#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use pest_detection_api::{
    app,
    auth::{generate_jwt, Claims},
    config::AppConfig,
    services::{FileInfo, PresignedUrlParams, StorageError, StorageService},
    AppState,
};

pub const MULTIPART_BOUNDARY: &str = "pest-boundary-7MA4YWxkTrZu0gW";

/// In-memory stand-in for the S3 service that records every call
#[derive(Default)]
pub struct MockStorage {
    pub presigned: Mutex<Vec<PresignedUrlParams>>,
    pub deleted: Mutex<Vec<(String, String)>>,
    pub lookups: Mutex<Vec<(String, String)>>,
    pub object_missing: bool,
    pub lookup_fails: bool,
}

impl MockStorage {
    pub fn missing_objects() -> Self {
        Self {
            object_missing: true,
            ..Self::default()
        }
    }

    pub fn failing_lookups() -> Self {
        Self {
            lookup_fails: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl StorageService for MockStorage {
    async fn generate_presigned_upload_url(&self, params: PresignedUrlParams) -> Result<String, StorageError> {
        let url = format!(
            "http://storage.test/{}/{}?X-Amz-Expires={}",
            params.bucket,
            params.key,
            params.expires.map(|d| d.as_secs()).unwrap_or_default()
        );
        self.presigned.lock().unwrap().push(params);
        Ok(url)
    }

    async fn file_info(&self, bucket: &str, key: &str) -> Result<Option<FileInfo>, StorageError> {
        self.lookups.lock().unwrap().push((bucket.to_string(), key.to_string()));
        if self.lookup_fails {
            return Err(StorageError::Request("connection refused".to_string()));
        }
        if self.object_missing {
            return Ok(None);
        }
        Ok(Some(FileInfo {
            key: key.to_string(),
            size: 1024,
            etag: "\"abc\"".to_string(),
            content_type: "audio/wav".to_string(),
            last_modified: None,
            metadata: Default::default(),
        }))
    }

    async fn delete_file(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.deleted.lock().unwrap().push((bucket.to_string(), key.to_string()));
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.jwt.secret_key = "integration-test-secret".to_string();
    config
}

pub fn test_app(config: AppConfig, storage: Option<Arc<MockStorage>>) -> Router {
    let storage = storage.map(|s| s as Arc<dyn StorageService>);
    app(AppState::new(config, storage))
}

/// Router with a fresh mock storage, which is handed back for assertions
pub fn app_with_storage() -> (Router, Arc<MockStorage>) {
    let storage = Arc::new(MockStorage::default());
    (test_app(test_config(), Some(storage.clone())), storage)
}

pub fn app_without_storage() -> Router {
    test_app(test_config(), None)
}

pub fn app_requiring_auth() -> Router {
    let mut config = test_config();
    config.security.require_auth = true;
    test_app(config, Some(Arc::new(MockStorage::default())))
}

pub fn bearer_token(config: &AppConfig, username: &str) -> String {
    let claims = Claims::for_user(username, &config.jwt);
    generate_jwt(&claims, &config.jwt).unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

/// Drive one request through the router in-process
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse { status, headers, body }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_raw(uri: &str, content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(body.into())
        .unwrap()
}

/// Hand-built multipart body: text fields plus an optional file part
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                MULTIPART_BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((name, file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                MULTIPART_BOUNDARY, name, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY)
}

pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status, status, "body: {}", response.body);
    assert_eq!(response.body["code"], status.as_u16());
    assert_eq!(response.body["message"], message);
    assert!(response.body["time"].is_string());
    assert!(response.body.get("data").is_none());
}

pub fn assert_success(response: &TestResponse) -> &Value {
    assert_eq!(response.status, StatusCode::OK, "body: {}", response.body);
    assert_eq!(response.body["code"], 200);
    assert_eq!(response.body["message"], "operation successful");
    assert!(response.body["time"].is_string());
    &response.body["data"]
}

/// The compiled server binary on a free port, killed on drop
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_pest-detection-api"))
            .env("SERVER_HOST", "127.0.0.1")
            .env("SERVER_PORT", port.to_string())
            .env("STORAGE_VERIFY_ON_START", "false")
            .env("APP_ENV", "development")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        let url = format!("{}/api/v1/health", self.base_url);
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
