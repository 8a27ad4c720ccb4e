mod common;

use axum::http::StatusCode;
use common::*;

async fn upload(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> TestResponse {
    let body = multipart_body(fields, file);
    send(
        app_without_storage(),
        post_raw("/api/v1/detection/upload", &multipart_content_type(), body),
    )
    .await
}

#[tokio::test]
async fn upload_accepts_audio_clip() {
    let audio = vec![7_u8; 2048];
    let res = upload(
        &[("device_id", "dev_001"), ("audio_type", "wav"), ("timestamp", "1700000000")],
        Some(("audio_file", "clip.wav", audio.as_slice())),
    )
    .await;

    let data = assert_success(&res);
    assert!(data["task_id"].as_str().unwrap().starts_with("task_"));
    assert_eq!(data["device_id"], "dev_001");
    assert_eq!(data["file_name"], "clip.wav");
    assert_eq!(data["file_size"], 2048);
    assert_eq!(data["timestamp"], 1_700_000_000_i64);
    assert!(data["upload_time"].is_string());
}

#[tokio::test]
async fn upload_requires_device_and_type() {
    let res = upload(&[("audio_type", "wav")], Some(("audio_file", "clip.wav", b"RIFF".as_slice()))).await;
    assert_error(
        &res,
        StatusCode::BAD_REQUEST,
        "invalid request parameters: field 'device_id' is required",
    );

    let res = upload(&[("device_id", "dev_001")], Some(("audio_file", "clip.wav", b"RIFF".as_slice()))).await;
    assert_error(
        &res,
        StatusCode::BAD_REQUEST,
        "invalid request parameters: field 'audio_type' is required",
    );
}

#[tokio::test]
async fn upload_rejects_unsupported_type() {
    let res = upload(
        &[("device_id", "dev_001"), ("audio_type", "ogg")],
        Some(("audio_file", "clip.ogg", b"OggS".as_slice())),
    )
    .await;
    assert_error(&res, StatusCode::BAD_REQUEST, "unsupported file type: ogg");
}

#[tokio::test]
async fn upload_requires_a_non_empty_file() {
    let res = upload(&[("device_id", "dev_001"), ("audio_type", "wav")], None).await;
    assert_error(
        &res,
        StatusCode::BAD_REQUEST,
        "audio file upload failed: missing field 'audio_file'",
    );

    let res = upload(
        &[("device_id", "dev_001"), ("audio_type", "wav")],
        Some(("audio_file", "clip.wav", b"".as_slice())),
    )
    .await;
    assert_error(&res, StatusCode::BAD_REQUEST, "audio file upload failed: audio file is empty");
}

#[tokio::test]
async fn upload_rejects_bad_timestamp() {
    let res = upload(
        &[("device_id", "dev_001"), ("audio_type", "wav"), ("timestamp", "yesterday")],
        Some(("audio_file", "clip.wav", b"RIFF".as_slice())),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_needs_multipart() {
    let res = send(
        app_without_storage(),
        post_raw("/api/v1/detection/upload", "application/json", "{}"),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["message"]
        .as_str()
        .unwrap()
        .starts_with("invalid request parameters"));
}

#[tokio::test]
async fn result_and_status_are_canned() {
    let res = send(app_without_storage(), get("/api/v1/detection/result/task_42")).await;
    let data = assert_success(&res);
    assert_eq!(data["task_id"], "task_42");
    assert_eq!(data["status"], "completed");
    assert_eq!(data["confidence"], 0.85);
    assert_eq!(data["details"]["pest_type"], "longhorn beetle");

    let res = send(app_without_storage(), get("/api/v1/detection/status/task_42")).await;
    let data = assert_success(&res);
    assert_eq!(data["status"], "processing");
    assert_eq!(data["progress"], 75);

    let res = send(app_without_storage(), get("/api/v1/detection/result/%20")).await;
    assert_error(&res, StatusCode::BAD_REQUEST, "task id must not be empty");
}

#[tokio::test]
async fn upload_stops_at_the_configured_size_limit() {
    let mut config = test_config();
    config.upload.max_file_size = 1024;

    let audio = vec![1_u8; 64 * 1024];
    let body = multipart_body(
        &[("device_id", "dev_001"), ("audio_type", "wav")],
        Some(("audio_file", "clip.wav", audio.as_slice())),
    );
    let res = send(
        test_app(config.clone(), None),
        post_raw("/api/v1/detection/upload", &multipart_content_type(), body),
    )
    .await;
    assert_error(&res, StatusCode::BAD_REQUEST, "audio file upload failed: file size exceeds limit");

    let audio = vec![1_u8; 1024];
    let body = multipart_body(
        &[("device_id", "dev_001"), ("audio_type", "wav")],
        Some(("audio_file", "clip.wav", audio.as_slice())),
    );
    let res = send(
        test_app(config, None),
        post_raw("/api/v1/detection/upload", &multipart_content_type(), body),
    )
    .await;
    assert_eq!(assert_success(&res)["file_size"], 1024);
}
