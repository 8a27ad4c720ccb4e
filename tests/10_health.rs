mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn health_reports_storage_availability() {
    let (app, _) = app_with_storage();
    let res = send(app, get("/api/v1/health")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    assert_eq!(res.body["message"], "pest detection server is running");
    assert_eq!(res.body["storage"], "available");
    assert!(res.body["time"].is_string());
    // Plain body, no envelope
    assert!(res.body.get("code").is_none());

    let res = send(app_without_storage(), get("/api/v1/health")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["storage"], "unavailable");
}

#[tokio::test]
async fn root_describes_the_service() {
    let res = send(app_without_storage(), get("/")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Pest Detection API");
    assert_eq!(res.body["version"], env!("CARGO_PKG_VERSION"));
    assert!(res.body["endpoints"]["jobs"].is_string());
}

#[tokio::test]
async fn unknown_routes_get_404_envelope() {
    let res = send(app_without_storage(), get("/api/v1/nope")).await;
    assert_error(&res, StatusCode::NOT_FOUND, "resource not found");

    let res = send(app_without_storage(), get("/definitely/not/here")).await;
    assert_error(&res, StatusCode::NOT_FOUND, "resource not found");
}
