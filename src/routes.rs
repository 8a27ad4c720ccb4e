use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, health};
use crate::middleware::{
    cors_middleware, jwt_auth_middleware, propagate_request_id_layer, recovery_layer, request_logger_middleware,
    request_timeout_middleware, set_request_id_layer, timing_middleware,
};
use crate::state::AppState;

/// Headroom for multipart boundaries and text fields on top of the file itself
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        // Public
        .route("/health", get(health::health))
        .merge(auth_routes())
        // Protected (JWT only when security.require_auth is set)
        .merge(protect(detection_routes(&state), &state))
        .merge(protect(job_routes(), &state))
        .merge(protect(device_routes(), &state));

    let routes = Router::new()
        .route("/", get(health::root))
        .nest("/api/v1", api)
        .fallback(health::not_found);

    with_middleware(routes, state)
}

/// Global middleware, innermost first. Recovery sits inside CORS, timing and
/// request id so a recovered 500 still carries their headers.
pub fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(middleware::from_fn_with_state(state.clone(), request_timeout_middleware))
        .layer(recovery_layer())
        .layer(middleware::from_fn_with_state(state.clone(), cors_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), timing_middleware))
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
        .layer(middleware::from_fn(request_logger_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn protect(routes: Router<AppState>, state: &AppState) -> Router<AppState> {
    if state.config.security.require_auth {
        routes.route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware))
    } else {
        routes
    }
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/auth/login", post(auth::login_post))
        .route("/auth/register", post(auth::register_post))
        .route("/auth/verify", get(auth::verify_get))
}

fn detection_routes(state: &AppState) -> Router<AppState> {
    use handlers::detection;

    let max_file_size = usize::try_from(state.config.upload.max_file_size).unwrap_or(0);
    let body_limit = max_file_size.max(crate::config::DEFAULT_MAX_FILE_SIZE as usize) + MULTIPART_OVERHEAD;

    Router::new()
        .route(
            "/detection/upload",
            post(detection::upload_post).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/detection/result/:id", get(detection::result_get))
        .route("/detection/status/:id", get(detection::status_get))
}

fn job_routes() -> Router<AppState> {
    use handlers::jobs;

    Router::new()
        .route("/jobs", post(jobs::create_post).get(jobs::list_get))
        .route("/jobs/:id", get(jobs::job_get).delete(jobs::job_delete))
        .route("/jobs/:id/complete", post(jobs::complete_post))
}

fn device_routes() -> Router<AppState> {
    use handlers::device;

    Router::new()
        .route("/device/list", get(device::list_get))
        .route("/device/register", post(device::register_post))
        .route("/device/:id", get(device::info_get))
}
