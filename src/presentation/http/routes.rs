// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{activities, auth, clients, dashboard, users},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        layer.allow_origin(Any).allow_headers(Any)
    } else {
        layer
            .allow_origin(AllowOrigin::list(origins))
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
    }
}

/// An empty origin list allows any origin.
pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/me", get(auth::profile))
        .route("/api/v1/users", get(users::list_staff))
        .route(
            "/api/v1/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route("/api/v1/clients/live", get(clients::live_clients))
        .route(
            "/api/v1/clients/{id}",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route(
            "/api/v1/activities",
            get(activities::list_activities).post(activities::log_activity),
        )
        .route("/api/v1/activities/live", get(activities::live_activities))
        .route(
            "/api/v1/activities/presets/{preset}",
            get(activities::resolve_preset),
        )
        .route(
            "/api/v1/activities/{id}",
            get(activities::get_activity)
                .put(activities::update_activity)
                .delete(activities::delete_activity),
        )
        .route("/api/v1/dashboard", get(dashboard::summary))
        .route("/api/v1/dashboard/live", get(dashboard::live_summary))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
