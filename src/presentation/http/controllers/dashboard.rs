use crate::application::dto::DashboardDto;
use crate::domain::events::Collection;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::live::{LiveResponse, snapshot_sse};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Counts and recent activity.", body = DashboardDto),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Dashboard"
)]
pub async fn summary(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<DashboardDto>> {
    state
        .services
        .dashboard_queries
        .summary(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/live",
    responses(
        (status = 200, description = "`snapshot` events carrying a DashboardDto on every activity change.", content_type = "text/event-stream", body = DashboardDto),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Dashboard"
)]
pub async fn live_summary(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<LiveResponse> {
    let limits = state.stream_limits(&user);
    let services = Arc::clone(&state.services);
    let user = Arc::new(user);
    snapshot_sse(
        state.services.change_feed(),
        Collection::Activities,
        limits,
        move || {
            let services = Arc::clone(&services);
            let user = Arc::clone(&user);
            async move { services.dashboard_queries.summary(&user).await }
        },
    )
    .await
}
