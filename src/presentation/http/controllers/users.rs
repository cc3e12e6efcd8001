use crate::application::dto::StaffMemberDto;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};

#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Staff ordered by name.", body = [StaffMemberDto]),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn list_staff(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<StaffMemberDto>>> {
    state
        .services
        .user_queries
        .list_staff(&user)
        .await
        .into_http()
        .map(Json)
}
