use crate::application::{
    commands::users::{LoginUserCommand, RegisterUserCommand},
    dto::{AuthTokenDto, UserDto, UserProfileDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub user_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created.", body = UserDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Email already registered.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security([]),
    tag = "Auth"
)]
pub async fn register(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<RegisterRequest>,
) -> HttpResult<(StatusCode, Json<UserDto>)> {
    let command = RegisterUserCommand {
        email: payload.email,
        password: payload.password,
        confirm_password: payload.confirm_password,
        user_name: payload.user_name,
    };

    state
        .services
        .user_commands
        .register(command)
        .await
        .into_http()
        .map(|user| (StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token for the account.", body = LoginResponse),
        (status = 401, description = "Invalid credentials.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security([]),
    tag = "Auth"
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<LoginRequest>,
) -> HttpResult<Json<LoginResponse>> {
    let command = LoginUserCommand {
        email: payload.email,
        password: payload.password,
    };

    let result = state
        .services
        .user_commands
        .login(command)
        .await
        .into_http()?;

    Ok(Json(LoginResponse {
        token: result.token,
        user: result.user,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "The signed-in account.", body = UserProfileDto),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Auth"
)]
pub async fn profile(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<UserProfileDto>> {
    state
        .services
        .user_queries
        .get_profile(&user)
        .await
        .into_http()
        .map(Json)
}
