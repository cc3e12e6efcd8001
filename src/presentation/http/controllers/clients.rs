use super::ConfirmParams;
use crate::application::{
    commands::clients::{ClientFields, CreateClientCommand, DeleteClientCommand, UpdateClientCommand},
    dto::ClientDto,
};
use crate::domain::events::Collection;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::live::{LiveResponse, snapshot_sse};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ClientRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<ClientRequest> for ClientFields {
    fn from(value: ClientRequest) -> Self {
        Self {
            name: value.name,
            contact_person: value.contact_person,
            email: value.email,
            phone: value.phone,
            notes: value.notes,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/clients",
    responses(
        (status = 200, description = "Client roster ordered by name.", body = [ClientDto]),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Clients"
)]
pub async fn list_clients(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<ClientDto>>> {
    state
        .services
        .client_queries
        .list_clients(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/live",
    responses(
        (status = 200, description = "`snapshot` events carrying the roster on every client change.", content_type = "text/event-stream", body = [ClientDto]),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Clients"
)]
pub async fn live_clients(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<LiveResponse> {
    let limits = state.stream_limits(&user);
    let services = Arc::clone(&state.services);
    let user = Arc::new(user);
    snapshot_sse(state.services.change_feed(), Collection::Clients, limits, move || {
        let services = Arc::clone(&services);
        let user = Arc::clone(&user);
        async move { services.client_queries.list_clients(&user).await }
    })
    .await
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}",
    params(("id" = i64, Path, description = "Client identifier")),
    responses(
        (status = 200, description = "The client.", body = ClientDto),
        (status = 404, description = "Not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Clients"
)]
pub async fn get_client(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ClientDto>> {
    state
        .services
        .client_queries
        .get_client(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/clients",
    request_body = ClientRequest,
    responses(
        (status = 201, description = "Client created.", body = ClientDto),
        (status = 400, description = "Client name is required.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Clients"
)]
pub async fn create_client(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<ClientRequest>,
) -> HttpResult<(StatusCode, Json<ClientDto>)> {
    let command = CreateClientCommand {
        fields: payload.into(),
    };

    state
        .services
        .client_commands
        .create_client(&user, command)
        .await
        .into_http()
        .map(|client| (StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    put,
    path = "/api/v1/clients/{id}",
    params(("id" = i64, Path, description = "Client identifier")),
    request_body = ClientRequest,
    responses(
        (status = 200, description = "Client updated.", body = ClientDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Clients"
)]
pub async fn update_client(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<ClientRequest>,
) -> HttpResult<Json<ClientDto>> {
    let command = UpdateClientCommand {
        id,
        fields: payload.into(),
    };

    state
        .services
        .client_commands
        .update_client(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/clients/{id}",
    params(("id" = i64, Path, description = "Client identifier"), ConfirmParams),
    responses(
        (status = 204, description = "Client deleted."),
        (status = 400, description = "Deletion not confirmed.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Clients"
)]
pub async fn delete_client(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Query(params): Query<ConfirmParams>,
) -> HttpResult<StatusCode> {
    let command = DeleteClientCommand {
        id,
        confirmed: params.confirm,
    };

    state
        .services
        .client_commands
        .delete_client(&user, command)
        .await
        .into_http()
        .map(|_| StatusCode::NO_CONTENT)
}
