use super::ConfirmParams;
use crate::application::{
    commands::activities::{
        ActivityForm, DeleteActivityCommand, LogActivityCommand, UpdateActivityCommand,
    },
    dto::{ActivityDto, ActivityListDto, DateRangeDto, serde_time},
    queries::activities::ListActivitiesQuery,
};
use crate::domain::activity::{
    ActivityStatus, ContactMethod, DateRangePreset, Direction, Priority, SortDirection, SortField,
    SortSpec,
};
use crate::domain::errors::DomainError;
use crate::domain::events::Collection;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::live::{LiveResponse, snapshot_sse};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter-bar state as query parameters. Blank values are ignored.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListActivitiesParams {
    pub client_id: Option<String>,
    /// Status label or identifier, e.g. `Open` or `needs_follow_up`.
    pub status: Option<String>,
    pub contact_method: Option<String>,
    pub assignee_id: Option<String>,
    /// Inclusive, `YYYY-MM-DD` in office time.
    pub date_from: Option<String>,
    /// Inclusive, `YYYY-MM-DD` in office time.
    pub date_to: Option<String>,
    /// Replaces `date_from` and `date_to` when present.
    pub preset: Option<String>,
    #[serde(alias = "q")]
    pub keyword: Option<String>,
    pub sort: Option<SortField>,
    pub direction: Option<SortDirection>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_choice<T>(value: Option<String>) -> HttpResult<Option<T>>
where
    T: FromStr<Err = DomainError>,
{
    present(value)
        .map(|v| v.parse::<T>())
        .transpose()
        .map_err(|err| HttpError::from_error(err.into()))
}

fn parse_id(name: &str, value: Option<String>) -> HttpResult<Option<i64>> {
    present(value)
        .map(|v| {
            v.parse::<i64>()
                .map_err(|_| HttpError::bad_request(format!("{name} must be a number")))
        })
        .transpose()
}

fn parse_date(name: &str, value: Option<String>) -> HttpResult<Option<NaiveDate>> {
    present(value)
        .map(|v| {
            NaiveDate::parse_from_str(&v, DATE_FORMAT)
                .map_err(|_| HttpError::bad_request(format!("{name} must be a YYYY-MM-DD date")))
        })
        .transpose()
}

impl TryFrom<ListActivitiesParams> for ListActivitiesQuery {
    type Error = HttpError;

    fn try_from(params: ListActivitiesParams) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: parse_id("client_id", params.client_id)?,
            status: parse_choice::<ActivityStatus>(params.status)?,
            contact_method: parse_choice::<ContactMethod>(params.contact_method)?,
            assignee_id: parse_id("assignee_id", params.assignee_id)?,
            date_from: parse_date("date_from", params.date_from)?,
            date_to: parse_date("date_to", params.date_to)?,
            preset: parse_choice::<DateRangePreset>(params.preset)?,
            keyword: params.keyword.filter(|k| !k.trim().is_empty()),
            sort: SortSpec {
                field: params.sort.unwrap_or_default(),
                direction: params.direction.unwrap_or_default(),
            },
        })
    }
}

/// Body of the log-activity and edit-activity forms.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ActivityRequest {
    /// Defaults to now on create and to the stored value on update.
    #[serde(default, with = "serde_time::option")]
    pub activity_at: Option<DateTime<Utc>>,
    pub client_id: Option<i64>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_method: Option<ContactMethod>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub action_taken: Option<String>,
    #[serde(default)]
    pub status: Option<ActivityStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default, with = "serde_time::option")]
    pub follow_up_at: Option<DateTime<Utc>>,
    pub assignee_id: Option<i64>,
}

impl From<ActivityRequest> for ActivityForm {
    fn from(value: ActivityRequest) -> Self {
        Self {
            activity_at: value.activity_at,
            client_id: value.client_id,
            contact_person: value.contact_person,
            contact_method: value.contact_method,
            direction: value.direction,
            subject: value.subject,
            details: value.details,
            action_taken: value.action_taken,
            status: value.status,
            priority: value.priority,
            follow_up_at: value.follow_up_at,
            assignee_id: value.assignee_id,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/activities",
    params(ListActivitiesParams),
    responses(
        (status = 200, description = "Filtered and sorted activity log.", body = ActivityListDto),
        (status = 400, description = "Invalid filter.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Activities"
)]
pub async fn list_activities(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<ListActivitiesParams>,
) -> HttpResult<Json<ActivityListDto>> {
    let query = ListActivitiesQuery::try_from(params)?;

    state
        .services
        .activity_queries
        .list_activities(&user, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/activities/live",
    params(ListActivitiesParams),
    responses(
        (status = 200, description = "`snapshot` events carrying the filtered log on every activity change.", content_type = "text/event-stream", body = ActivityListDto),
        (status = 400, description = "Invalid filter.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Activities"
)]
pub async fn live_activities(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<ListActivitiesParams>,
) -> HttpResult<LiveResponse> {
    let query = ListActivitiesQuery::try_from(params)?;
    let limits = state.stream_limits(&user);
    let services = Arc::clone(&state.services);
    let user = Arc::new(user);

    snapshot_sse(state.services.change_feed(), Collection::Activities, limits, move || {
        let services = Arc::clone(&services);
        let user = Arc::clone(&user);
        let query = query.clone();
        async move { services.activity_queries.list_activities(&user, query).await }
    })
    .await
}

#[utoipa::path(
    get,
    path = "/api/v1/activities/presets/{preset}",
    params(("preset" = DateRangePreset, Path, description = "Named date range")),
    responses(
        (status = 200, description = "Dates the preset resolves to today.", body = DateRangeDto),
        (status = 400, description = "Unknown preset.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Activities"
)]
pub async fn resolve_preset(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Path(preset): Path<String>,
) -> HttpResult<Json<DateRangeDto>> {
    let preset = preset
        .parse::<DateRangePreset>()
        .map_err(|err| HttpError::from_error(err.into()))?;

    state
        .services
        .activity_queries
        .resolve_preset(preset)
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/activities/{id}",
    params(("id" = i64, Path, description = "Activity identifier")),
    responses(
        (status = 200, description = "The activity.", body = ActivityDto),
        (status = 404, description = "Not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Activities"
)]
pub async fn get_activity(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ActivityDto>> {
    state
        .services
        .activity_queries
        .get_activity(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/activities",
    request_body = ActivityRequest,
    responses(
        (status = 201, description = "Activity logged.", body = ActivityDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Activities"
)]
pub async fn log_activity(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<ActivityRequest>,
) -> HttpResult<(StatusCode, Json<ActivityDto>)> {
    let command = LogActivityCommand {
        form: payload.into(),
    };

    state
        .services
        .activity_commands
        .log_activity(&user, command)
        .await
        .into_http()
        .map(|activity| (StatusCode::CREATED, Json(activity)))
}

#[utoipa::path(
    put,
    path = "/api/v1/activities/{id}",
    params(("id" = i64, Path, description = "Activity identifier")),
    request_body = ActivityRequest,
    responses(
        (status = 200, description = "Activity updated.", body = ActivityDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Activities"
)]
pub async fn update_activity(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<ActivityRequest>,
) -> HttpResult<Json<ActivityDto>> {
    let command = UpdateActivityCommand {
        id,
        form: payload.into(),
    };

    state
        .services
        .activity_commands
        .update_activity(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/activities/{id}",
    params(("id" = i64, Path, description = "Activity identifier"), ConfirmParams),
    responses(
        (status = 204, description = "Activity deleted."),
        (status = 400, description = "Deletion not confirmed.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Activities"
)]
pub async fn delete_activity(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Query(params): Query<ConfirmParams>,
) -> HttpResult<StatusCode> {
    let command = DeleteActivityCommand {
        id,
        confirmed: params.confirm,
    };

    state
        .services
        .activity_commands
        .delete_activity(&user, command)
        .await
        .into_http()
        .map(|_| StatusCode::NO_CONTENT)
}
