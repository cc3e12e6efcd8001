// src/presentation/http/openapi.rs
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

const LOCAL_SERVER: &str = "http://localhost:8080";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::register,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::profile,
        crate::presentation::http::controllers::users::list_staff,
        crate::presentation::http::controllers::clients::list_clients,
        crate::presentation::http::controllers::clients::live_clients,
        crate::presentation::http::controllers::clients::get_client,
        crate::presentation::http::controllers::clients::create_client,
        crate::presentation::http::controllers::clients::update_client,
        crate::presentation::http::controllers::clients::delete_client,
        crate::presentation::http::controllers::activities::list_activities,
        crate::presentation::http::controllers::activities::live_activities,
        crate::presentation::http::controllers::activities::resolve_preset,
        crate::presentation::http::controllers::activities::get_activity,
        crate::presentation::http::controllers::activities::log_activity,
        crate::presentation::http::controllers::activities::update_activity,
        crate::presentation::http::controllers::activities::delete_activity,
        crate::presentation::http::controllers::dashboard::summary,
        crate::presentation::http::controllers::dashboard::live_summary,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::RegisterRequest,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::clients::ClientRequest,
            crate::presentation::http::controllers::activities::ActivityRequest,
            crate::application::dto::UserDto,
            crate::application::dto::UserProfileDto,
            crate::application::dto::StaffMemberDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::CapabilityView,
            crate::application::dto::ClientDto,
            crate::application::dto::NamedRefDto,
            crate::application::dto::ActivityDto,
            crate::application::dto::ActivityListDto,
            crate::application::dto::DateRangeDto,
            crate::application::dto::StatusCountDto,
            crate::application::dto::DashboardDto,
            crate::domain::activity::ContactMethod,
            crate::domain::activity::Direction,
            crate::domain::activity::ActivityStatus,
            crate::domain::activity::Priority,
            crate::domain::activity::StatusTone,
            crate::domain::activity::DateRangePreset,
            crate::domain::activity::SortField,
            crate::domain::activity::SortDirection,
            crate::domain::user::Role
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and the current account"),
        (name = "Users", description = "Staff directory used for assignment"),
        (name = "Clients", description = "Client roster"),
        (name = "Activities", description = "Client activity log"),
        (name = "Dashboard", description = "Status counts and recent work"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Office Activity Tracker API",
        description = "Client activity log and roster for an accounting office",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if !urls.iter().any(|url| url == LOCAL_SERVER) {
            urls.push(LOCAL_SERVER.to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

pub fn docs_router() -> Router {
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi());
    Router::new()
        .merge(swagger)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

pub fn write_openapi_snapshot(output_path: &str) -> std::io::Result<()> {
    let doc = ApiDoc::openapi();
    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}
