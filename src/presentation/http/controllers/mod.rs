pub mod activities;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod users;

/// `?confirm=true` on delete requests.
#[derive(Debug, Default, serde::Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConfirmParams {
    /// Must be `true` for the deletion to go ahead.
    #[serde(default)]
    pub confirm: bool,
}
