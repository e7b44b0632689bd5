use axum::extract::State;
use foodguard_core::domain::profile::{entities::Profile, services::ProfileService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProfileResponse {
    pub data: Profile,
    pub greeting: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            greeting: profile.greeting(),
            data: profile,
        }
    }
}

#[utoipa::path(
    get,
    path = "",
    tag = "profile",
    summary = "Get profile",
    responses(
        (status = 200, body = ProfileResponse)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
) -> Result<Response<ProfileResponse>, ApiError> {
    let profile = state.service.get_profile().await.map_err(ApiError::from)?;

    Ok(Response::OK(ProfileResponse::from(profile)))
}
