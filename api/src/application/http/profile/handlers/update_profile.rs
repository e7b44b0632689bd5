use axum::extract::State;
use foodguard_core::domain::profile::{
    services::ProfileService, value_objects::UpdateProfileInput,
};

use crate::application::http::{
    profile::{handlers::get_profile::ProfileResponse, validators::UpdateProfileValidator},
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    put,
    path = "",
    tag = "profile",
    summary = "Update profile",
    description = "Stores name, picture, health summary and health conditions.",
    responses(
        (status = 200, body = ProfileResponse)
    ),
    request_body = UpdateProfileValidator
)]
pub async fn update_profile(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<UpdateProfileValidator>,
) -> Result<Response<ProfileResponse>, ApiError> {
    let profile = state
        .service
        .update_profile(UpdateProfileInput {
            user_name: payload.user_name,
            user_picture: payload.user_picture,
            user_health: payload.user_health,
            selected_conditions: payload.selected_conditions,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ProfileResponse::from(profile)))
}
