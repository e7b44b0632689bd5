use axum::extract::State;
use foodguard_core::domain::scan::{services::ScanService, value_objects::SelectImageInput};

use crate::application::http::{
    scan::{handlers::select_image::SelectImageResponse, validators::CaptureImageValidator},
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/images/capture",
    tag = "scan",
    summary = "Select a captured frame",
    description = "Makes a camera frame, sent as a base64 image data URL, the active preview.",
    responses(
        (status = 200, body = SelectImageResponse),
        (status = 400, description = "Not an image data URL")
    ),
    request_body = CaptureImageValidator
)]
pub async fn capture_image(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CaptureImageValidator>,
) -> Result<Response<SelectImageResponse>, ApiError> {
    let preview = state
        .service
        .select_image(SelectImageInput::Capture {
            data_url: payload.data_url,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SelectImageResponse { data: preview }))
}
