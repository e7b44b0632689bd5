use axum::extract::State;
use foodguard_core::domain::scan::{entities::ScanOutcome, services::ScanService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ScanLabelResponse {
    pub data: ScanOutcome,
}

#[utoipa::path(
    post,
    path = "/scans",
    tag = "scan",
    summary = "Scan the active image",
    description = "Runs text extraction, ingredient correction and risk classification on the \
        active preview. Early stops are reported as a `halted` outcome with a user notice.",
    responses(
        (status = 200, body = ScanLabelResponse),
        (status = 400, description = "No image selected")
    ),
)]
pub async fn scan_label(
    State(state): State<AppState>,
) -> Result<Response<ScanLabelResponse>, ApiError> {
    let outcome = state.service.scan_label().await.map_err(ApiError::from)?;

    Ok(Response::OK(ScanLabelResponse { data: outcome }))
}
