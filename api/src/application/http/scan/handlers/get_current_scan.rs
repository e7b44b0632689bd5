use axum::extract::State;
use foodguard_core::domain::scan::{entities::ScanSnapshot, services::ScanService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetCurrentScanResponse {
    pub data: ScanSnapshot,
}

#[utoipa::path(
    get,
    path = "/scans/current",
    tag = "scan",
    summary = "Get the active scan",
    responses(
        (status = 200, body = GetCurrentScanResponse)
    ),
)]
pub async fn get_current_scan(
    State(state): State<AppState>,
) -> Result<Response<GetCurrentScanResponse>, ApiError> {
    let snapshot = state
        .service
        .get_current_scan()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetCurrentScanResponse { data: snapshot }))
}
