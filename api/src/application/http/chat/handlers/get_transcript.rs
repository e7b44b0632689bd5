use axum::extract::State;
use foodguard_core::domain::chat::{entities::ChatTurn, services::ChatService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetTranscriptResponse {
    pub data: Vec<ChatTurn>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "chat",
    summary = "Get the chat transcript",
    responses(
        (status = 200, body = GetTranscriptResponse)
    ),
)]
pub async fn get_transcript(
    State(state): State<AppState>,
) -> Result<Response<GetTranscriptResponse>, ApiError> {
    let turns = state
        .service
        .get_transcript()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetTranscriptResponse { data: turns }))
}
