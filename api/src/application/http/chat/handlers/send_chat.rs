use axum::extract::State;
use foodguard_core::domain::chat::{services::ChatService, value_objects::ChatExchange};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    chat::validators::SendChatValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SendChatResponse {
    pub data: ChatExchange,
}

#[utoipa::path(
    post,
    path = "",
    tag = "chat",
    summary = "Ask the assistant",
    description = "Asks about the ingredients of the active scan. Casual messages are ignored \
        and come back with `recorded: false`.",
    responses(
        (status = 200, body = SendChatResponse)
    ),
    request_body = SendChatValidator
)]
pub async fn send_chat(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<SendChatValidator>,
) -> Result<Response<SendChatResponse>, ApiError> {
    let exchange = state
        .service
        .send_chat(payload.message)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SendChatResponse { data: exchange }))
}
