use axum::extract::{Path, State};
use foodguard_core::domain::chat::services::ChatService;

use crate::application::http::{
    chat::handlers::send_chat::SendChatResponse,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/scans/current/cards/{index}/chat",
    tag = "scan",
    summary = "Ask about an ingredient card",
    description = "Sends the card's question to the chat assistant.",
    params(
        ("index" = usize, Path, description = "Card index in the active scan"),
    ),
    responses(
        (status = 200, body = SendChatResponse),
        (status = 404, description = "No card at this index")
    ),
)]
pub async fn ask_about_card(
    Path(index): Path<usize>,
    State(state): State<AppState>,
) -> Result<Response<SendChatResponse>, ApiError> {
    let exchange = state
        .service
        .ask_about_card(index)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SendChatResponse { data: exchange }))
}
