use super::handlers::get_transcript::{__path_get_transcript, get_transcript};
use super::handlers::send_chat::{__path_send_chat, send_chat};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(send_chat, get_transcript))]
pub struct ChatApiDoc;

pub fn chat_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/chat", state.args.server.root_path),
        get(get_transcript).post(send_chat),
    )
}
