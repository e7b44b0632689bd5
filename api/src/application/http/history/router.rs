use super::handlers::get_history::{__path_get_history, get_history};
use super::handlers::select_history_entry::{__path_select_history_entry, select_history_entry};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_history, select_history_entry))]
pub struct HistoryApiDoc;

pub fn history_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/history", state.args.server.root_path),
            get(get_history),
        )
        .route(
            &format!("{}/history/{{index}}/select", state.args.server.root_path),
            post(select_history_entry),
        )
}
