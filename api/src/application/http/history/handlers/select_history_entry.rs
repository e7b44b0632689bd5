use axum::extract::{Path, State};
use foodguard_core::domain::history::services::HistoryService;

use crate::application::http::{
    scan::handlers::select_image::SelectImageResponse,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/{index}/select",
    tag = "history",
    summary = "Restore a history entry",
    description = "Makes the entry's image the active preview. Its ingredients and results are not restored.",
    params(
        ("index" = usize, Path, description = "Entry index, 0 is the most recent scan"),
    ),
    responses(
        (status = 200, body = SelectImageResponse),
        (status = 404, description = "No entry at this index")
    ),
)]
pub async fn select_history_entry(
    Path(index): Path<usize>,
    State(state): State<AppState>,
) -> Result<Response<SelectImageResponse>, ApiError> {
    let preview = state
        .service
        .select_history_entry(index)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SelectImageResponse { data: preview }))
}
