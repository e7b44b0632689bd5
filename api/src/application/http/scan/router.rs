use super::handlers::ask_about_card::{__path_ask_about_card, ask_about_card};
use super::handlers::capture_image::{__path_capture_image, capture_image};
use super::handlers::get_cards::{__path_get_cards, get_cards};
use super::handlers::get_current_scan::{__path_get_current_scan, get_current_scan};
use super::handlers::scan_label::{__path_scan_label, scan_label};
use super::handlers::select_image::{__path_select_image, MAX_IMAGE_SIZE, select_image};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use utoipa::OpenApi;

// Base64 inflates a captured frame by a third, plus multipart framing.
const MAX_BODY_SIZE: usize = MAX_IMAGE_SIZE * 4 / 3 + 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(
    select_image,
    capture_image,
    scan_label,
    get_current_scan,
    get_cards,
    ask_about_card
))]
pub struct ScanApiDoc;

pub fn scan_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/images", state.args.server.root_path),
            post(select_image),
        )
        .route(
            &format!("{}/images/capture", state.args.server.root_path),
            post(capture_image),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .route(
            &format!("{}/scans", state.args.server.root_path),
            post(scan_label),
        )
        .route(
            &format!("{}/scans/current", state.args.server.root_path),
            get(get_current_scan),
        )
        .route(
            &format!("{}/scans/current/cards", state.args.server.root_path),
            get(get_cards),
        )
        .route(
            &format!(
                "{}/scans/current/cards/{{index}}/chat",
                state.args.server.root_path
            ),
            post(ask_about_card),
        )
}
