use crate::application::http::{
    chat::router::ChatApiDoc, health::HealthApiDoc, history::router::HistoryApiDoc,
    profile::router::ProfileApiDoc, scan::router::ScanApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FoodGuard API",
        description = "Scan food labels, rate their ingredients and chat about them."
    ),
    nest(
        (path = "/history", api = HistoryApiDoc),
        (path = "/chat", api = ChatApiDoc),
        (path = "/profile", api = ProfileApiDoc),
    )
)]
pub struct ApiDoc;

/// Root document. Scan and health routes span several prefixes, so they are
/// merged instead of nested.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.merge(ScanApiDoc::openapi());
    openapi.merge(HealthApiDoc::openapi());
    openapi
}
