use axum::extract::{Query, State};
use foodguard_core::domain::presenter::{
    entities::CardView,
    services::PresenterService,
    value_objects::{CardFilter, RiskFilter},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetCardsQuery {
    /// Case-insensitive substring of the ingredient name.
    pub search: Option<String>,
    pub risk: Option<RiskFilter>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetCardsResponse {
    pub data: Vec<CardView>,
}

#[utoipa::path(
    get,
    path = "/scans/current/cards",
    tag = "scan",
    summary = "Get ingredient cards",
    description = "Returns every card of the active scan in order, flagged visible when it \
        matches the search text and the risk filter.",
    params(GetCardsQuery),
    responses(
        (status = 200, body = GetCardsResponse)
    ),
)]
pub async fn get_cards(
    Query(query): Query<GetCardsQuery>,
    State(state): State<AppState>,
) -> Result<Response<GetCardsResponse>, ApiError> {
    let cards = state
        .service
        .get_cards(CardFilter {
            search: query.search.unwrap_or_default(),
            risk: query.risk.unwrap_or_default(),
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetCardsResponse { data: cards }))
}
