use axum::extract::{Multipart, State};
use foodguard_core::domain::scan::{
    entities::ImagePreview, services::ScanService, value_objects::SelectImageInput,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SelectImageResponse {
    pub data: ImagePreview,
}

#[utoipa::path(
    post,
    path = "/images",
    tag = "scan",
    summary = "Select a label image",
    description = "Uploads a label photo as multipart field `file` and makes it the active preview.",
    responses(
        (status = 200, body = SelectImageResponse),
        (status = 400, description = "Missing, empty or non-image file")
    ),
)]
pub async fn select_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<SelectImageResponse>, ApiError> {
    let mut upload: Option<(bytes::Bytes, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        if data.len() > MAX_IMAGE_SIZE {
            return Err(ApiError::BadRequest(format!(
                "Image too large. Max size is {} bytes",
                MAX_IMAGE_SIZE
            )));
        }

        upload = Some((data, mime_type));
    }

    let (data, mime_type) = upload.ok_or_else(|| {
        ApiError::BadRequest("Missing 'file' field in multipart form".to_string())
    })?;

    let preview = state
        .service
        .select_image(SelectImageInput::Upload { data, mime_type })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SelectImageResponse { data: preview }))
}
