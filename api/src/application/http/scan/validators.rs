use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CaptureImageValidator {
    /// Base64 data URL of the captured frame, e.g. `data:image/png;base64,...`.
    #[validate(length(min = 1, message = "data_url is required"))]
    pub data_url: String,
}
