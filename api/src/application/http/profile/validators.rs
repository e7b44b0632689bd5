use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileValidator {
    #[serde(default)]
    #[validate(length(max = 100, message = "user_name is too long"))]
    pub user_name: Option<String>,

    /// Data URL of the profile picture.
    #[serde(default)]
    pub user_picture: Option<String>,

    #[serde(default)]
    #[validate(length(max = 1000, message = "user_health is too long"))]
    pub user_health: Option<String>,

    #[serde(default)]
    pub selected_conditions: Option<Vec<String>>,
}
