use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendChatValidator {
    /// Casual messages such as "thanks" are accepted and ignored.
    #[validate(length(max = 2000, message = "message is too long"))]
    pub message: String,
}
