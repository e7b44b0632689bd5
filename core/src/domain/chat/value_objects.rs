use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{chat::entities::ChatTurn, common::entities::app_errors::CoreError};

pub const NO_INGREDIENTS_MESSAGE: &str = "⚠️ No ingredients available for analysis.";
pub const EMPTY_REPLY_MESSAGE: &str = "⚠️ Couldn't get a response right now.";
pub const FAILED_REPLY_MESSAGE: &str = "⚠️ Sorry, I couldn't process your question. Try again.";

/// What the language model produced for a chat question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Answer(String),
    /// The call succeeded but carried no candidate text.
    Empty,
    Failed(CoreError),
}

impl From<Result<String, CoreError>> for ChatReply {
    fn from(result: Result<String, CoreError>) -> Self {
        match result {
            Ok(text) => ChatReply::Answer(text),
            Err(CoreError::EmptyCompletion) => ChatReply::Empty,
            Err(e) => ChatReply::Failed(e),
        }
    }
}

impl ChatReply {
    pub fn into_text(self) -> String {
        match self {
            ChatReply::Answer(text) => text,
            ChatReply::Empty => EMPTY_REPLY_MESSAGE.to_string(),
            ChatReply::Failed(_) => FAILED_REPLY_MESSAGE.to_string(),
        }
    }
}

/// Turns added to the transcript by one chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatExchange {
    /// `false` when the message was empty or a casual acknowledgement.
    pub recorded: bool,
    pub turns: Vec<ChatTurn>,
}

impl ChatExchange {
    pub fn ignored() -> Self {
        Self {
            recorded: false,
            turns: Vec::new(),
        }
    }
}
