use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::risk::entities::{RiskResult, RiskTag};

/// One rendered ingredient. Clicking it asks the chat assistant `question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientCard {
    pub index: usize,
    pub ingredient: String,
    pub risk: RiskTag,
    pub question: String,
}

impl IngredientCard {
    pub fn new(index: usize, result: &RiskResult) -> Self {
        Self {
            index,
            ingredient: result.ingredient.clone(),
            risk: result.risk,
            question: format!(
                "Tell me about {} and its health effects",
                result.ingredient
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CardView {
    #[serde(flatten)]
    pub card: IngredientCard,
    pub visible: bool,
}
