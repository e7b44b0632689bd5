use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::risk::entities::RiskTag;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskFilter {
    #[default]
    All,
    Good,
    Moderate,
    Bad,
}

impl RiskFilter {
    pub fn matches(&self, risk: RiskTag) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::Good => risk == RiskTag::Good,
            RiskFilter::Moderate => risk == RiskTag::Moderate,
            RiskFilter::Bad => risk == RiskTag::Bad,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub search: String,
    pub risk: RiskFilter,
}
