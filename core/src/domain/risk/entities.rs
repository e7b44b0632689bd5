use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskTag {
    Good,
    #[default]
    Moderate,
    Bad,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RiskResult {
    pub ingredient: String,
    pub risk: RiskTag,
}

impl RiskResult {
    pub fn new(ingredient: impl Into<String>, risk: RiskTag) -> Self {
        Self {
            ingredient: ingredient.into(),
            risk,
        }
    }
}

/// Nutrition metadata of the most popular product matching an ingredient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFacts {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_nova_group")]
    pub nova_group: Option<u8>,
    #[serde(default)]
    pub additives_tags: Option<Vec<String>>,
    #[serde(default)]
    pub nutriscore_grade: Option<String>,
}

const DEFAULT_NOVA_GROUP: u8 = 3;
const DEFAULT_NUTRISCORE_GRADE: &str = "c";

impl ProductFacts {
    /// Missing or zero NOVA groups count as group 3.
    pub fn nova_group(&self) -> u8 {
        match self.nova_group {
            Some(group) if group > 0 => group,
            _ => DEFAULT_NOVA_GROUP,
        }
    }

    pub fn additive_count(&self) -> usize {
        self.additives_tags.as_ref().map_or(0, Vec::len)
    }

    /// Missing or blank grades count as `c`.
    pub fn nutriscore_grade(&self) -> String {
        match self.nutriscore_grade.as_deref().map(str::trim) {
            Some(grade) if !grade.is_empty() => grade.to_lowercase(),
            _ => DEFAULT_NUTRISCORE_GRADE.to_string(),
        }
    }
}

/// Open Food Facts serves `nova_group` as a number, occasionally as a string.
fn lenient_nova_group<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let group = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) if n.is_finite() && n >= 0.0 => Some(n as u8),
        Some(Raw::Text(text)) => text.trim().parse::<u8>().ok(),
        _ => None,
    };
    Ok(group)
}
