//! Risk rules applied to a single ingredient.

use crate::domain::risk::{
    entities::{ProductFacts, RiskTag},
    value_objects::LookupOutcome,
};

const BAD_NUTRISCORE_GRADES: [&str; 2] = ["e", "d"];
const GOOD_NUTRISCORE_GRADES: [&str; 2] = ["a", "b"];
const MAX_ADDITIVES: usize = 3;

const BAD_KEYWORDS: [&str; 3] = ["sugar", "preservative", "artificial"];
const GOOD_KEYWORDS: [&str; 3] = ["fiber", "vitamin", "protein"];

/// (condition fragment, ingredient fragment) pairs that force `bad`.
const CONDITION_OVERRIDES: [(&str, &str); 3] = [
    ("diabetes", "sugar"),
    ("bp", "sodium"),
    ("cholesterol", "trans fat"),
];

/// Rates a matched product. `bad` wins over `good`.
pub fn rate_product(product: &ProductFacts) -> RiskTag {
    let nova = product.nova_group();
    let grade = product.nutriscore_grade();

    if nova >= 4
        || product.additive_count() > MAX_ADDITIVES
        || BAD_NUTRISCORE_GRADES.contains(&grade.as_str())
    {
        RiskTag::Bad
    } else if nova <= 2 && GOOD_NUTRISCORE_GRADES.contains(&grade.as_str()) {
        RiskTag::Good
    } else {
        RiskTag::Moderate
    }
}

/// Upgrades to `bad` when a health condition is sensitive to the ingredient.
/// Never downgrades.
pub fn apply_condition_overrides(risk: RiskTag, ingredient: &str, conditions: &[String]) -> RiskTag {
    let ingredient = ingredient.to_lowercase();

    let triggered = conditions.iter().any(|condition| {
        let condition = condition.to_lowercase();
        CONDITION_OVERRIDES.iter().any(|(condition_fragment, ingredient_fragment)| {
            condition.contains(condition_fragment) && ingredient.contains(ingredient_fragment)
        })
    });

    if triggered { RiskTag::Bad } else { risk }
}

/// Heuristic used when the food database has nothing to say.
pub fn keyword_fallback(ingredient: &str) -> RiskTag {
    let ingredient = ingredient.to_lowercase();

    if BAD_KEYWORDS.iter().any(|k| ingredient.contains(k)) {
        RiskTag::Bad
    } else if GOOD_KEYWORDS.iter().any(|k| ingredient.contains(k)) {
        RiskTag::Good
    } else {
        RiskTag::Moderate
    }
}

pub fn classify_ingredient(ingredient: &str, lookup: &LookupOutcome, conditions: &[String]) -> RiskTag {
    match lookup {
        LookupOutcome::Found(product) => {
            apply_condition_overrides(rate_product(product), ingredient, conditions)
        }
        LookupOutcome::NotFound | LookupOutcome::Failed(_) => keyword_fallback(ingredient),
    }
}
