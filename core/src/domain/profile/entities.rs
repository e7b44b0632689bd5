use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const DEFAULT_DISPLAY_NAME: &str = "User";
const DEFAULT_HEALTH_SUMMARY: &str = "general health";

/// Client-local profile data written by the onboarding flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub user_name: Option<String>,
    /// Data URL of the profile picture.
    pub user_picture: Option<String>,
    /// Free-text health summary.
    pub user_health: Option<String>,
    pub selected_conditions: Vec<String>,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        non_blank(self.user_name.as_deref()).unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    pub fn health_summary(&self) -> &str {
        non_blank(self.user_health.as_deref()).unwrap_or(DEFAULT_HEALTH_SUMMARY)
    }

    pub fn greeting(&self) -> String {
        format!("Hello, {}!", self.display_name())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let profile = Profile::default();
        assert_eq!(profile.greeting(), "Hello, User!");
        assert_eq!(profile.health_summary(), "general health");
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let profile = Profile {
            user_name: Some("  ".to_string()),
            user_health: Some("Vegan, low sodium".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "User");
        assert_eq!(profile.health_summary(), "Vegan, low sodium");
    }
}
