use std::future::Future;

use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, ports::LLMClient, services::Service},
    history::ports::HistoryRepository,
    profile::{entities::Profile, ports::ProfileRepository, value_objects::UpdateProfileInput},
    risk::ports::FoodDatabaseClient,
    scan::ports::OcrClient,
};

/// Service trait for the user profile
pub trait ProfileService: Send + Sync {
    fn get_profile(&self) -> impl Future<Output = Result<Profile, CoreError>> + Send;

    fn update_profile(
        &self,
        input: UpdateProfileInput,
    ) -> impl Future<Output = Result<Profile, CoreError>> + Send;
}

impl<OCR, LLM, FD, HR, PR> ProfileService for Service<OCR, LLM, FD, HR, PR>
where
    OCR: OcrClient,
    LLM: LLMClient,
    FD: FoodDatabaseClient,
    HR: HistoryRepository,
    PR: ProfileRepository,
{
    async fn get_profile(&self) -> Result<Profile, CoreError> {
        self.profile_repository.get_profile().await
    }

    #[instrument(skip_all)]
    async fn update_profile(&self, input: UpdateProfileInput) -> Result<Profile, CoreError> {
        let mut profile = self.profile_repository.get_profile().await?;

        if let Some(user_name) = input.user_name {
            profile.user_name = Some(user_name);
        }
        if let Some(user_picture) = input.user_picture {
            profile.user_picture = Some(user_picture);
        }
        if let Some(user_health) = input.user_health {
            profile.user_health = Some(user_health);
        }
        if let Some(conditions) = input.selected_conditions {
            profile.selected_conditions = conditions
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
        }

        self.profile_repository.save_profile(profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::test_support::{FakeLlm, service};

    #[tokio::test]
    async fn test_update_merges_fields() {
        let service = service(FakeLlm::replying("unused"));

        service
            .update_profile(UpdateProfileInput {
                user_name: Some("Sam".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let profile = service
            .update_profile(UpdateProfileInput {
                selected_conditions: Some(vec![" Diabetes ".to_string(), "".to_string()]),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(profile.user_name.as_deref(), Some("Sam"));
        assert_eq!(profile.selected_conditions, vec!["Diabetes".to_string()]);
        assert_eq!(service.get_profile().await.unwrap(), profile);
    }
}
