use std::sync::Arc;

use serde_json::Value;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        profile::{entities::Profile, ports::ProfileRepository},
    },
    infrastructure::local_store::json_store::JsonFileStore,
};

const USER_NAME_KEY: &str = "userName";
const USER_PICTURE_KEY: &str = "userPicture";
const USER_HEALTH_KEY: &str = "userHealth";
const SELECTED_CONDITIONS_KEY: &str = "selectedConditions";

#[derive(Debug, Clone)]
pub struct JsonProfileRepository {
    store: Arc<JsonFileStore>,
}

impl JsonProfileRepository {
    pub fn new(store: Arc<JsonFileStore>) -> Self {
        Self { store }
    }
}

impl ProfileRepository for JsonProfileRepository {
    async fn get_profile(&self) -> Result<Profile, CoreError> {
        Ok(Profile {
            user_name: self.store.get(USER_NAME_KEY).await?,
            user_picture: self.store.get(USER_PICTURE_KEY).await?,
            user_health: self.store.get(USER_HEALTH_KEY).await?,
            selected_conditions: self
                .store
                .get(SELECTED_CONDITIONS_KEY)
                .await?
                .unwrap_or_default(),
        })
    }

    async fn save_profile(&self, profile: Profile) -> Result<Profile, CoreError> {
        self.store
            .set_many(vec![
                (USER_NAME_KEY, profile.user_name.clone().map(Value::String)),
                (
                    USER_PICTURE_KEY,
                    profile.user_picture.clone().map(Value::String),
                ),
                (USER_HEALTH_KEY, profile.user_health.clone().map(Value::String)),
                (
                    SELECTED_CONDITIONS_KEY,
                    Some(Value::from(profile.selected_conditions.clone())),
                ),
            ])
            .await?;

        Ok(profile)
    }
}
