use std::sync::Arc;

use tracing::info;

use crate::{
    domain::common::{FoodGuardConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{
        food_database::open_food_facts_client::OpenFoodFactsClient,
        history::repository::JsonHistoryRepository,
        llm::gemini_client::GeminiLLMClient,
        local_store::json_store::JsonFileStore,
        ocr::ocr_space_client::OcrSpaceClient,
        profile::repository::JsonProfileRepository,
    },
};

pub type FoodGuardService = Service<
    OcrSpaceClient,
    GeminiLLMClient,
    OpenFoodFactsClient,
    JsonHistoryRepository,
    JsonProfileRepository,
>;

pub async fn create_service(config: FoodGuardConfig) -> Result<FoodGuardService, CoreError> {
    let store = Arc::new(JsonFileStore::new(config.storage.state_file.clone()));
    store.prepare().await?;

    let ocr_client = OcrSpaceClient::new(&config.ocr, config.request_timeout)?;
    let llm_client = GeminiLLMClient::new(&config.llm, config.request_timeout)?;
    let food_database = OpenFoodFactsClient::new(&config.food_database, config.request_timeout)?;

    info!(
        state_file = %store.path().display(),
        model = %config.llm.gemini_model,
        "FoodGuard service ready"
    );

    Ok(Service::new(
        ocr_client,
        llm_client,
        food_database,
        JsonHistoryRepository::new(store.clone()),
        JsonProfileRepository::new(store),
        config.scan,
    ))
}
