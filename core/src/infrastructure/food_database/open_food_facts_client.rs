use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::domain::{
    common::{FoodDatabaseConfig, entities::app_errors::CoreError},
    risk::{entities::ProductFacts, ports::FoodDatabaseClient},
};

const PRODUCT_FIELDS: &str = "product_name,ingredients_text,nutriscore_grade,nova_group,additives_tags";
const USER_AGENT: &str = concat!("FoodGuard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<ProductFacts>,
}

impl OpenFoodFactsClient {
    pub fn new(config: &FoodDatabaseConfig, timeout: Duration) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                error!("failed to build food database HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl FoodDatabaseClient for OpenFoodFactsClient {
    async fn find_product(&self, ingredient: String) -> Result<Option<ProductFacts>, CoreError> {
        let url = format!("{}/api/v2/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ingredients_tags", ingredient.as_str()),
                ("fields", PRODUCT_FIELDS),
                ("sort_by", "popularity"),
                ("page_size", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                CoreError::ExternalServiceError(format!("food database error: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(CoreError::ExternalServiceError(format!(
                "food database returned {}",
                response.status()
            )));
        }

        let search: SearchResponse = response.json().await.map_err(|e| {
            CoreError::ExternalServiceError(format!("failed to parse food database response: {}", e))
        })?;

        let product = search.products.into_iter().next();
        debug!(ingredient = %ingredient, found = product.is_some(), "food database lookup");
        Ok(product)
    }
}
