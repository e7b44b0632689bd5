//! In-memory fakes for service tests.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use crate::domain::{
    common::{ScanConfig, entities::app_errors::CoreError, ports::LLMClient, services::Service},
    history::{entities::ScanHistory, ports::HistoryRepository},
    profile::{entities::Profile, ports::ProfileRepository},
    risk::{entities::ProductFacts, ports::FoodDatabaseClient},
    scan::{entities::ScanImage, ports::OcrClient},
};

pub(crate) type TestService<LLM> =
    Service<FakeOcr, LLM, FakeFoodDatabase, InMemoryHistoryRepository, InMemoryProfileRepository>;

pub(crate) fn service<LLM: LLMClient>(llm: LLM) -> TestService<LLM> {
    service_with(
        FakeOcr::reading(""),
        llm,
        FakeFoodDatabase::default(),
        Profile::default(),
    )
}

pub(crate) fn service_with<LLM: LLMClient>(
    ocr: FakeOcr,
    llm: LLM,
    food_database: FakeFoodDatabase,
    profile: Profile,
) -> TestService<LLM> {
    Service::new(
        ocr,
        llm,
        food_database,
        InMemoryHistoryRepository::default(),
        InMemoryProfileRepository {
            profile: Mutex::new(profile),
        },
        ScanConfig::default(),
    )
}

/// PNG signature bytes, enough for anything that does not decode pixels.
pub(crate) fn png_data_url() -> String {
    "data:image/png;base64,iVBORw0KGgo=".to_string()
}

pub(crate) fn png_image() -> ScanImage {
    ScanImage::from_data_url(png_data_url()).expect("valid test image")
}

pub(crate) struct FakeOcr {
    text: Result<String, CoreError>,
    images: Mutex<Vec<ScanImage>>,
}

impl FakeOcr {
    pub(crate) fn reading(text: &str) -> Self {
        Self {
            text: Ok(text.to_string()),
            images: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(error: CoreError) -> Self {
        Self {
            text: Err(error),
            images: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.images.lock().unwrap().len()
    }
}

impl OcrClient for FakeOcr {
    async fn extract_text(&self, image: ScanImage) -> Result<String, CoreError> {
        self.images.lock().unwrap().push(image);
        self.text.clone()
    }
}

pub(crate) struct FakeLlm {
    reply: Result<String, CoreError>,
    prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(error: CoreError) -> Self {
        Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl LLMClient for FakeLlm {
    async fn generate_with_text(&self, prompt: String) -> Result<String, CoreError> {
        self.prompts.lock().unwrap().push(prompt);
        self.reply.clone()
    }
}

#[derive(Default)]
pub(crate) struct FakeFoodDatabase {
    products: HashMap<String, ProductFacts>,
    failing: HashSet<String>,
}

impl FakeFoodDatabase {
    pub(crate) fn with_product(mut self, ingredient: &str, product: ProductFacts) -> Self {
        self.products.insert(ingredient.to_string(), product);
        self
    }

    pub(crate) fn failing_on(mut self, ingredient: &str) -> Self {
        self.failing.insert(ingredient.to_string());
        self
    }
}

impl FoodDatabaseClient for FakeFoodDatabase {
    async fn find_product(&self, ingredient: String) -> Result<Option<ProductFacts>, CoreError> {
        if self.failing.contains(&ingredient) {
            return Err(CoreError::ExternalServiceError("lookup failed".to_string()));
        }
        Ok(self.products.get(&ingredient).cloned())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryHistoryRepository {
    history: Mutex<ScanHistory>,
}

impl HistoryRepository for InMemoryHistoryRepository {
    async fn load_history(&self) -> Result<ScanHistory, CoreError> {
        Ok(self.history.lock().unwrap().clone())
    }

    async fn save_history(&self, history: ScanHistory) -> Result<(), CoreError> {
        *self.history.lock().unwrap() = history;
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryProfileRepository {
    profile: Mutex<Profile>,
}

impl ProfileRepository for InMemoryProfileRepository {
    async fn get_profile(&self) -> Result<Profile, CoreError> {
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn save_profile(&self, profile: Profile) -> Result<Profile, CoreError> {
        *self.profile.lock().unwrap() = profile.clone();
        Ok(profile)
    }
}
