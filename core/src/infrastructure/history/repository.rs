use std::sync::Arc;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        history::{
            entities::{HistoryEntry, ScanHistory},
            ports::HistoryRepository,
        },
    },
    infrastructure::local_store::json_store::JsonFileStore,
};

const SCAN_HISTORY_KEY: &str = "scanHistory";

#[derive(Debug, Clone)]
pub struct JsonHistoryRepository {
    store: Arc<JsonFileStore>,
}

impl JsonHistoryRepository {
    pub fn new(store: Arc<JsonFileStore>) -> Self {
        Self { store }
    }
}

impl HistoryRepository for JsonHistoryRepository {
    async fn load_history(&self) -> Result<ScanHistory, CoreError> {
        let entries: Vec<HistoryEntry> = self
            .store
            .get(SCAN_HISTORY_KEY)
            .await?
            .unwrap_or_default();

        Ok(ScanHistory::new(entries))
    }

    async fn save_history(&self, history: ScanHistory) -> Result<(), CoreError> {
        self.store.set(SCAN_HISTORY_KEY, history).await
    }
}
