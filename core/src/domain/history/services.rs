use std::future::Future;

use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, ports::LLMClient, services::Service},
    history::{
        entities::{HistoryEntry, ScanHistory},
        ports::HistoryRepository,
    },
    profile::ports::ProfileRepository,
    risk::ports::FoodDatabaseClient,
    scan::{
        entities::{ImagePreview, ScanImage},
        ports::OcrClient,
        session::ScanTicket,
    },
};

/// Service trait for the bounded scan history
pub trait HistoryService: Send + Sync {
    fn get_history(&self) -> impl Future<Output = Result<Vec<HistoryEntry>, CoreError>> + Send;

    /// Prepends a finished scan and returns the updated history.
    fn record_scan(
        &self,
        image_data_url: String,
        ingredients: Vec<String>,
    ) -> impl Future<Output = Result<Vec<HistoryEntry>, CoreError>> + Send;

    /// Restores the entry's image as the active preview. Ingredients and
    /// results of that past scan are not restored.
    fn select_history_entry(
        &self,
        index: usize,
    ) -> impl Future<Output = Result<ImagePreview, CoreError>> + Send;
}

impl<OCR, LLM, FD, HR, PR> HistoryService for Service<OCR, LLM, FD, HR, PR>
where
    OCR: OcrClient,
    LLM: LLMClient,
    FD: FoodDatabaseClient,
    HR: HistoryRepository,
    PR: ProfileRepository,
{
    async fn get_history(&self) -> Result<Vec<HistoryEntry>, CoreError> {
        let history = self.history_repository.load_history().await?;
        Ok(history.into_entries())
    }

    #[instrument(skip_all, fields(ingredients = ingredients.len()))]
    async fn record_scan(
        &self,
        image_data_url: String,
        ingredients: Vec<String>,
    ) -> Result<Vec<HistoryEntry>, CoreError> {
        let history = self
            .append_history(image_data_url, &ingredients, None)
            .await?;
        Ok(history.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn select_history_entry(&self, index: usize) -> Result<ImagePreview, CoreError> {
        let history: ScanHistory = self.history_repository.load_history().await?;
        let entry = history.get(index).ok_or(CoreError::NotFound)?;

        let image = ScanImage::from_data_url(entry.image.clone())?;
        let preview = image.preview();
        self.session.set_preview(image).await;

        Ok(preview)
    }
}

impl<OCR, LLM, FD, HR, PR> Service<OCR, LLM, FD, HR, PR>
where
    OCR: OcrClient,
    LLM: LLMClient,
    FD: FoodDatabaseClient,
    HR: HistoryRepository,
    PR: ProfileRepository,
{
    /// Prepends an entry under the history lock.
    ///
    /// With a ticket, the entry is dropped and `None` returned once a newer
    /// scan has started.
    pub(crate) async fn append_history(
        &self,
        image_data_url: String,
        ingredients: &[String],
        ticket: Option<ScanTicket>,
    ) -> Result<Option<Vec<HistoryEntry>>, CoreError> {
        let _guard = self.history_lock.lock().await;
        let mut history = self.history_repository.load_history().await?;

        if let Some(ticket) = ticket {
            if !self.session.is_current(ticket).await {
                return Ok(None);
            }
        }

        history.record(HistoryEntry::new(image_data_url, ingredients));
        self.history_repository.save_history(history.clone()).await?;

        Ok(Some(history.into_entries()))
    }
}
