use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, history::entities::ScanHistory};

/// Repository trait for the persisted scan history
#[cfg_attr(test, mockall::automock)]
pub trait HistoryRepository: Send + Sync {
    fn load_history(&self) -> impl Future<Output = Result<ScanHistory, CoreError>> + Send;

    fn save_history(
        &self,
        history: ScanHistory,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
