use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    common::{ScanConfig, ports::LLMClient},
    history::ports::HistoryRepository,
    profile::ports::ProfileRepository,
    risk::ports::FoodDatabaseClient,
    scan::{ports::OcrClient, session::ScanSession},
};

/// Application service shared by every HTTP handler.
///
/// Each area (`scan`, `history`, `chat`, `profile`, `presenter`) implements its
/// service trait for this struct, so the handlers only ever hold one value.
pub struct Service<OCR, LLM, FD, HR, PR>
where
    OCR: OcrClient,
    LLM: LLMClient,
    FD: FoodDatabaseClient,
    HR: HistoryRepository,
    PR: ProfileRepository,
{
    pub(crate) ocr_client: Arc<OCR>,
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) food_database: Arc<FD>,
    pub(crate) history_repository: Arc<HR>,
    pub(crate) profile_repository: Arc<PR>,
    pub(crate) session: Arc<ScanSession>,
    /// Serializes history read-modify-write cycles.
    pub(crate) history_lock: Arc<Mutex<()>>,
    pub(crate) scan_config: ScanConfig,
}

impl<OCR, LLM, FD, HR, PR> Service<OCR, LLM, FD, HR, PR>
where
    OCR: OcrClient,
    LLM: LLMClient,
    FD: FoodDatabaseClient,
    HR: HistoryRepository,
    PR: ProfileRepository,
{
    pub fn new(
        ocr_client: OCR,
        llm_client: LLM,
        food_database: FD,
        history_repository: HR,
        profile_repository: PR,
        scan_config: ScanConfig,
    ) -> Self {
        Self {
            ocr_client: Arc::new(ocr_client),
            llm_client: Arc::new(llm_client),
            food_database: Arc::new(food_database),
            history_repository: Arc::new(history_repository),
            profile_repository: Arc::new(profile_repository),
            session: Arc::new(ScanSession::default()),
            history_lock: Arc::new(Mutex::new(())),
            scan_config,
        }
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }
}

impl<OCR, LLM, FD, HR, PR> Clone for Service<OCR, LLM, FD, HR, PR>
where
    OCR: OcrClient,
    LLM: LLMClient,
    FD: FoodDatabaseClient,
    HR: HistoryRepository,
    PR: ProfileRepository,
{
    fn clone(&self) -> Self {
        Self {
            ocr_client: Arc::clone(&self.ocr_client),
            llm_client: Arc::clone(&self.llm_client),
            food_database: Arc::clone(&self.food_database),
            history_repository: Arc::clone(&self.history_repository),
            profile_repository: Arc::clone(&self.profile_repository),
            session: Arc::clone(&self.session),
            history_lock: Arc::clone(&self.history_lock),
            scan_config: self.scan_config,
        }
    }
}
