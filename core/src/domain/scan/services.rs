use std::future::Future;

use tracing::{error, info, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, ports::LLMClient, services::Service},
    history::ports::HistoryRepository,
    profile::ports::ProfileRepository,
    risk::{ports::FoodDatabaseClient, services::classify_ingredients},
    scan::{
        correction::correct_ingredients,
        entities::{ImagePreview, ScanImage, ScanNotice, ScanOutcome, ScanReport, ScanSnapshot},
        normalizer,
        ports::OcrClient,
        session::ScanTicket,
        value_objects::SelectImageInput,
    },
};

/// Service trait for the label scanning pipeline
pub trait ScanService: Send + Sync {
    /// Makes an uploaded or captured image the active preview.
    fn select_image(
        &self,
        input: SelectImageInput,
    ) -> impl Future<Output = Result<ImagePreview, CoreError>> + Send;

    /// OCR → normalization → spell correction → classification → history.
    fn scan_label(&self) -> impl Future<Output = Result<ScanOutcome, CoreError>> + Send;

    fn get_current_scan(&self) -> impl Future<Output = Result<ScanSnapshot, CoreError>> + Send;
}

impl<OCR, LLM, FD, HR, PR> ScanService for Service<OCR, LLM, FD, HR, PR>
where
    OCR: OcrClient,
    LLM: LLMClient,
    FD: FoodDatabaseClient,
    HR: HistoryRepository,
    PR: ProfileRepository,
{
    #[instrument(skip_all)]
    async fn select_image(&self, input: SelectImageInput) -> Result<ImagePreview, CoreError> {
        let image = match input {
            SelectImageInput::Upload { data, mime_type } => ScanImage::from_upload(data, mime_type)?,
            SelectImageInput::Capture { data_url } => ScanImage::from_data_url(data_url)?,
        };

        let preview = image.preview();
        self.session.set_preview(image).await;

        Ok(preview)
    }

    #[instrument(skip(self))]
    async fn scan_label(&self) -> Result<ScanOutcome, CoreError> {
        let image = self
            .session
            .preview()
            .await
            .ok_or(CoreError::NoImageSelected)?;

        let ticket = self.session.begin().await;
        let generation = ticket.generation();

        let raw_text = match self.ocr_client.extract_text(image.clone()).await {
            Ok(text) => text,
            Err(e) => {
                error!(generation, error = %e, "OCR failed");
                return Ok(self.halt_scan(ticket, ScanNotice::OcrFailed).await);
            }
        };

        if !normalizer::has_enough_text(&raw_text) {
            return Ok(self.halt_scan(ticket, ScanNotice::NoTextDetected).await);
        }

        let candidates = normalizer::normalize(&raw_text);
        let correction = correct_ingredients(self.llm_client.as_ref(), &candidates).await;
        let correction_source = correction.source();
        let ingredients =
            normalizer::canonicalize(correction.into_tokens(), self.scan_config.max_ingredients);

        if !self
            .session
            .publish_ingredients(ticket, ingredients.clone())
            .await
        {
            return Ok(superseded(ticket));
        }

        if ingredients.is_empty() {
            return Ok(self.halt_scan(ticket, ScanNotice::NoValidIngredients).await);
        }

        let conditions = match self.profile_repository.get_profile().await {
            Ok(profile) => profile.selected_conditions,
            Err(e) => {
                warn!(error = %e, "failed to read health conditions, classifying without them");
                Vec::new()
            }
        };

        let results = classify_ingredients(
            self.food_database.as_ref(),
            &ingredients,
            &conditions,
            self.scan_config.batch_size,
        )
        .await;

        if !self.session.publish_results(ticket, results.clone()).await {
            return Ok(superseded(ticket));
        }

        let history = match self
            .append_history(image.data_url.clone(), &ingredients, Some(ticket))
            .await
        {
            Ok(Some(history)) => history,
            Ok(None) => return Ok(superseded(ticket)),
            Err(e) => {
                error!(generation, error = %e, "failed to persist scan history");
                Vec::new()
            }
        };

        info!(generation, ingredients = ingredients.len(), "scan completed");

        Ok(ScanOutcome::Completed {
            report: ScanReport {
                generation,
                raw_text,
                correction: correction_source,
                ingredients,
                results,
                history,
            },
        })
    }

    async fn get_current_scan(&self) -> Result<ScanSnapshot, CoreError> {
        Ok(self.session.snapshot().await)
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
    async fn halt_scan(&self, ticket: ScanTicket, notice: ScanNotice) -> ScanOutcome {
        self.session.halt(ticket).await;
        ScanOutcome::halted(ticket.generation(), notice)
    }
}

fn superseded(ticket: ScanTicket) -> ScanOutcome {
    warn!(
        generation = ticket.generation(),
        "scan superseded by a newer one, dropping its results"
    );
    ScanOutcome::Superseded {
        generation: ticket.generation(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Notify;

    use super::*;
    use crate::domain::{
        common::{
            ScanConfig,
            test_support::{
                FakeFoodDatabase, FakeLlm, FakeOcr, InMemoryHistoryRepository,
                InMemoryProfileRepository, png_data_url, png_image, service, service_with,
            },
        },
        history::{entities::ScanHistory, services::HistoryService},
        profile::entities::Profile,
        risk::entities::{ProductFacts, RiskResult, RiskTag},
        scan::entities::{CorrectionSource, ScanStep},
    };

    const LABEL: &str = "INGREDIENTS: Cane sugr, wheat flour; soy lecithin\nContains soy";

    async fn select_png<S: ScanService>(service: &S) {
        service
            .select_image(SelectImageInput::Capture {
                data_url: png_data_url(),
            })
            .await
            .unwrap();
    }

    fn report(outcome: ScanOutcome) -> ScanReport {
        match outcome {
            ScanOutcome::Completed { report } => report,
            other => panic!("expected a completed scan, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scan_without_image_is_rejected() {
        let service = service(FakeLlm::replying("unused"));
        assert_eq!(
            service.scan_label().await.unwrap_err(),
            CoreError::NoImageSelected
        );
        assert_eq!(service.ocr_client.calls(), 0);
    }

    #[tokio::test]
    async fn test_full_pipeline() {
        let service = service_with(
            FakeOcr::reading(LABEL),
            FakeLlm::replying("Cane sugar, wheat flour, soy lecithin, contains soy"),
            FakeFoodDatabase::default().with_product(
                "wheat flour",
                ProductFacts {
                    nova_group: Some(1),
                    nutriscore_grade: Some("a".to_string()),
                    ..Default::default()
                },
            ),
            Profile {
                selected_conditions: vec!["Type 2 Diabetes".to_string()],
                ..Default::default()
            },
        );
        select_png(&service).await;

        let report = report(service.scan_label().await.unwrap());

        assert_eq!(report.correction, CorrectionSource::LanguageModel);
        assert_eq!(
            report.ingredients,
            vec!["Cane sugar", "wheat flour", "soy lecithin"]
        );
        assert_eq!(
            report.results,
            vec![
                RiskResult::new("Cane sugar", RiskTag::Bad),
                RiskResult::new("wheat flour", RiskTag::Good),
                RiskResult::new("soy lecithin", RiskTag::Moderate),
            ]
        );
        assert_eq!(report.history.len(), 1);
        assert_eq!(report.history[0].summary, "Cane sugar, wheat flour, soy lecithin");

        let prompts = service.llm_client.prompts();
        assert!(prompts[0].ends_with("Cane sugr, wheat flour, soy lecithin, Contains soy"));

        let snapshot = service.get_current_scan().await.unwrap();
        assert_eq!(snapshot.step, ScanStep::Completed);
        assert_eq!(snapshot.ingredients, report.ingredients);
    }

    #[tokio::test]
    async fn test_correction_failure_uses_raw_candidates() {
        let service = service_with(
            FakeOcr::reading("salt, salt, milk"),
            FakeLlm::failing(CoreError::ExternalServiceError("quota".to_string())),
            FakeFoodDatabase::default().failing_on("milk"),
            Profile::default(),
        );
        select_png(&service).await;

        let report = report(service.scan_label().await.unwrap());

        assert_eq!(report.correction, CorrectionSource::RawCandidates);
        assert_eq!(report.ingredients, vec!["salt", "milk"]);
        assert_eq!(report.results[1], RiskResult::new("milk", RiskTag::Moderate));
    }

    #[tokio::test]
    async fn test_ocr_failure_halts() {
        let service = service_with(
            FakeOcr::failing(CoreError::ExternalServiceError("503".to_string())),
            FakeLlm::replying("unused"),
            FakeFoodDatabase::default(),
            Profile::default(),
        );
        select_png(&service).await;

        let outcome = service.scan_label().await.unwrap();

        assert_eq!(outcome, ScanOutcome::halted(1, ScanNotice::OcrFailed));
        assert!(service.llm_client.prompts().is_empty());
        assert!(service.get_history().await.unwrap().is_empty());
        let snapshot = service.get_current_scan().await.unwrap();
        assert_eq!(snapshot.step, ScanStep::ImageSelected);
        assert!(snapshot.preview.is_some());
    }

    #[tokio::test]
    async fn test_blank_text_halts_before_correction() {
        let service = service_with(
            FakeOcr::reading(" x "),
            FakeLlm::replying("unused"),
            FakeFoodDatabase::default(),
            Profile::default(),
        );
        select_png(&service).await;

        let outcome = service.scan_label().await.unwrap();

        assert_eq!(outcome, ScanOutcome::halted(1, ScanNotice::NoTextDetected));
        assert!(service.llm_client.prompts().is_empty());
        assert_eq!(
            service.get_current_scan().await.unwrap().step,
            ScanStep::ImageSelected
        );
    }

    #[tokio::test]
    async fn test_no_valid_ingredients_halts_and_clears_list() {
        let service = service_with(
            FakeOcr::reading("Contains milk, so"),
            FakeLlm::replying("Contains milk, so"),
            FakeFoodDatabase::default(),
            Profile::default(),
        );
        select_png(&service).await;

        let outcome = service.scan_label().await.unwrap();

        assert_eq!(
            outcome,
            ScanOutcome::halted(1, ScanNotice::NoValidIngredients)
        );
        assert!(service.session().ingredients().await.is_empty());
        assert_eq!(
            service.get_current_scan().await.unwrap().step,
            ScanStep::ImageSelected
        );
    }

    /// Blocks inside OCR until released, so a test can start a newer scan mid-flight.
    #[derive(Default)]
    struct GatedOcr {
        entered: Notify,
        release: Notify,
    }

    impl OcrClient for GatedOcr {
        async fn extract_text(&self, _image: ScanImage) -> Result<String, CoreError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok("sugar, salt".to_string())
        }
    }

    #[tokio::test]
    async fn test_stale_scan_is_superseded() {
        let service = Service::new(
            GatedOcr::default(),
            FakeLlm::replying("sugar, salt"),
            FakeFoodDatabase::default(),
            InMemoryHistoryRepository::default(),
            InMemoryProfileRepository::default(),
            ScanConfig::default(),
        );
        service.session().set_preview(png_image()).await;

        let newer = async {
            service.ocr_client.entered.notified().await;
            let ticket = service.session().begin().await;
            service.ocr_client.release.notify_one();
            ticket
        };
        let (outcome, newer_ticket) = futures::join!(service.scan_label(), newer);

        assert_eq!(outcome.unwrap(), ScanOutcome::Superseded { generation: 1 });
        assert_eq!(newer_ticket.generation(), 2);
        assert!(service.session().ingredients().await.is_empty());
        assert!(service.get_history().await.unwrap().is_empty());
    }

    /// Blocks inside `load_history` until released and counts saves.
    #[derive(Default)]
    struct GatedHistory {
        inner: InMemoryHistoryRepository,
        entered: Notify,
        release: Notify,
        saves: AtomicUsize,
    }

    impl HistoryRepository for GatedHistory {
        async fn load_history(&self) -> Result<ScanHistory, CoreError> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.load_history().await
        }

        async fn save_history(&self, history: ScanHistory) -> Result<(), CoreError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save_history(history).await
        }
    }

    #[tokio::test]
    async fn test_scan_superseded_during_history_write_is_not_recorded() {
        let service = Service::new(
            FakeOcr::reading("sugar, salt"),
            FakeLlm::replying("sugar, salt"),
            FakeFoodDatabase::default(),
            GatedHistory::default(),
            InMemoryProfileRepository::default(),
            ScanConfig::default(),
        );
        select_png(&service).await;

        let newer = async {
            service.history_repository.entered.notified().await;
            let ticket = service.session().begin().await;
            service.history_repository.release.notify_one();
            ticket
        };
        let (outcome, newer_ticket) = futures::join!(service.scan_label(), newer);

        assert_eq!(outcome.unwrap(), ScanOutcome::Superseded { generation: 1 });
        assert_eq!(newer_ticket.generation(), 2);
        assert_eq!(service.history_repository.saves.load(Ordering::SeqCst), 0);
        assert!(service.session().results().await.is_empty());
    }
}
