use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::domain::{
    chat::entities::ChatTurn,
    risk::entities::RiskResult,
    scan::entities::{ScanImage, ScanSnapshot, ScanStep},
};

/// Proof that a caller started scan `generation`.
///
/// Commits made with a ticket are accepted only while no newer scan has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket {
    generation: u64,
}

impl ScanTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct ActiveScan {
    generation: u64,
    ingredients: Vec<String>,
    results: Vec<RiskResult>,
}

#[derive(Debug, Default)]
struct SessionState {
    preview: Option<ScanImage>,
    step: ScanStep,
    active: ActiveScan,
    chat: Vec<ChatTurn>,
}

/// Per-process scan context: active preview, active scan and chat transcript.
#[derive(Debug, Default)]
pub struct ScanSession {
    generation: AtomicU64,
    state: RwLock<SessionState>,
}

impl ScanSession {
    pub async fn set_preview(&self, image: ScanImage) {
        let mut state = self.state.write().await;
        state.preview = Some(image);
        state.step = ScanStep::ImageSelected;
    }

    pub async fn preview(&self) -> Option<ScanImage> {
        self.state.read().await.preview.clone()
    }

    /// Starts a new scan, discarding the previous scan's ingredients and results.
    pub async fn begin(&self) -> ScanTicket {
        let mut state = self.state.write().await;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        state.active = ActiveScan {
            generation,
            ..Default::default()
        };
        state.step = ScanStep::Analyzing;

        ScanTicket { generation }
    }

    pub async fn is_current(&self, ticket: ScanTicket) -> bool {
        self.state.read().await.active.generation == ticket.generation
    }

    /// Publishes the canonical ingredient list. Returns `false` for a stale ticket.
    pub async fn publish_ingredients(&self, ticket: ScanTicket, ingredients: Vec<String>) -> bool {
        let mut state = self.state.write().await;
        if state.active.generation != ticket.generation {
            return false;
        }
        state.active.ingredients = ingredients;
        true
    }

    /// Publishes the classification results. Returns `false` for a stale ticket.
    pub async fn publish_results(&self, ticket: ScanTicket, results: Vec<RiskResult>) -> bool {
        let mut state = self.state.write().await;
        if state.active.generation != ticket.generation {
            return false;
        }
        state.active.results = results;
        state.step = ScanStep::Completed;
        true
    }

    /// Ends a scan that stopped early, returning the step to the selected image.
    /// A stale ticket leaves the newer scan's step alone.
    pub async fn halt(&self, ticket: ScanTicket) {
        let mut state = self.state.write().await;
        if state.active.generation == ticket.generation {
            state.step = ScanStep::ImageSelected;
        }
    }

    pub async fn ingredients(&self) -> Vec<String> {
        self.state.read().await.active.ingredients.clone()
    }

    pub async fn results(&self) -> Vec<RiskResult> {
        self.state.read().await.active.results.clone()
    }

    pub async fn snapshot(&self) -> ScanSnapshot {
        let state = self.state.read().await;
        ScanSnapshot {
            generation: state.active.generation,
            step: state.step,
            preview: state.preview.as_ref().map(ScanImage::preview),
            ingredients: state.active.ingredients.clone(),
            results: state.active.results.clone(),
        }
    }

    pub async fn record_turns(&self, turns: &[ChatTurn]) {
        self.state.write().await.chat.extend_from_slice(turns);
    }

    pub async fn transcript(&self) -> Vec<ChatTurn> {
        self.state.read().await.chat.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk::entities::RiskTag;

    #[tokio::test]
    async fn test_generations_increase() {
        let session = ScanSession::default();
        let first = session.begin().await;
        let second = session.begin().await;
        assert!(second.generation() > first.generation());
        assert!(!session.is_current(first).await);
        assert!(session.is_current(second).await);
    }

    #[tokio::test]
    async fn test_stale_scan_cannot_overwrite_newer_scan() {
        let session = ScanSession::default();
        let stale = session.begin().await;
        let fresh = session.begin().await;

        assert!(session.publish_ingredients(fresh, vec!["milk".to_string()]).await);
        assert!(!session.publish_ingredients(stale, vec!["sugar".to_string()]).await);
        assert!(
            !session
                .publish_results(stale, vec![RiskResult::new("sugar", RiskTag::Bad)])
                .await
        );

        assert_eq!(session.ingredients().await, vec!["milk".to_string()]);
        assert!(session.results().await.is_empty());
        assert_eq!(session.snapshot().await.step, ScanStep::Analyzing);
    }

    #[tokio::test]
    async fn test_halt_only_resets_current_scan() {
        let session = ScanSession::default();
        let first = session.begin().await;
        session.halt(first).await;
        assert_eq!(session.snapshot().await.step, ScanStep::ImageSelected);

        let second = session.begin().await;
        session.halt(first).await;
        assert_eq!(session.snapshot().await.step, ScanStep::Analyzing);

        session.halt(second).await;
        assert_eq!(session.snapshot().await.step, ScanStep::ImageSelected);
    }

    #[tokio::test]
    async fn test_new_scan_replaces_ingredients_wholesale() {
        let session = ScanSession::default();
        let first = session.begin().await;
        session
            .publish_ingredients(first, vec!["milk".to_string(), "salt".to_string()])
            .await;

        let second = session.begin().await;
        assert!(session.ingredients().await.is_empty());

        session
            .publish_ingredients(second, vec!["water".to_string()])
            .await;
        assert_eq!(session.ingredients().await, vec!["water".to_string()]);
    }
}
