use tracing::{debug, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, ports::LLMClient},
    scan::{entities::CorrectionSource, normalizer},
};

/// Result of asking the language model to fix OCR spelling mistakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionOutcome {
    Corrected(Vec<String>),
    /// The model could not be used; carries the deduplicated raw candidates.
    Fallback {
        candidates: Vec<String>,
        reason: CoreError,
    },
}

impl CorrectionOutcome {
    pub fn source(&self) -> CorrectionSource {
        match self {
            CorrectionOutcome::Corrected(_) => CorrectionSource::LanguageModel,
            CorrectionOutcome::Fallback { .. } => CorrectionSource::RawCandidates,
        }
    }

    pub fn into_tokens(self) -> Vec<String> {
        match self {
            CorrectionOutcome::Corrected(tokens) => tokens,
            CorrectionOutcome::Fallback { candidates, .. } => candidates,
        }
    }
}

pub fn correction_prompt(candidates: &[String]) -> String {
    format!(
        "Correct the spelling of these ingredients and return them as a comma-separated list:\n{}",
        candidates.join(", ")
    )
}

/// Parses a comma separated model reply into distinct ingredient tokens.
pub fn parse_correction_reply(reply: &str) -> Vec<String> {
    normalizer::dedupe(normalizer::split_candidates(reply))
}

pub async fn correct_ingredients<L>(llm_client: &L, candidates: &[String]) -> CorrectionOutcome
where
    L: LLMClient,
{
    match llm_client
        .generate_with_text(correction_prompt(candidates))
        .await
    {
        Ok(reply) if !reply.trim().is_empty() => {
            let corrected = parse_correction_reply(&reply);
            debug!(count = corrected.len(), "spell correction applied");
            CorrectionOutcome::Corrected(corrected)
        }
        // an empty answer echoes the input back
        Ok(_) | Err(CoreError::EmptyCompletion) => {
            CorrectionOutcome::Corrected(parse_correction_reply(&candidates.join(", ")))
        }
        Err(e) => {
            warn!(error = %e, "spell correction failed, using raw candidates");
            CorrectionOutcome::Fallback {
                candidates: normalizer::dedupe(candidates.to_vec()),
                reason: e,
            }
        }
    }
}
